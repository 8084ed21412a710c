use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::{env, io::stdout, path::PathBuf, process};
use wikilink_md_config::Config;
use wikilink_md_engine::{Confirmer, Editor, Gate, Outcome, io, run_conversion};

mod locale;
use locale::LocaleStrings;

/// The document currently open in the UI, playing the host editor role.
struct DocumentBuffer {
    text: String,
}

impl Editor for DocumentBuffer {
    fn content(&self) -> String {
        self.text.clone()
    }

    fn set_content(&mut self, text: String) {
        self.text = text;
    }
}

struct App {
    path: PathBuf,
    buffer: DocumentBuffer,
    status: Option<String>,
}

impl App {
    fn new(path: PathBuf, content: String) -> Self {
        Self {
            path,
            buffer: DocumentBuffer { text: content },
            status: None,
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Presents the two confirmation gates as centered modals over the document.
struct TuiConfirmer<'a, B: ratatui::backend::Backend> {
    terminal: &'a mut Terminal<B>,
    strings: &'static LocaleStrings,
    backdrop: String,
    error: Option<anyhow::Error>,
}

impl<B: ratatui::backend::Backend> TuiConfirmer<'_, B>
where
    B::Error: Send + Sync + 'static,
{
    fn ask(&mut self, gate: Gate) -> Result<bool> {
        let (title, message) = match gate {
            Gate::Conversion => (
                self.strings.confirm_conversion_title,
                self.strings.confirm_conversion_message,
            ),
            Gate::Apply => (
                self.strings.confirm_change_title,
                self.strings.confirm_change_message,
            ),
        };

        loop {
            let backdrop = &self.backdrop;
            let strings = self.strings;
            self.terminal
                .draw(|f| modal_ui(f, backdrop, title, message, strings))?;

            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl<B: ratatui::backend::Backend> Confirmer for TuiConfirmer<'_, B>
where
    B::Error: Send + Sync + 'static,
{
    fn confirm(&mut self, gate: Gate) -> bool {
        match self.ask(gate) {
            Ok(answer) => answer,
            Err(err) => {
                // Surface the terminal failure after the workflow unwinds;
                // treat the gate itself as declined.
                self.error = Some(err);
                false
            }
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Language comes from the config file; no config file means English.
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let strings = locale::strings(config.language);

    if args.len() != 2 {
        eprintln!("Usage: {} <markdown-file>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    // Precondition check: without an open document there is nothing to
    // convert, so abort before any UI comes up.
    let content = match io::read_document(&path) {
        Ok(content) => content,
        Err(io::IoError::NotFound(_)) => {
            eprintln!("{}", strings.open_file_notice);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {e}", path.display());
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, content);

    // Main loop
    let res = run_app(&mut terminal, &mut app, strings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    strings: &'static LocaleStrings,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app, strings))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') => convert_current_document(terminal, app, strings)?,
                _ => {}
            }
        }
    }
}

/// Run the gated conversion workflow and persist the result when applied.
fn convert_current_document<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    strings: &'static LocaleStrings,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut confirmer = TuiConfirmer {
        terminal,
        strings,
        backdrop: app.buffer.text.clone(),
        error: None,
    };

    let outcome = run_conversion(&mut app.buffer, &mut confirmer);

    if let Some(err) = confirmer.error {
        return Err(err);
    }

    if outcome == Outcome::Applied {
        io::write_document(&app.path, &app.buffer.text)?;
        app.status = Some(strings.conversion_complete_notice.to_string());
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &App, strings: &LocaleStrings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    document_pane(f, chunks[0], &app.buffer.text, &app.file_name());

    // Status/help line
    let bottom = if let Some(ref notice) = app.status {
        Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(vec![
            Span::raw(format!("c: {} | ", strings.convert_button_text)),
            Span::raw("q: Quit"),
        ])
    };
    f.render_widget(Paragraph::new(vec![bottom]), chunks[1]);
}

fn document_pane(f: &mut Frame, area: Rect, text: &str, title: &str) {
    let lines: Vec<Line> = text.lines().map(|line| Line::from(line.to_string())).collect();
    let document = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: false });

    f.render_widget(document, area);
}

fn modal_ui(f: &mut Frame, backdrop: &str, title: &str, message: &str, strings: &LocaleStrings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    document_pane(f, chunks[0], backdrop, "");

    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let buttons = Line::from(vec![
        Span::styled(
            format!("[y] {}", strings.confirm_button),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[n] {}", strings.cancel_button),
            Style::default().fg(Color::Red),
        ),
    ]);

    let modal = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        buttons,
    ])
    .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    .wrap(Wrap { trim: true });

    f.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
