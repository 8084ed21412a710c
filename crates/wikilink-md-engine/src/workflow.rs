//! Conversion workflow: two sequential yes/no gates around the pure
//! transform. The gates and the editor are trait seams so the flow can run
//! against a terminal UI or against test doubles.

use crate::convert::convert;

/// Which confirmation prompt is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Pre-conversion gate: convert the current document?
    Conversion,
    /// Post-conversion gate: apply the converted text?
    Apply,
}

/// Terminal result of one invocation of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The first gate was declined; the document was never read.
    Declined,
    /// Conversion ran but the second gate was declined; the converted text
    /// was discarded and the document is untouched.
    Discarded,
    /// The converted text replaced the document content.
    Applied,
}

/// The host's document buffer: read the full text, replace the full text.
pub trait Editor {
    fn content(&self) -> String;
    fn set_content(&mut self, text: String);
}

/// Presents one yes/no gate and blocks until the user answers.
pub trait Confirmer {
    fn confirm(&mut self, gate: Gate) -> bool;
}

/// Run one conversion: gate, convert, gate, apply.
///
/// Both gates are strictly sequential and a "no" at either is terminal for
/// this invocation with no side effect on the editor. Only a "yes" at the
/// second gate mutates anything.
pub fn run_conversion<E, C>(editor: &mut E, confirmer: &mut C) -> Outcome
where
    E: Editor,
    C: Confirmer,
{
    if !confirmer.confirm(Gate::Conversion) {
        return Outcome::Declined;
    }

    let converted = convert(&editor.content());

    if !confirmer.confirm(Gate::Apply) {
        return Outcome::Discarded;
    }

    editor.set_content(converted);
    Outcome::Applied
}
