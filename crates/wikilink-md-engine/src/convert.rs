use regex::{Captures, Regex};
use std::sync::OnceLock;

fn embed_regex() -> &'static Regex {
    static EMBED_REGEX: OnceLock<Regex> = OnceLock::new();
    EMBED_REGEX
        .get_or_init(|| Regex::new(r"!\[\[([^\]|]+)\|?([^\]]*)\]\]").expect("Invalid embed regex"))
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX
        .get_or_init(|| Regex::new(r"\[\[([^\]|]+)\|?([^\]]*)\]\]").expect("Invalid link regex"))
}

fn extension_regex() -> &'static Regex {
    static EXTENSION_REGEX: OnceLock<Regex> = OnceLock::new();
    EXTENSION_REGEX.get_or_init(|| Regex::new(r"\.\w+$").expect("Invalid extension regex"))
}

/// Rewrite every wiki-style link in `text` into standard Markdown syntax.
///
/// Two substitution passes run over the whole text, in a fixed order:
///
/// 1. **Embeds**: `![[target]]` and `![[target|alias]]` become
///    `![](target)` / `![alias](target)` image syntax.
/// 2. **Links**: `[[target]]` and `[[target|alias]]` become
///    `[display](target)` link syntax.
///
/// Embeds are consumed first because embed syntax is a strict prefix
/// extension of link syntax; running the link pass first would leave the
/// leading `!` attached to a link-shaped rewrite.
///
/// Internal targets get `.md` appended when they carry no extension, and
/// spaces become `%20`. External targets (`http://`, `https://`, `www.`)
/// pass through untouched. The display text is the alias when one is given,
/// otherwise the last path segment with its extension stripped.
///
/// Total over all inputs: text without wikilinks comes back unchanged, and
/// unbalanced bracket sequences are left alone because they never match.
/// The output contains no `[[` pairs, so re-running `convert` on its own
/// output is a no-op.
pub fn convert(text: &str) -> String {
    let text = embed_regex().replace_all(text, |caps: &Captures| {
        let link = process_link(&caps[1]);
        let alias = &caps[2];
        if alias.is_empty() {
            format!("![]({link})")
        } else {
            format!("![{alias}]({link})")
        }
    });

    link_regex()
        .replace_all(&text, |caps: &Captures| {
            let target = &caps[1];
            let alias = &caps[2];
            if is_external(target) {
                // External links keep their raw target verbatim
                let display = if alias.is_empty() { target } else { alias };
                format!("[{display}]({target})")
            } else {
                let link = process_link(target);
                let display = if alias.is_empty() {
                    display_name(target)
                } else {
                    alias
                };
                format!("[{display}]({link})")
            }
        })
        .into_owned()
}

fn is_external(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://") || link.starts_with("www.")
}

/// Turn a wikilink target into a Markdown link destination.
///
/// Local targets without a trailing extension get `.md` appended, and
/// literal spaces are percent-encoded. Nothing else is encoded; this is
/// deliberately narrower than full URI encoding.
fn process_link(link: &str) -> String {
    if is_external(link) {
        return link.to_string();
    }

    // NOTE: `\.\w+$` also matches a trailing dot-token that isn't a file
    // extension, e.g. the `.1` in `Page#sec.1`, which then suppresses the
    // `.md` suffix. Known quirk, kept as-is.
    let link = if extension_regex().is_match(link) {
        link.to_string()
    } else {
        format!("{link}.md")
    };

    link.replace(' ', "%20")
}

/// Derive display text from a target: last path segment, extension stripped.
fn display_name(link: &str) -> &str {
    let name = match link.rfind('/') {
        Some(idx) if idx + 1 < link.len() => &link[idx + 1..],
        _ => link,
    };

    match extension_regex().find(name) {
        Some(ext) => &name[..ext.start()],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[[Page A]]", "[Page A](Page%20A.md)")]
    #[case("[[folder/Page|Shown]]", "[Shown](folder/Page.md)")]
    #[case("[[https://example.com|Example]]", "[Example](https://example.com)")]
    #[case("![[img.png]]", "![](img.png)")]
    #[case("[[Note.pdf]]", "[Note](Note.pdf)")]
    fn converts_documented_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[rstest]
    #[case("plain text, no links at all")]
    #[case("a [markdown](link.md) and an ![image](pic.png)")]
    #[case("unbalanced [[bracket sequence")]
    #[case("stray closing ]] brackets")]
    #[case("")]
    fn passes_through_text_without_wikilinks(#[case] input: &str) {
        assert_eq!(convert(input), input);
    }

    #[test]
    fn appends_md_extension_to_bare_targets() {
        assert_eq!(convert("[[Note]]"), "[Note](Note.md)");
    }

    #[test]
    fn keeps_existing_extension_and_strips_it_from_display() {
        assert_eq!(convert("[[assets/diagram.svg]]"), "[diagram](assets/diagram.svg)");
    }

    #[test]
    fn encodes_spaces_in_path_but_not_in_display() {
        assert_eq!(
            convert("[[notes/My Great Note]]"),
            "[My Great Note](notes/My%20Great%20Note.md)"
        );
    }

    #[test]
    fn alias_wins_over_derived_display_name() {
        assert_eq!(convert("[[deep/path/Note.pdf|the doc]]"), "[the doc](deep/path/Note.pdf)");
    }

    #[test]
    fn empty_alias_falls_back_to_derived_display_name() {
        assert_eq!(convert("[[folder/Page|]]"), "[Page](folder/Page.md)");
    }

    #[rstest]
    #[case("[[http://example.org]]", "[http://example.org](http://example.org)")]
    #[case("[[www.example.org|site]]", "[site](www.example.org)")]
    #[case(
        "[[https://example.com/a b|spaced]]",
        "[spaced](https://example.com/a b)"
    )]
    fn external_targets_are_never_rewritten(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn embed_alias_becomes_alt_text() {
        assert_eq!(convert("![[img.png|a chart]]"), "![a chart](img.png)");
    }

    #[test]
    fn embed_without_extension_gets_md_suffix() {
        assert_eq!(convert("![[Embedded Note]]"), "![](Embedded%20Note.md)");
    }

    #[test]
    fn embeds_are_consumed_before_plain_links() {
        // The link pass must not see the interior of an embed, otherwise
        // `![[img.png]]` would come out as `![img](img.png)`.
        assert_eq!(
            convert("see ![[img.png]] and [[img.png]]"),
            "see ![](img.png) and [img](img.png)"
        );
    }

    #[test]
    fn converts_multiple_links_per_line() {
        assert_eq!(
            convert("[[A]] then [[B|b]] then [[www.c.org]]"),
            "[A](A.md) then [b](B.md) then [www.c.org](www.c.org)"
        );
    }

    #[test]
    fn trailing_dot_token_suppresses_md_suffix() {
        // `.1` satisfies the extension pattern, so no `.md` is appended and
        // the derived display name loses the `.1`.
        assert_eq!(convert("[[Page#sec.1]]"), "[Page#sec](Page#sec.1)");
    }

    #[test]
    fn target_ending_in_slash_keeps_whole_reference_as_display() {
        assert_eq!(convert("[[folder/]]"), "[folder/](folder/.md)");
    }

    #[test]
    fn alias_may_contain_pipes() {
        // Everything after the first pipe up to the closing bracket is the
        // alias, verbatim.
        assert_eq!(convert("[[Page|a|b]]"), "[a|b](Page.md)");
    }

    #[test]
    fn converting_twice_is_a_no_op() {
        let input = "intro [[Page A]] ![[img.png|alt]] and [[https://example.com|ext]]";
        let once = convert(input);
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn converts_a_full_document() {
        let input = "\
# Journal

- [[2024-01-01|yesterday]]
- ![[attachments/photo.jpg]]
- reading [[Some Book]]
- ref: [[https://en.wikipedia.org/wiki/Rust]]
";
        let expected = "\
# Journal

- [yesterday](2024-01-01.md)
- ![](attachments/photo.jpg)
- reading [Some Book](Some%20Book.md)
- ref: [https://en.wikipedia.org/wiki/Rust](https://en.wikipedia.org/wiki/Rust)
";
        assert_eq!(convert(input), expected);
    }
}
