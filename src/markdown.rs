//! Markdown token escaping for card text.
//!
//! Teams renders card text as a markdown subset; commit messages and file
//! names routinely contain characters that subset treats as markup. The
//! newline-indent collapse runs first so indented commit bodies do not turn
//! into code blocks before the token escaping sees them.

use regex::Regex;

/// Escape markdown tokens so raw text survives the Teams renderer.
///
/// Collapses runs of spaces after a newline to a single space, then prefixes
/// `_`, `*`, `|`, `#`, `-` and `>` with a backslash. Pure and total; note
/// that applying it twice doubles the backslashes.
pub fn escape_markdown_tokens(text: &str) -> String {
    let collapsed = Regex::new(r"\n +").unwrap().replace_all(text, "\n ");
    collapsed
        .replace('_', "\\_")
        .replace('*', "\\*")
        .replace('|', "\\|")
        .replace('#', "\\#")
        .replace('-', "\\-")
        .replace('>', "\\>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_each_token_once() {
        assert_eq!(escape_markdown_tokens("a_b"), "a\\_b");
        assert_eq!(escape_markdown_tokens("a*b"), "a\\*b");
        assert_eq!(escape_markdown_tokens("a|b"), "a\\|b");
        assert_eq!(escape_markdown_tokens("a#b"), "a\\#b");
        assert_eq!(escape_markdown_tokens("a-b"), "a\\-b");
        assert_eq!(escape_markdown_tokens("a>b"), "a\\>b");
    }

    #[test]
    fn test_escapes_every_occurrence() {
        assert_eq!(escape_markdown_tokens("__init__"), "\\_\\_init\\_\\_");
        assert_eq!(escape_markdown_tokens("*-*"), "\\*\\-\\*");
    }

    #[test]
    fn test_collapses_indentation_after_newline() {
        assert_eq!(escape_markdown_tokens("fix\n    body"), "fix\n body");
        assert_eq!(escape_markdown_tokens("fix\n body"), "fix\n body");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_markdown_tokens("Fix the build"), "Fix the build");
        assert_eq!(escape_markdown_tokens(""), "");
    }

    #[test]
    fn test_not_idempotent_by_design() {
        let once = escape_markdown_tokens("a_b");
        let twice = escape_markdown_tokens(&once);
        assert_eq!(twice, "a\\\\_b");
    }

    #[test]
    fn test_mixed_message() {
        let escaped = escape_markdown_tokens("feat: add foo_bar\n\n- item one\n  - nested");
        assert_eq!(escaped, "feat: add foo\\_bar\n\n\\- item one\n \\- nested");
    }
}
