//! Complete layout: skeleton facts, fixed actions and the changed-file list.

use crate::card::model::{Fact, PotentialAction, WebhookBody};
use crate::context::RunInfo;
use crate::github::{Commit, CommitFile, RunStatus};
use crate::inputs::ActionInputs;
use crate::markdown::escape_markdown_tokens;

use super::base_card;

/// Skeleton without the activity summary; the two fixed actions replace the
/// configurable defaults, and the changed files become a fact when enabled.
pub fn format(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
) -> WebhookBody {
    let mut body = base_card(commit, run, inputs, status);
    if let Some(section) = body.sections.first_mut() {
        section.activity_text = None;
        section.potential_actions = vec![
            PotentialAction::new("View build/deploy status", vec![run.run_link.clone()]),
            PotentialAction::new("Review commit diffs", vec![commit.html_url.clone()]),
        ];
        if inputs.include_files {
            section.facts.push(Fact::new(
                "Files changed:",
                format_files_to_display(&commit.files, inputs.allowed_file_len, &commit.html_url),
            ));
        }
    }
    body
}

/// Markdown bullet list of up to `allowed_len` changed files, each as
/// `[name](blob_url) (N changes)`, with an overflow line linking the full
/// commit view when the cap is exceeded.
pub fn format_files_to_display(
    files: &[CommitFile],
    allowed_len: usize,
    html_url: &str,
) -> String {
    if files.is_empty() {
        return "*No files changed.*".to_string();
    }

    let listed: Vec<String> = files
        .iter()
        .take(allowed_len)
        .map(|file| {
            format!(
                "[{}]({}) ({} changes)",
                escape_markdown_tokens(&file.filename),
                file.blob_url,
                file.changes
            )
        })
        .collect();

    let mut display = format!("* {}", listed.join("\n\n* "));
    if files.len() > allowed_len {
        let more = files.len() - allowed_len;
        display.push_str(&format!(
            "\n\n* and [{more} more files]({html_url}) changed"
        ));
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> CommitFile {
        CommitFile {
            filename: name.to_string(),
            blob_url: format!("https://github.com/o/r/blob/abc/{name}"),
            changes: 2,
        }
    }

    #[test]
    fn test_no_files_changed_notice() {
        let display = format_files_to_display(&[], 7, "https://github.com/o/r/commit/abc");
        assert_eq!(display, "*No files changed.*");
    }

    #[test]
    fn test_lists_all_files_under_cap() {
        let files = vec![file("a.rs"), file("b.rs")];
        let display = format_files_to_display(&files, 7, "https://github.com/o/r/commit/abc");
        assert_eq!(display.matches("* [").count(), 2);
        assert!(!display.contains("more files"));
    }

    #[test]
    fn test_overflow_is_cap_relative() {
        let files: Vec<CommitFile> = (0..9).map(|i| file(&format!("f{i}.rs"))).collect();
        let display = format_files_to_display(&files, 7, "https://github.com/o/r/commit/abc");
        assert_eq!(display.matches("* [").count(), 7);
        assert!(display.contains("and [2 more files](https://github.com/o/r/commit/abc) changed"));

        let display = format_files_to_display(&files, 3, "https://github.com/o/r/commit/abc");
        assert_eq!(display.matches("* [").count(), 3);
        assert!(display.contains("6 more files"));
    }

    #[test]
    fn test_file_names_are_escaped() {
        let files = vec![file("src/my_module.rs")];
        let display = format_files_to_display(&files, 7, "https://github.com/o/r/commit/abc");
        assert!(display.contains("src/my\\_module.rs"));
    }
}
