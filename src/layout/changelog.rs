//! Changelog layout: one entry per commit in the pushed range.

use crate::card::model::{ChangelogItem, WebhookBody};
use crate::context::{short_sha, RunInfo};
use crate::github::{Commit, RunStatus};
use crate::inputs::ActionInputs;

use super::base_card;

/// Skeleton without facts or the activity summary; the section carries the
/// ordered changelog instead.
pub fn format(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
    commits: &[Commit],
) -> WebhookBody {
    let mut body = base_card(commit, run, inputs, status);
    if let Some(section) = body.sections.first_mut() {
        section.activity_text = None;
        section.facts.clear();
        section.changelog = commits.iter().map(changelog_item).collect();
    }
    body
}

/// Split a commit message on its first blank line: the first segment is the
/// title, the rest (rejoined as-is) is the description.
fn changelog_item(commit: &Commit) -> ChangelogItem {
    let message = &commit.commit.message;
    let (title, description) = match message.split_once("\n\n") {
        Some((title, rest)) => (title, rest),
        None => (message.as_str(), ""),
    };
    ChangelogItem::new(title, short_sha(&commit.sha), description)
}
