//! Layout selection and the card skeleton shared across layouts.
//!
//! Each layout is a pure function from the run data to a [`WebhookBody`].
//! The section-bearing layouts (cozy, complete, changelog) start from the
//! same [`base_card`] skeleton and apply their own transformation instead of
//! mutating one another's output.

pub mod changelog;
pub mod compact;
pub mod complete;
pub mod cozy;

use std::str::FromStr;

use anyhow::{bail, Error};
use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::card::model::{CardSection, Fact, PotentialAction, WebhookBody};
use crate::card::theme::conclusion_color;
use crate::context::RunInfo;
use crate::github::{Account, Commit, RunStatus};
use crate::inputs::ActionInputs;
use crate::markdown::escape_markdown_tokens;

/// The named layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    Compact,
    Cozy,
    Complete,
    Changelog,
}

impl CardLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardLayout::Compact => "compact",
            CardLayout::Cozy => "cozy",
            CardLayout::Complete => "complete",
            CardLayout::Changelog => "changelog",
        }
    }
}

impl FromStr for CardLayout {
    type Err = Error;

    /// An unrecognized key is a fatal configuration error; nothing is sent.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "compact" => Ok(CardLayout::Compact),
            "cozy" => Ok(CardLayout::Cozy),
            "complete" => Ok(CardLayout::Complete),
            "changelog" => Ok(CardLayout::Changelog),
            other => bail!("Invalid card layout: {other}"),
        }
    }
}

/// The uppercased status label with the elapsed-time suffix when known,
/// e.g. `` `SUCCESS [42s]` ``.
pub fn status_label(conclusion: &str, elapsed_seconds: Option<i64>) -> String {
    match elapsed_seconds {
        Some(secs) => format!("`{} [{}s]`", conclusion.to_uppercase(), secs),
        None => format!("`{}`", conclusion.to_uppercase()),
    }
}

/// A `{text, url}` pair from the custom-actions input list.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomAction {
    pub text: String,
    pub url: String,
}

/// A `{name, value}` pair from the custom-facts input list.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFact {
    pub name: String,
    pub value: String,
}

/// The default view-status / review-diffs actions (honoring their toggles and
/// label inputs) plus any user-declared custom actions.
pub fn render_actions(
    inputs: &ActionInputs,
    status_url: &str,
    diff_url: &str,
) -> Vec<PotentialAction> {
    let mut actions = Vec::new();
    if inputs.enable_view_status_action {
        actions.push(PotentialAction::new(
            inputs.view_status_action_text.clone(),
            vec![status_url.to_string()],
        ));
    }
    if inputs.enable_review_diffs_action {
        actions.push(PotentialAction::new(
            inputs.review_diffs_action_text.clone(),
            vec![diff_url.to_string()],
        ));
    }
    actions.extend(custom_actions(inputs.custom_actions.as_deref()));
    actions
}

/// Parse the custom-actions YAML list, keeping entries with an http(s) URL.
/// Malformed input degrades to no custom actions.
pub(crate) fn custom_actions(raw: Option<&str>) -> Vec<PotentialAction> {
    let Some(raw) = raw.filter(|v| !v.eq_ignore_ascii_case("null")) else {
        return Vec::new();
    };
    let url_pattern = Regex::new(r"https?://\S+").unwrap();
    match serde_yaml::from_str::<Vec<CustomAction>>(raw) {
        Ok(list) => {
            let actions: Vec<PotentialAction> = list
                .into_iter()
                .filter(|action| url_pattern.is_match(&action.url))
                .map(|action| PotentialAction::new(action.text, vec![action.url]))
                .collect();
            info!(count = actions.len(), "Added custom actions");
            actions
        }
        Err(error) => {
            warn!(%error, "Invalid custom-actions value");
            Vec::new()
        }
    }
}

/// Parse the custom-facts YAML list with the same leniency.
pub(crate) fn custom_facts(raw: Option<&str>) -> Vec<Fact> {
    let Some(raw) = raw.filter(|v| !v.eq_ignore_ascii_case("null")) else {
        return Vec::new();
    };
    match serde_yaml::from_str::<Vec<CustomFact>>(raw) {
        Ok(list) => {
            let facts: Vec<Fact> = list
                .into_iter()
                .map(|fact| Fact::new(fact.name, fact.value))
                .collect();
            info!(count = facts.len(), "Added custom facts");
            facts
        }
        Err(error) => {
            warn!(%error, "Invalid custom-facts value");
            Vec::new()
        }
    }
}

/// The skeleton every section-bearing layout starts from: theme color, one
/// section with the activity header, the fact list (environment fact at
/// position 1 when configured, custom facts appended) and the rendered
/// actions.
pub fn base_card(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
) -> WebhookBody {
    let mut facts = vec![
        Fact::new("Event type:", format!("`{}`", run.event_name.to_uppercase())),
        Fact::new(
            "Status:",
            status_label(&status.conclusion, status.elapsed_seconds),
        ),
        Fact::new(
            "Commit message:",
            escape_markdown_tokens(&commit.commit.message),
        ),
        Fact::new("Repository & branch:", format!("[{0}]({0})", run.branch_url)),
    ];
    if !inputs.environment.trim().is_empty() {
        facts.insert(
            1,
            Fact::new("Environment:", format!("`{}`", inputs.environment.to_uppercase())),
        );
    }
    facts.extend(custom_facts(inputs.custom_facts.as_deref()));

    let author = commit.author.as_ref();
    let section = CardSection::new()
        .with_activity(
            format!(
                "**CI #{} (commit {})** on [{}]({})",
                run.run_num, run.short_sha, run.repository, run.repo_url
            ),
            activity_subtitle(author),
            author.map(|a| a.avatar_url.clone()).unwrap_or_default(),
        )
        .with_facts(facts)
        .with_potential_actions(render_actions(inputs, &run.run_link, &commit.html_url));

    WebhookBody::new(conclusion_color(&status.conclusion)).with_sections(vec![section])
}

fn activity_subtitle(author: Option<&Account>) -> String {
    let timestamp = Utc::now().format("%b %-d, %Y %H:%M UTC");
    match author {
        Some(author) => format!("by @{} on {}", author.login, timestamp),
        None => format!("on {timestamp}"),
    }
}

/// The markdown one-liner describing the run, shared by the compact text and
/// the cozy activity summary. The author link is omitted when the commit has
/// no linked account.
pub(crate) fn run_summary(commit: &Commit, run: &RunInfo) -> String {
    let mut summary = format!(
        "CI [#{}]({}) (commit [{}]({})) on [{}]({})",
        run.run_num, run.run_link, run.short_sha, commit.html_url, run.repository, run.repo_url
    );
    if let Some(author) = &commit.author {
        summary.push_str(&format!(" by [@{}]({})", author.login, author.html_url));
    }
    summary
}
