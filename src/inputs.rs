//! Action configuration, read once from the `INPUT_*` environment contract.
//!
//! The workflow runner exposes every configured option as
//! `INPUT_<UPPERCASED-NAME>`. The whole set is snapshotted into an immutable
//! value at startup; nothing downstream touches the environment.

use std::env;

use anyhow::{Context, Result};

/// String-valued configuration options for one notification run.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// Webhook endpoint the card is POSTed to. Required.
    pub webhook_uri: String,
    /// Token for the commit / job-status lookups. Required.
    pub github_token: String,
    /// Deployment environment label; blank means no environment tag or fact.
    pub environment: String,
    pub card_layout_start: String,
    pub card_layout_exit: String,
    pub show_on_start: bool,
    pub show_on_exit: bool,
    pub show_on_failure: bool,
    pub include_files: bool,
    pub allowed_file_len: usize,
    /// YAML list of `{name, value}` pairs appended to the fact list.
    pub custom_facts: Option<String>,
    /// YAML list of `{text, url}` pairs appended to the card actions.
    pub custom_actions: Option<String>,
    pub enable_view_status_action: bool,
    pub view_status_action_text: String,
    pub enable_review_diffs_action: bool,
    pub review_diffs_action_text: String,
}

impl Default for ActionInputs {
    fn default() -> Self {
        Self {
            webhook_uri: String::new(),
            github_token: String::new(),
            environment: String::new(),
            card_layout_start: "complete".to_string(),
            card_layout_exit: "compact".to_string(),
            show_on_start: true,
            show_on_exit: true,
            show_on_failure: false,
            include_files: true,
            allowed_file_len: 7,
            custom_facts: None,
            custom_actions: None,
            enable_view_status_action: true,
            view_status_action_text: "View build/deploy status".to_string(),
            enable_review_diffs_action: true,
            review_diffs_action_text: "Review commit diffs".to_string(),
        }
    }
}

impl ActionInputs {
    /// Read the full input set. Only the webhook URI and the token are
    /// required; everything else falls back to its default.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            webhook_uri: input("webhook-uri").context("webhook-uri input is required")?,
            github_token: input("github-token").context("github-token input is required")?,
            environment: input("environment").unwrap_or_default(),
            card_layout_start: input("card-layout-start").unwrap_or(defaults.card_layout_start),
            card_layout_exit: input("card-layout-exit").unwrap_or(defaults.card_layout_exit),
            show_on_start: input_flag("show-on-start", defaults.show_on_start),
            show_on_exit: input_flag("show-on-exit", defaults.show_on_exit),
            show_on_failure: input_flag("show-on-failure", defaults.show_on_failure),
            include_files: input_flag("include-files", defaults.include_files),
            allowed_file_len: input("allowed-file-len")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.allowed_file_len),
            custom_facts: input("custom-facts"),
            custom_actions: input("custom-actions"),
            enable_view_status_action: input_flag(
                "enable-view-status-action",
                defaults.enable_view_status_action,
            ),
            view_status_action_text: input("view-status-action-text")
                .unwrap_or(defaults.view_status_action_text),
            enable_review_diffs_action: input_flag(
                "enable-review-diffs-action",
                defaults.enable_review_diffs_action,
            ),
            review_diffs_action_text: input("review-diffs-action-text")
                .unwrap_or(defaults.review_diffs_action_text),
        })
    }

    /// True when the exit-state card should be delivered for `conclusion`:
    /// either exit cards are on and failure-only mode is off, or failure-only
    /// mode is on and the run failed.
    pub fn should_send_exit(&self, conclusion: &str) -> bool {
        (self.show_on_exit && !self.show_on_failure)
            || (self.show_on_failure && conclusion == "failure")
    }
}

/// One input by its action name. Unset and blank values are both `None`.
fn input(name: &str) -> Option<String> {
    env::var(format!("INPUT_{}", name.to_uppercase()))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn input_flag(name: &str, default: bool) -> bool {
    match input(name) {
        Some(value) => value.to_lowercase() == "true",
        None => default,
    }
}
