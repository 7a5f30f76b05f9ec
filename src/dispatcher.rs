//! Notification orchestration: pick a layout, render it, deliver it.
//!
//! One notification per invocation. Delivery is best-effort: a failed POST
//! is logged and swallowed so the surrounding workflow run keeps going.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::card::model::WebhookBody;
use crate::card::serializer;
use crate::context::RunInfo;
use crate::github::{Commit, GitHubClient, RunStatus};
use crate::inputs::ActionInputs;
use crate::layout::{self, CardLayout};

const WEBHOOK_TIMEOUT_SECS: u64 = 30;
const OUTPUT_DELIMITER: &str = "TDC_OUTPUT";

/// Which end of the run the notification describes; selects the layout key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Exit,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Start => "start",
            RunState::Exit => "exit",
        }
    }
}

/// Formats and delivers one card per invocation.
pub struct CardDispatcher {
    inputs: ActionInputs,
    run: RunInfo,
    client: reqwest::Client,
    dry_run: bool,
}

impl CardDispatcher {
    pub fn new(inputs: ActionInputs, run: RunInfo) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            inputs,
            run,
            client,
            dry_run: false,
        })
    }

    /// Render and print instead of delivering.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The layout selected for `state`. Unknown keys are fatal.
    pub fn layout_for(&self, state: RunState) -> Result<CardLayout> {
        let key = match state {
            RunState::Start => &self.inputs.card_layout_start,
            RunState::Exit => &self.inputs.card_layout_exit,
        };
        key.parse()
    }

    /// Fetch, format, serialize and deliver the card for `state`.
    ///
    /// Returns the rendered payload, or `None` when nothing was sent (the
    /// state's card is disabled, or a changelog range came back empty).
    pub async fn notify(
        &self,
        state: RunState,
        status: RunStatus,
        github: &GitHubClient,
    ) -> Result<Option<Value>> {
        if !self.should_send(state, &status.conclusion) {
            info!(
                state = state.as_str(),
                conclusion = %status.conclusion,
                "Card disabled for this run state, skipping"
            );
            return Ok(None);
        }

        let layout = self.layout_for(state)?;
        let commit = github.get_commit(&self.run).await?;

        let body = match layout {
            CardLayout::Compact => layout::compact::format(&commit, &self.run, &self.inputs, &status),
            CardLayout::Cozy => layout::cozy::format(&commit, &self.run, &self.inputs, &status),
            CardLayout::Complete => {
                layout::complete::format(&commit, &self.run, &self.inputs, &status)
            }
            CardLayout::Changelog => {
                let commits = match &self.run.before_sha {
                    Some(before) => github.compare_commits(&self.run, before, &self.run.sha).await?,
                    None => Vec::new(),
                };
                match changelog_body(&commit, &self.run, &self.inputs, &status, &commits) {
                    Some(body) => body,
                    None => {
                        info!("No commits found in range, skipping notification");
                        return Ok(None);
                    }
                }
            }
        };

        let payload = serializer::render_message(&body)?;
        let payload_json = serde_json::to_string_pretty(&payload)?;

        if self.dry_run {
            info!(layout = layout.as_str(), "[DRY-RUN] Would deliver card");
            println!("{payload_json}");
            return Ok(Some(payload));
        }

        self.deliver(&payload_json).await;
        Ok(Some(payload))
    }

    fn should_send(&self, state: RunState, conclusion: &str) -> bool {
        match state {
            RunState::Start => self.inputs.show_on_start,
            RunState::Exit => self.inputs.should_send_exit(conclusion),
        }
    }

    /// Best-effort POST. Failures are logged and swallowed; on success the
    /// payload is exposed as the `webhook-body` output.
    async fn deliver(&self, payload_json: &str) {
        let result = self
            .client
            .post(&self.inputs.webhook_uri)
            .header("Content-Type", "application/json")
            .body(payload_json.to_string())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                if let Err(error) = set_output("webhook-body", payload_json) {
                    warn!(%error, "Failed to expose webhook-body output");
                }
                info!(status = %response.status(), "Notification delivered");
                info!("{payload_json}");
            }
            Ok(response) => {
                error!(status = %response.status(), "Webhook delivery failed");
            }
            Err(error) => {
                error!(%error, "Webhook delivery failed");
            }
        }
    }
}

/// The changelog card, or `None` when the range holds no commits and there
/// is nothing worth sending.
pub fn changelog_body(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
    commits: &[Commit],
) -> Option<WebhookBody> {
    if commits.is_empty() {
        return None;
    }
    Some(layout::changelog::format(commit, run, inputs, status, commits))
}

/// Append a value to the `GITHUB_OUTPUT` file using the multiline delimiter
/// syntax. A no-op outside a workflow environment.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    let Ok(path) = std::env::var("GITHUB_OUTPUT") else {
        debug!(name, "GITHUB_OUTPUT not set, skipping output");
        return Ok(());
    };
    append_output(Path::new(&path), name, value)
}

fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    writeln!(file, "{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}")
        .context("Failed to write output value")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::CommitDetails;

    fn sample_commit() -> Commit {
        Commit {
            sha: "a1b2c3d4e5f6".to_string(),
            html_url: "https://github.com/o/r/commit/a1b2c3d4e5f6".to_string(),
            commit: CommitDetails {
                message: "Fix bug".to_string(),
            },
            author: None,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_changelog_body_empty_range_sends_nothing() {
        let commit = sample_commit();
        let body = changelog_body(
            &commit,
            &RunInfo::default(),
            &ActionInputs::default(),
            &RunStatus::in_progress(),
            &[],
        );
        assert!(body.is_none());
    }

    #[test]
    fn test_changelog_body_with_commits() {
        let commit = sample_commit();
        let body = changelog_body(
            &commit,
            &RunInfo::default(),
            &ActionInputs::default(),
            &RunStatus::in_progress(),
            std::slice::from_ref(&commit),
        )
        .unwrap();
        assert_eq!(body.sections[0].changelog.len(), 1);
        assert!(body.sections[0].facts.is_empty());
    }

    #[test]
    fn test_append_output_heredoc_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");

        append_output(&path, "webhook-body", "{\n  \"type\": \"message\"\n}").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "webhook-body<<TDC_OUTPUT\n{\n  \"type\": \"message\"\n}\nTDC_OUTPUT\n"
        );

        // appends, never truncates
        append_output(&path, "second", "x").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("second<<TDC_OUTPUT\nx\nTDC_OUTPUT\n"));
    }

    #[test]
    fn test_run_state_keys() {
        assert_eq!(RunState::Start.as_str(), "start");
        assert_eq!(RunState::Exit.as_str(), "exit");
    }
}
