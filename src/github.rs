//! Minimal GitHub REST client for the data the card layouts consume.
//!
//! Three lookups: a single commit (with its changed files), a commit range
//! for the changelog layout, and the jobs of the current workflow run for
//! the conclusion / elapsed-time resolution.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::context::RunInfo;

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = "teams-deploy-card";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A commit as returned by the commits API, trimmed to the rendered fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetails,
    /// Account of the commit author; absent for unlinked commits.
    pub author: Option<Account>,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetails {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    pub blob_url: String,
    #[serde(default)]
    pub changes: u64,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
struct JobsResponse {
    jobs: Vec<WorkflowJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJob {
    pub name: String,
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub steps: Vec<JobStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStep {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Outcome of the current job, resolved from its steps.
#[derive(Debug, Clone)]
pub struct RunStatus {
    pub conclusion: String,
    pub elapsed_seconds: Option<i64>,
}

impl RunStatus {
    /// Status for the start-state card, before any step has finished.
    pub fn in_progress() -> Self {
        Self {
            conclusion: "in_progress".to_string(),
            elapsed_seconds: None,
        }
    }
}

/// Token-authenticated REST client.
pub struct GitHubClient {
    token: String,
    api_root: String,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_root(token, API_ROOT)
    }

    /// Client against a custom API root (GitHub Enterprise, test servers).
    pub fn with_api_root(token: impl Into<String>, api_root: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            token: token.into(),
            api_root: api_root.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .context("GitHub API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API error: {status} - {body}");
        }

        response
            .json()
            .await
            .context("Failed to parse GitHub API response")
    }

    /// Fetch the head commit of the run, including its changed-files list.
    pub async fn get_commit(&self, run: &RunInfo) -> Result<Commit> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_root, run.owner, run.repo, run.sha
        );
        self.get(&url).await
    }

    /// Fetch the ordered commit range `base...head`.
    pub async fn compare_commits(
        &self,
        run: &RunInfo,
        base: &str,
        head: &str,
    ) -> Result<Vec<Commit>> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_root, run.owner, run.repo, base, head
        );
        let response: CompareResponse = self.get(&url).await?;
        Ok(response.commits)
    }

    /// List the jobs of the current workflow run.
    pub async fn list_run_jobs(&self, run: &RunInfo) -> Result<Vec<WorkflowJob>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs/{}/jobs",
            self.api_root, run.owner, run.repo, run.run_id
        );
        let response: JobsResponse = self.get(&url).await?;
        Ok(response.jobs)
    }
}

/// Resolve the current job's conclusion and elapsed time from its steps.
pub async fn workflow_run_status(client: &GitHubClient, run: &RunInfo) -> Result<RunStatus> {
    let jobs = client.list_run_jobs(run).await?;
    let job = jobs.into_iter().find(|j| j.name == run.job_name);
    Ok(resolve_status(job))
}

/// A step that stopped the job (failure, timeout, cancellation, required
/// action) wins; otherwise the last completed, non-skipped step decides.
fn resolve_status(job: Option<WorkflowJob>) -> RunStatus {
    let Some(job) = job else {
        return RunStatus::in_progress();
    };

    let stopped = job.steps.iter().find(|s| {
        matches!(
            s.conclusion.as_deref(),
            Some("failure" | "timed_out" | "cancelled" | "action_required")
        )
    });
    let last_step = stopped.or_else(|| {
        job.steps
            .iter()
            .rev()
            .find(|s| s.status == "completed" && s.conclusion.as_deref() != Some("skipped"))
    });

    let Some(step) = last_step else {
        return RunStatus::in_progress();
    };

    let conclusion = step
        .conclusion
        .clone()
        .unwrap_or_else(|| "in_progress".to_string());
    let elapsed_seconds = match (job.started_at, step.completed_at) {
        (Some(start), Some(end)) => Some((end - start).num_seconds()),
        _ => None,
    };

    RunStatus {
        conclusion,
        elapsed_seconds,
    }
}
