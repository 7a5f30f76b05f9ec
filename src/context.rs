//! Immutable snapshot of the workflow run environment.
//!
//! Everything the card pipeline knows about the current run is captured here
//! once, at startup. Formatters and the serializer receive a shared
//! reference instead of reading process state themselves.

use std::env;
use std::fs;

use anyhow::{Context, Result};

/// Derived, read-only view of the run: repository coordinates, commit, run
/// identifiers and the URLs the cards link to.
#[derive(Debug, Clone, Default)]
pub struct RunInfo {
    pub owner: String,
    pub repo: String,
    /// `owner/repo`
    pub repository: String,
    pub branch: String,
    pub sha: String,
    pub short_sha: String,
    pub run_id: String,
    pub run_num: String,
    pub event_name: String,
    pub job_name: String,
    pub repo_url: String,
    pub branch_url: String,
    pub run_link: String,
    /// Pre-push head from the event payload; bounds the changelog range.
    pub before_sha: Option<String>,
}

impl RunInfo {
    /// Build the snapshot from the standard `GITHUB_*` environment.
    ///
    /// Repository and commit sha are required; everything else degrades to
    /// an empty value and the affected card fragments are omitted.
    pub fn from_env() -> Result<Self> {
        let repository = env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set")?;
        let (owner, repo) = repository
            .split_once('/')
            .with_context(|| format!("GITHUB_REPOSITORY is not owner/repo: {repository}"))?;
        let sha = env::var("GITHUB_SHA").context("GITHUB_SHA is not set")?;

        let server_url =
            env::var("GITHUB_SERVER_URL").unwrap_or_else(|_| "https://github.com".to_string());
        let git_ref = env::var("GITHUB_REF").unwrap_or_default();
        let run_id = env::var("GITHUB_RUN_ID").unwrap_or_default();

        let repo_url = format!("{server_url}/{repository}");
        let branch = branch_from_ref(&git_ref).to_string();

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch_url: format!("{repo_url}/tree/{branch}"),
            run_link: format!("{repo_url}/actions/runs/{run_id}"),
            branch,
            short_sha: short_sha(&sha),
            sha,
            run_id,
            run_num: env::var("GITHUB_RUN_NUMBER").unwrap_or_default(),
            event_name: env::var("GITHUB_EVENT_NAME").unwrap_or_default(),
            job_name: env::var("GITHUB_JOB").unwrap_or_default(),
            repository,
            repo_url,
            before_sha: before_sha_from_event(),
        })
    }
}

/// The 7-character abbreviated commit hash.
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(7).collect()
}

fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}

/// Read the pre-push head out of the event payload file, if any.
fn before_sha_from_event() -> Option<String> {
    let path = env::var("GITHUB_EVENT_PATH").ok()?;
    let payload = fs::read_to_string(path).ok()?;
    before_from_payload(&payload)
}

/// Push payloads carry `before`; an all-zero sha means a newly created ref
/// and there is no usable range boundary.
fn before_from_payload(payload: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(payload).ok()?;
    json.get("before")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty() && !s.chars().all(|c| c == '0'))
        .map(|s| s.to_string())
}
