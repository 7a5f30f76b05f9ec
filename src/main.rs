//! Teams deploy card CLI
//!
//! Two entry points matching the two ends of a workflow run: `start` posts
//! the run-started card, `exit` resolves the job outcome and posts the
//! run-finished card.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use teams_deploy_card::github::workflow_run_status;
use teams_deploy_card::{
    ActionInputs, CardDispatcher, GitHubClient, RunInfo, RunState, RunStatus,
};

#[derive(Parser)]
#[command(name = "tdc")]
#[command(about = "Render CI run results as Teams cards and deliver them to a webhook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post the run-started card
    Start {
        /// Render and print the payload without delivering it
        #[arg(long)]
        dry_run: bool,
    },
    /// Resolve the job outcome and post the run-finished card
    Exit {
        /// Render and print the payload without delivering it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log level via RUST_LOG, default info; logs go to stderr so stdout
    // stays usable for dry-run payloads.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("teams_deploy_card=info,tdc=info"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let inputs = ActionInputs::from_env()?;
    let run = RunInfo::from_env()?;
    let github = GitHubClient::new(inputs.github_token.clone())?;

    match cli.command {
        Commands::Start { dry_run } => {
            let dispatcher = CardDispatcher::new(inputs, run)?.with_dry_run(dry_run);
            dispatcher
                .notify(RunState::Start, RunStatus::in_progress(), &github)
                .await?;
        }
        Commands::Exit { dry_run } => {
            let status = match workflow_run_status(&github, &run).await {
                Ok(status) => status,
                Err(error) => {
                    warn!(%error, "Could not resolve workflow job status");
                    RunStatus::in_progress()
                }
            };
            let dispatcher = CardDispatcher::new(inputs, run)?.with_dry_run(dry_run);
            dispatcher.notify(RunState::Exit, status, &github).await?;
        }
    }

    Ok(())
}
