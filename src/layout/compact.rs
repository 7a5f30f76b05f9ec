//! Compact layout: a single bold line, no sections.

use crate::card::model::WebhookBody;
use crate::card::theme::conclusion_color;
use crate::context::RunInfo;
use crate::github::{Commit, RunStatus};
use crate::inputs::ActionInputs;

use super::{run_summary, status_label};

/// Status labels followed by the run / commit / repository / author links.
/// The environment tag only appears when the environment input is set.
pub fn format(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
) -> WebhookBody {
    let mut labels = status_label(&status.conclusion, status.elapsed_seconds);
    if !inputs.environment.trim().is_empty() {
        labels.push_str(&format!(" `ENV:{}`", inputs.environment.to_uppercase()));
    }

    WebhookBody::new(conclusion_color(&status.conclusion))
        .with_text(format!("{} &nbsp; {}", labels, run_summary(commit, run)))
}
