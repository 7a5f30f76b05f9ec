//! Cozy layout: the skeleton section plus a one-line activity summary.

use crate::card::model::WebhookBody;
use crate::context::RunInfo;
use crate::github::{Commit, RunStatus};
use crate::inputs::ActionInputs;

use super::{base_card, run_summary};

pub fn format(
    commit: &Commit,
    run: &RunInfo,
    inputs: &ActionInputs,
    status: &RunStatus,
) -> WebhookBody {
    let mut body = base_card(commit, run, inputs, status);
    if let Some(section) = body.sections.first_mut() {
        section.activity_text = Some(run_summary(commit, run));
    }
    body
}
