//! Render CI/CD run outcomes as MS Teams Adaptive Cards and deliver them to
//! an incoming webhook.
//!
//! Pipeline: an immutable run context and input snapshot feed a layout
//! formatter; the formatter produces a renderer-agnostic [`WebhookBody`];
//! the serializer turns it into the Adaptive Card `message` document; the
//! dispatcher performs one best-effort POST and exposes the payload as the
//! `webhook-body` output.

pub mod card;
pub mod context;
pub mod dispatcher;
pub mod github;
pub mod inputs;
pub mod layout;
pub mod markdown;

pub use card::model::{CardSection, ChangelogItem, Fact, PotentialAction, WebhookBody};
pub use card::serializer::render_message;
pub use card::theme::{conclusion_color, DEFAULT_THEME_COLOR};
pub use context::RunInfo;
pub use dispatcher::{set_output, CardDispatcher, RunState};
pub use github::{Account, Commit, CommitDetails, CommitFile, GitHubClient, RunStatus};
pub use inputs::ActionInputs;
pub use layout::{render_actions, status_label, CardLayout};
pub use markdown::escape_markdown_tokens;
