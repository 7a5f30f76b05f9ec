//! Card model, theme palette, swatch encoding and Adaptive Card
//! serialization.

pub mod model;
pub mod serializer;
pub mod swatch;
pub mod theme;

pub use model::{CardSection, ChangelogItem, Fact, PotentialAction, WebhookBody};
pub use serializer::render_message;
pub use theme::{conclusion_color, DEFAULT_THEME_COLOR};
