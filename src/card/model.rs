//! Card building blocks shared by every layout.
//!
//! These are the renderer-agnostic pieces a layout assembles and the
//! serializer consumes: labeled facts, clickable actions, changelog entries,
//! titled sections and the top-level card body.

/// A labeled key/value line rendered inside a section's fact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A clickable link surfaced as a card action.
///
/// Only the first target URL is rendered; the list shape follows the legacy
/// connector-card contract the webhook still accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialAction {
    pub name: String,
    pub targets: Vec<String>,
}

impl PotentialAction {
    pub fn new(name: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }
}

/// One commit's entry in the changelog layout: title line, abbreviated hash
/// and the remaining message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogItem {
    pub title: String,
    pub short_sha: String,
    pub description: String,
}

impl ChangelogItem {
    pub fn new(
        title: impl Into<String>,
        short_sha: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            short_sha: short_sha.into(),
            description: description.into(),
        }
    }
}

/// A titled block within a card. Built incrementally by a layout, then
/// frozen by the serializer. Empty collections are simply omitted from the
/// rendered card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSection {
    pub activity_title: String,
    pub activity_subtitle: String,
    pub activity_image: String,
    pub activity_text: Option<String>,
    pub facts: Vec<Fact>,
    pub potential_actions: Vec<PotentialAction>,
    pub changelog: Vec<ChangelogItem>,
}

impl CardSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the activity header (title, subtitle, image URL).
    pub fn with_activity(
        mut self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        self.activity_title = title.into();
        self.activity_subtitle = subtitle.into();
        self.activity_image = image.into();
        self
    }

    pub fn with_activity_text(mut self, text: impl Into<String>) -> Self {
        self.activity_text = Some(text.into());
        self
    }

    pub fn with_facts(mut self, facts: Vec<Fact>) -> Self {
        self.facts = facts;
        self
    }

    pub fn with_potential_actions(mut self, actions: Vec<PotentialAction>) -> Self {
        self.potential_actions = actions;
        self
    }

    pub fn with_changelog(mut self, changelog: Vec<ChangelogItem>) -> Self {
        self.changelog = changelog;
        self
    }
}

/// The intermediate card handed to the serializer: optional header text, a
/// theme color and the ordered section list. Created fresh per notification
/// run and consumed exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookBody {
    pub text: Option<String>,
    pub theme_color: String,
    pub sections: Vec<CardSection>,
}

impl WebhookBody {
    pub fn new(theme_color: impl Into<String>) -> Self {
        Self {
            text: None,
            theme_color: theme_color.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_sections(mut self, sections: Vec<CardSection>) -> Self {
        self.sections = sections;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder_chain() {
        let section = CardSection::new()
            .with_activity("title", "subtitle", "https://example.com/a.png")
            .with_activity_text("summary")
            .with_facts(vec![Fact::new("Status:", "`SUCCESS`")]);

        assert_eq!(section.activity_title, "title");
        assert_eq!(section.activity_subtitle, "subtitle");
        assert_eq!(section.activity_image, "https://example.com/a.png");
        assert_eq!(section.activity_text.as_deref(), Some("summary"));
        assert_eq!(section.facts.len(), 1);
        assert!(section.potential_actions.is_empty());
        assert!(section.changelog.is_empty());
    }

    #[test]
    fn test_webhook_body_builder() {
        let body = WebhookBody::new("90C978")
            .with_text("`SUCCESS`")
            .with_sections(vec![CardSection::new()]);

        assert_eq!(body.theme_color, "90C978");
        assert_eq!(body.text.as_deref(), Some("`SUCCESS`"));
        assert_eq!(body.sections.len(), 1);
    }

    #[test]
    fn test_default_section_is_empty() {
        let section = CardSection::default();
        assert!(section.activity_title.is_empty());
        assert!(section.activity_text.is_none());
        assert!(section.facts.is_empty());
    }
}
