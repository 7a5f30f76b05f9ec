//! Adaptive Card serialization.
//!
//! Turns the renderer-agnostic [`WebhookBody`] into the `message` envelope
//! the Teams webhook expects: one adaptive-card attachment whose body holds
//! an optional header block and one container per section. Empty sub-blocks
//! are omitted rather than rendered blank.

use anyhow::Result;
use serde_json::{json, Value};

use super::model::{CardSection, ChangelogItem, WebhookBody};
use super::swatch;

const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_VERSION: &str = "1.4";
const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Serialize a card into the webhook `message` document.
///
/// Every section's potential actions are collected, in order, into the
/// document's action array; only the first target URL of each is used. The
/// theme color becomes the inline background swatch.
pub fn render_message(body: &WebhookBody) -> Result<Value> {
    let swatch_uri = swatch::data_uri(&body.theme_color)?;

    let mut card_body: Vec<Value> = Vec::new();
    if let Some(text) = body.text.as_ref().filter(|t| !t.is_empty()) {
        card_body.push(json!({
            "type": "TextBlock",
            "size": "Medium",
            "weight": "Bolder",
            "wrap": true,
            "text": text,
        }));
    }
    card_body.extend(body.sections.iter().map(render_section));

    let actions: Vec<Value> = body
        .sections
        .iter()
        .flat_map(|section| section.potential_actions.iter())
        .filter_map(|action| {
            action.targets.first().map(|url| {
                json!({
                    "type": "Action.OpenUrl",
                    "title": action.name,
                    "url": url,
                })
            })
        })
        .collect();

    Ok(json!({
        "type": "message",
        "attachments": [{
            "contentType": CARD_CONTENT_TYPE,
            "content": {
                "type": "AdaptiveCard",
                "schema": CARD_SCHEMA,
                "version": CARD_VERSION,
                "msteams": { "width": "full" },
                "backgroundImage": {
                    "fillMode": "RepeatHorizontally",
                    "url": swatch_uri,
                },
                "body": card_body,
                "actions": actions,
            },
        }],
    }))
}

/// One container per section: the activity header columns, then the fact
/// set (only when facts exist), then the changelog entries.
fn render_section(section: &CardSection) -> Value {
    let mut items: Vec<Value> = vec![render_activity(section)];
    if !section.facts.is_empty() {
        items.push(json!({
            "type": "FactSet",
            "facts": section
                .facts
                .iter()
                .map(|fact| json!({ "title": fact.name, "value": fact.value }))
                .collect::<Vec<_>>(),
        }));
    }
    items.extend(section.changelog.iter().map(render_changelog_entry));
    json!({ "type": "Container", "items": items })
}

/// Fixed-width image column beside a stretching text column. The image
/// column disappears when there is no image, and each text block disappears
/// when its value is empty.
fn render_activity(section: &CardSection) -> Value {
    let mut columns: Vec<Value> = Vec::new();
    if !section.activity_image.is_empty() {
        columns.push(json!({
            "type": "Column",
            "width": "auto",
            "items": [{
                "type": "Image",
                "url": section.activity_image,
                "size": "Medium",
                "style": "Default",
            }],
        }));
    }

    let mut text_items: Vec<Value> = Vec::new();
    if !section.activity_title.is_empty() {
        text_items.push(json!({
            "type": "TextBlock",
            "text": section.activity_title,
            "maxLines": 2,
            "spacing": "None",
            "wrap": true,
        }));
    }
    if !section.activity_subtitle.is_empty() {
        text_items.push(json!({
            "type": "TextBlock",
            "text": section.activity_subtitle,
            "isSubtle": true,
            "spacing": "None",
            "wrap": true,
        }));
    }
    if let Some(text) = section.activity_text.as_ref().filter(|t| !t.is_empty()) {
        text_items.push(json!({
            "type": "TextBlock",
            "text": text,
            "spacing": "None",
            "wrap": true,
        }));
    }
    columns.push(json!({
        "type": "Column",
        "width": "stretch",
        "items": text_items,
    }));

    json!({ "type": "ColumnSet", "columns": columns })
}

/// A separated sub-container per changelog entry: monospace hash beside the
/// bold title, then the wrapped body. Either row is omitted when empty.
fn render_changelog_entry(item: &ChangelogItem) -> Value {
    let mut items: Vec<Value> = Vec::new();
    if !item.title.is_empty() || !item.short_sha.is_empty() {
        items.push(json!({
            "type": "ColumnSet",
            "columns": [
                {
                    "type": "Column",
                    "width": "auto",
                    "items": [{
                        "type": "TextBlock",
                        "text": item.short_sha,
                        "fontType": "Monospace",
                        "isSubtle": true,
                        "wrap": false,
                    }],
                },
                {
                    "type": "Column",
                    "width": "stretch",
                    "items": [{
                        "type": "TextBlock",
                        "text": item.title,
                        "weight": "Bolder",
                        "wrap": true,
                    }],
                },
            ],
        }));
    }
    if !item.description.is_empty() {
        items.push(json!({
            "type": "TextBlock",
            "text": item.description,
            "spacing": "Small",
            "wrap": true,
        }));
    }
    json!({ "type": "Container", "separator": true, "items": items })
}
