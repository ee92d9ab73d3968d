//! The MessageCard notification document and its wire encoding

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// Attachment content type understood by the chat destination
pub const CONTENT_TYPE: &str = "application/vnd.microsoft.teams.card.o365connector";

/// Schema URL carried by every card
pub const SCHEMA_URL: &str = "https://schema.org/extensions";

/// Accent color of the rendered card
pub const THEME_COLOR: &str = "778eb1";

/// A single name/value row in the card's activity section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Displayed row label
    pub name: String,
    /// Displayed row content
    pub value: String,
}

/// A chat notification card.
///
/// Holds the flat fields of the card; the nested webhook document is only
/// produced on [`MessageCard::to_wire`] and parsed on
/// [`MessageCard::from_wire`]. Facts keep insertion order, which is display
/// order. The activity image is either a URL or absent, never an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCard {
    title: String,
    activity_title: String,
    activity_subtitle: String,
    activity_image: Option<String>,
    facts: Vec<Fact>,
}

impl MessageCard {
    /// Create an empty card. The empty card is accepted by the destination;
    /// titles and facts are filled in through the setters.
    pub fn new(title: impl Into<String>, activity_image: Option<&str>) -> Self {
        let mut card = Self {
            title: title.into(),
            activity_title: String::new(),
            activity_subtitle: String::new(),
            activity_image: None,
            facts: Vec::new(),
        };
        card.set_activity_image(activity_image);
        card
    }

    /// Set the card title (drives both the wire `summary` and `title`)
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the activity section headline
    pub fn set_activity_title(&mut self, activity_title: impl Into<String>) {
        self.activity_title = activity_title.into();
    }

    /// Set the activity section subline
    pub fn set_activity_subtitle(&mut self, activity_subtitle: impl Into<String>) {
        self.activity_subtitle = activity_subtitle.into();
    }

    /// Set or remove the activity image. An empty or absent URL removes the
    /// image entirely; removing an already absent image is a no-op.
    pub fn set_activity_image(&mut self, url: Option<&str>) {
        match url {
            Some(url) if !url.is_empty() => self.activity_image = Some(url.to_string()),
            _ => self.activity_image = None,
        }
    }

    /// Append a fact row. Repeated names are kept as repeated rows so
    /// successive runs can accumulate independent entries for the same item.
    pub fn add_fact(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.facts.push(Fact {
            name: name.into(),
            value: value.into(),
        });
    }

    /// True while no facts have been recorded
    pub fn is_fresh(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn activity_title(&self) -> &str {
        &self.activity_title
    }

    pub fn activity_subtitle(&self) -> &str {
        &self.activity_subtitle
    }

    pub fn activity_image(&self) -> Option<&str> {
        self.activity_image.as_deref()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Build the webhook document for this card.
    ///
    /// The `activityImage` key is present exactly when an image is set.
    pub fn to_wire(&self) -> Value {
        let facts: Vec<Value> = self
            .facts
            .iter()
            .map(|f| json!({ "name": f.name, "value": f.value }))
            .collect();

        let mut section = json!({
            "activityTitle": self.activity_title,
            "activitySubtitle": self.activity_subtitle,
            "facts": facts,
        });
        if let Some(image) = &self.activity_image {
            section["activityImage"] = json!(image);
        }

        json!({
            "type": "message",
            "attachments": [{
                "contentType": CONTENT_TYPE,
                "content": {
                    "$schema": SCHEMA_URL,
                    "type": "MessageCard",
                    "themeColor": THEME_COLOR,
                    "summary": self.title,
                    "title": self.title,
                    "sections": [section],
                },
            }],
        })
    }

    /// Parse a webhook document back into a card.
    ///
    /// Returns `None` for anything not shaped like a card with one section
    /// and a facts array, so callers can fall back to a fresh card.
    pub fn from_wire(value: &Value) -> Option<Self> {
        let content = value.get("attachments")?.get(0)?.get("content")?;
        let section = content.get("sections")?.get(0)?;

        let facts = section
            .get("facts")?
            .as_array()?
            .iter()
            .map(|fact| {
                Some(Fact {
                    name: fact.get("name")?.as_str()?.to_string(),
                    value: fact.get("value")?.as_str()?.to_string(),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        let card = Self {
            title: string_field(content, "title"),
            activity_title: string_field(section, "activityTitle"),
            activity_subtitle: string_field(section, "activitySubtitle"),
            activity_image: section
                .get("activityImage")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(String::from),
            facts,
        };
        debug!(title = %card.title, fact_count = card.facts.len(), "parsed card from wire document");
        Some(card)
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_keep_insertion_order() {
        let mut card = MessageCard::new("title", None);
        card.add_fact("b", "2");
        card.add_fact("a", "1");
        card.add_fact("b", "3");

        let names: Vec<&str> = card.facts().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);

        // no dedup: same name twice stays twice
        assert_eq!(card.facts()[0].value, "2");
        assert_eq!(card.facts()[2].value, "3");
    }

    #[test]
    fn test_empty_image_is_never_serialized() {
        let mut card = MessageCard::new("title", Some(""));
        assert_eq!(card.activity_image(), None);

        let wire = card.to_wire();
        let section = &wire["attachments"][0]["content"]["sections"][0];
        assert!(section.get("activityImage").is_none());

        card.set_activity_image(Some("http://x"));
        let wire = card.to_wire();
        let section = &wire["attachments"][0]["content"]["sections"][0];
        assert_eq!(section["activityImage"], "http://x");

        // removal of an already absent image is a no-op
        card.set_activity_image(None);
        card.set_activity_image(Some(""));
        assert_eq!(card.activity_image(), None);
    }

    #[test]
    fn test_wire_document_shape() {
        let mut card = MessageCard::new("AutoPkg", Some("http://logo"));
        card.set_activity_title("Firefox");
        card.set_activity_subtitle("Importer");
        card.add_fact("new Version", "128.0");

        let wire = card.to_wire();
        assert_eq!(wire["type"], "message");

        let attachment = &wire["attachments"][0];
        assert_eq!(attachment["contentType"], CONTENT_TYPE);

        let content = &attachment["content"];
        assert_eq!(content["$schema"], SCHEMA_URL);
        assert_eq!(content["type"], "MessageCard");
        assert_eq!(content["themeColor"], THEME_COLOR);
        assert_eq!(content["summary"], "AutoPkg");
        assert_eq!(content["title"], "AutoPkg");

        let section = &content["sections"][0];
        assert_eq!(section["activityTitle"], "Firefox");
        assert_eq!(section["activitySubtitle"], "Importer");
        assert_eq!(section["facts"][0]["name"], "new Version");
        assert_eq!(section["facts"][0]["value"], "128.0");
    }

    #[test]
    fn test_wire_round_trip() {
        let mut card = MessageCard::new("title", Some("http://logo"));
        card.set_activity_title("start: 2024-01-01 12:00:00");
        card.add_fact("Firefox", "imported ver. 128.0 -> testing");
        card.add_fact("Firefox", "staged ver. 127.0 testing -> production");

        let parsed = MessageCard::from_wire(&card.to_wire()).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn test_from_wire_rejects_malformed_documents() {
        assert!(MessageCard::from_wire(&json!({})).is_none());
        assert!(MessageCard::from_wire(&json!("text")).is_none());
        assert!(MessageCard::from_wire(&json!({ "attachments": [] })).is_none());
        // facts array is mandatory
        assert!(
            MessageCard::from_wire(&json!({
                "attachments": [{ "content": { "sections": [{}] } }]
            }))
            .is_none()
        );
    }

    #[test]
    fn test_title_setter_updates_summary_and_title() {
        let mut card = MessageCard::new("old", None);
        card.set_title("new");

        let content = &card.to_wire()["attachments"][0]["content"];
        assert_eq!(content["summary"], "new");
        assert_eq!(content["title"], "new");
    }
}
