//! # Outline Events
//!
//! The preprocessor describes a document as a **flat sequence** of events in document
//! order; the [`OutlineBuilder`](super::OutlineBuilder) turns them into a section tree.
//!
//! ```text
//! Heading(0, "Train")        ← title, names the root section
//!   Paragraph("Trains move.")
//! Heading(2, "History")      ← child of the root
//!   Paragraph("Built in 1800.")
//! Heading(2, "Types")        ← sibling of "History"
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineEvent {
    /// A heading opens a new section.
    ///
    /// Level 0 is the document title. `None` means the source heading had no
    /// recognisable level; the builder rejects it.
    Heading {
        #[serde(default)]
        level: Option<u32>,
        text: String,
    },
    /// A block of body text attached to the innermost open section.
    Paragraph { text: String },
}

impl OutlineEvent {
    pub fn heading(level: u32, text: impl Into<String>) -> Self {
        OutlineEvent::Heading {
            level: Some(level),
            text: text.into(),
        }
    }

    /// The document title (a level 0 heading)
    pub fn title(text: impl Into<String>) -> Self {
        Self::heading(0, text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        OutlineEvent::Paragraph { text: text.into() }
    }

    /// Create a heading from an HTML-style tag name.
    ///
    /// `title` is level 0 and `h1`..`h6` take the digit as their level; any other tag
    /// leaves the level undefined.
    pub fn from_tag(tag: &str, text: impl Into<String>) -> Self {
        let level = if tag.eq_ignore_ascii_case("title") {
            Some(0)
        } else {
            tag.chars().find_map(|c| c.to_digit(10))
        };
        OutlineEvent::Heading {
            level,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("title", Some(0))]
    #[case("h2", Some(2))]
    #[case("H5", Some(5))]
    #[case("p", None)]
    #[case("header", None)]
    fn test_from_tag_levels(#[case] tag: &str, #[case] level: Option<u32>) {
        let event = OutlineEvent::from_tag(tag, "Heading");
        assert_eq!(
            event,
            OutlineEvent::Heading {
                level,
                text: "Heading".to_string()
            }
        );
    }

    #[test]
    fn test_events_deserialize_from_json() {
        let events: Vec<OutlineEvent> = serde_json::from_str(
            r#"[
                {"kind": "heading", "level": 0, "text": "Train"},
                {"kind": "paragraph", "text": "Trains move."},
                {"kind": "heading", "text": "No level"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                OutlineEvent::title("Train"),
                OutlineEvent::paragraph("Trains move."),
                OutlineEvent::Heading {
                    level: None,
                    text: "No level".to_string()
                },
            ]
        );
    }
}
