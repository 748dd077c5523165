//! # Outline Builder
//!
//! Reconstructs the nested section tree of a document from a flat stream of
//! [`OutlineEvent`]s.
//!
//! Each heading is placed under the nearest open section with a strictly lower level, so
//! level jumps (`h2` straight to `h5`) and early closes (`h4` back to `h2`) resolve without
//! lookahead. Paragraphs attach to the innermost open section and are split into
//! sentences by a [`SentenceSplitter`].

mod builder;
mod event;

pub use builder::OutlineBuilder;
pub use event::OutlineEvent;

use crate::models::{Document, Section};
use crate::text::{PunctuationSplitter, SentenceSplitter};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Heading {text:?} has no recognisable level")]
    UndefinedLevel { text: String },
}

/// Build the root section, splitting paragraphs with the default [`PunctuationSplitter`].
pub fn build<I>(events: I) -> Result<Section, InputError>
where
    I: IntoIterator<Item = OutlineEvent>,
{
    build_with(&PunctuationSplitter, events)
}

/// Build the root section with a caller-supplied sentence splitter.
///
/// Nothing is returned on error; the partially built tree is dropped.
pub fn build_with<I>(splitter: &dyn SentenceSplitter, events: I) -> Result<Section, InputError>
where
    I: IntoIterator<Item = OutlineEvent>,
{
    let mut builder = OutlineBuilder::new(splitter);
    for event in events {
        builder.push(event)?;
    }
    Ok(builder.finish())
}

/// Build a [`Document`] whose header is the title, or empty when there was none.
pub fn build_document<I>(events: I) -> Result<Document, InputError>
where
    I: IntoIterator<Item = OutlineEvent>,
{
    let root = build(events)?;
    let header = root.header.clone().unwrap_or_default();
    Ok(Document::new(header, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{assert_outline, train_events};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_document_uses_title_as_header() {
        let document = build_document(train_events()).unwrap();
        assert_eq!(document.header, "Train");
        assert_eq!(document.root.header.as_deref(), Some("Train"));
        assert_outline(&document.root);
    }

    #[test]
    fn test_untitled_document_has_empty_header() {
        let document = build_document([OutlineEvent::paragraph("Just text.")]).unwrap();
        assert_eq!(document.header, "");
        assert_eq!(document.root.header, None);
        assert_eq!(document.root.paragraphs.len(), 1);
    }

    #[test]
    fn test_no_events_gives_empty_root() {
        let root = build(Vec::new()).unwrap();
        assert_eq!(root, Section::root());
    }

    #[test]
    fn test_error_discards_partial_tree() {
        let events = vec![
            OutlineEvent::title("Doc"),
            OutlineEvent::paragraph("Kept so far."),
            OutlineEvent::from_tag("aside", "Broken"),
        ];
        assert_eq!(
            build(events).unwrap_err(),
            InputError::UndefinedLevel {
                text: "Broken".to_string()
            }
        );
    }

    #[test]
    fn test_paragraphs_split_into_sentences() {
        let root = build([
            OutlineEvent::title("Train"),
            OutlineEvent::paragraph("Trains move. They carry cargo."),
        ])
        .unwrap();
        let texts: Vec<&str> = root.sentences().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Trains move.", "They carry cargo."]);
        assert_eq!(root.paragraphs[0].sentences[1].position, 1);
    }

    #[test]
    fn test_empty_paragraph_is_kept() {
        let root = build([OutlineEvent::title("Doc"), OutlineEvent::paragraph("   ")]).unwrap();
        assert_eq!(root.paragraphs.len(), 1);
        assert!(root.paragraphs[0].sentences.is_empty());
    }
}
