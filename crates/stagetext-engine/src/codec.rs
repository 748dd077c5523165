//! JSON encoding of the document model.
//!
//! Absent headers and empty child lists are left out when encoding and restored as
//! `None` / `[]` when decoding. Decoding also rejects fragments without tokens.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Document, Fragment, Paragraph, Section, Sentence};

#[derive(Debug, thiserror::Error)]
#[error("Failed to encode record: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Fragment {index} of sentence {sentence:?} has no tokens")]
    EmptyFragment { sentence: String, index: usize },
    #[error("Fragment has no tokens")]
    EmptyTokens,
}

/// A model type with a serialized form.
pub trait Record: Serialize + DeserializeOwned {
    /// Checks serde cannot express
    fn validate(&self) -> Result<(), DecodeError> {
        Ok(())
    }
}

impl Record for Document {
    fn validate(&self) -> Result<(), DecodeError> {
        self.root.validate()
    }
}

impl Record for Section {
    fn validate(&self) -> Result<(), DecodeError> {
        self.sentences().try_for_each(Sentence::validate)
    }
}

impl Record for Paragraph {
    fn validate(&self) -> Result<(), DecodeError> {
        self.sentences.iter().try_for_each(Sentence::validate)
    }
}

impl Record for Sentence {
    fn validate(&self) -> Result<(), DecodeError> {
        let fragments = self.fragments.as_deref().unwrap_or_default();
        match fragments.iter().position(Fragment::is_empty) {
            Some(index) => Err(DecodeError::EmptyFragment {
                sentence: self.text.clone(),
                index,
            }),
            None => Ok(()),
        }
    }
}

impl Record for Fragment {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.is_empty() {
            return Err(DecodeError::EmptyTokens);
        }
        Ok(())
    }
}

pub fn encode<T: Record>(record: &T) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(record)?)
}

pub fn encode_string<T: Record>(record: &T) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(record)?)
}

pub fn encode_pretty<T: Record>(record: &T) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn decode<T: Record>(value: Value) -> Result<T, DecodeError> {
    let record: T = serde_json::from_value(value)?;
    record.validate()?;
    Ok(record)
}

pub fn decode_str<T: Record>(input: &str) -> Result<T, DecodeError> {
    let record: T = serde_json::from_str(input)?;
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::nested_section;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_encode_omits_absent_and_empty_fields() {
        let section = Section::root()
            .with_paragraph(Paragraph::from_texts(0, ["Plain."]))
            .with_subsection(Section::new("Empty"));

        assert_eq!(
            encode(&section).unwrap(),
            json!({
                "paragraphs": [
                    {"sentences": [{"text": "Plain.", "position": 0}], "position": 0}
                ],
                "subsections": [{"header": "Empty"}]
            })
        );
    }

    #[test]
    fn test_fragmented_into_nothing_is_kept_distinct() {
        let untouched = Sentence::new("", 0);
        let fragmented = Sentence::new("", 0).with_fragments(Vec::new());

        assert_eq!(encode(&untouched).unwrap(), json!({"text": "", "position": 0}));
        assert_eq!(
            encode(&fragmented).unwrap(),
            json!({"text": "", "position": 0, "sentence_parts": []})
        );
        assert_eq!(decode::<Sentence>(encode(&fragmented).unwrap()).unwrap(), fragmented);
    }

    #[test]
    fn test_document_wire_shape() {
        let sentence = Sentence::new("Hello, world.", 0).with_fragments(vec![
            Fragment::from_tokens(0, ["Hello,"]),
            Fragment::from_tokens(1, ["world."]),
        ]);
        let document = Document::new(
            "Greeting",
            Section::new("Greeting").with_paragraph(Paragraph::new(0, vec![sentence])),
        );

        assert_eq!(
            encode(&document).unwrap(),
            json!({
                "header": "Greeting",
                "section": {
                    "header": "Greeting",
                    "paragraphs": [{
                        "sentences": [{
                            "text": "Hello, world.",
                            "position": 0,
                            "sentence_parts": [
                                {"indent": 0, "tokens": ["Hello,"], "text": "Hello,"},
                                {"indent": 1, "tokens": ["world."], "text": "world."}
                            ]
                        }],
                        "position": 0
                    }]
                }
            })
        );
    }

    #[test]
    fn test_deep_document_round_trips() {
        let document = Document::new("Deep", nested_section(6));
        assert_eq!(document.root.depth(), 6);

        let text = encode_string(&document).unwrap();
        assert_eq!(decode_str::<Document>(&text).unwrap(), document);

        let pretty = encode_pretty(&document).unwrap();
        assert_eq!(decode_str::<Document>(&pretty).unwrap(), document);
    }

    #[test]
    fn test_decode_null_header_and_missing_lists() {
        let section: Section = decode(json!({"header": null})).unwrap();
        assert_eq!(section, Section::root());
    }

    #[test]
    fn test_decode_missing_required_field() {
        let err = decode::<Sentence>(json!({"text": "No position."})).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn test_decode_ill_typed_field() {
        let err = decode::<Paragraph>(json!({"position": "first"})).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_decode_rejects_empty_fragment() {
        let err = decode::<Document>(json!({
            "header": "Doc",
            "section": {
                "paragraphs": [{
                    "sentences": [{
                        "text": "Go.",
                        "position": 0,
                        "sentence_parts": [
                            {"indent": 0, "tokens": ["Go."]},
                            {"indent": 1, "tokens": []}
                        ]
                    }],
                    "position": 0
                }]
            }
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Fragment 1 of sentence \"Go.\" has no tokens"
        );
        assert!(matches!(
            decode::<Fragment>(json!({"indent": 0, "tokens": []})),
            Err(DecodeError::EmptyTokens)
        ));
    }
}
