//! Plain-text event sources and the sentence splitting seam.
//!
//! Markup cleanup happens upstream; these helpers only cover plain text, where a whole
//! input becomes one titled paragraph.

use std::sync::OnceLock;

use regex::Regex;

use crate::outline::OutlineEvent;

/// Splits a paragraph body into sentence texts.
pub trait SentenceSplitter {
    fn split(&self, paragraph: &str) -> Vec<String>;
}

/// Regex sentence splitter: breaks after `.`, `!` or `?` (plus closing quotes or brackets)
/// when whitespace follows and the next word starts with an uppercase letter, digit,
/// quote or opening bracket.
///
/// Citation markers are stripped before splitting, so `energy.[13] It` still breaks after
/// `energy.`. Sentences are trimmed and empty pieces dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSplitter;

impl SentenceSplitter for PunctuationSplitter {
    fn split(&self, paragraph: &str) -> Vec<String> {
        let paragraph = strip_citations(paragraph);
        let paragraph = paragraph.as_str();
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in boundary_regex().find_iter(paragraph) {
            let opens_sentence = paragraph[boundary.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit() || "\"'“‘([".contains(c));
            if opens_sentence {
                push_sentence(&mut sentences, &paragraph[start..boundary.end()]);
                start = boundary.end();
            }
        }
        push_sentence(&mut sentences, &paragraph[start..]);

        sentences
    }
}

/// Splitter that keeps the whole paragraph as one sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeParagraph;

impl SentenceSplitter for WholeParagraph {
    fn split(&self, paragraph: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        push_sentence(&mut sentences, paragraph);
        sentences
    }
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let tidy = strip_citations(raw);
    let tidy = tidy.trim();
    if !tidy.is_empty() {
        sentences.push(tidy.to_string());
    }
}

fn boundary_regex() -> &'static Regex {
    static BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();
    BOUNDARY_REGEX.get_or_init(|| {
        Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).expect("Invalid sentence boundary regex")
    })
}

/// Remove wiki-style citation markers such as `[2]` or `[]`, together with any
/// whitespace in front of them.
pub fn strip_citations(text: &str) -> String {
    static CITATION_REGEX: OnceLock<Regex> = OnceLock::new();
    CITATION_REGEX
        .get_or_init(|| Regex::new(r"\s*\[\d*\]").expect("Invalid citation regex"))
        .replace_all(text, "")
        .into_owned()
}

/// Events for a plain-text document: the title, then the whole text as one paragraph.
pub fn plain_text_events(title: &str, text: &str) -> Vec<OutlineEvent> {
    vec![OutlineEvent::title(title), OutlineEvent::paragraph(text)]
}

/// Like [`plain_text_events`], for e-book text with hard line breaks inside sentences.
pub fn book_text_events(title: &str, text: &str) -> Vec<OutlineEvent> {
    plain_text_events(title, &text.replace(['\r', '\n'], " "))
}
