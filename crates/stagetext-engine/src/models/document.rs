use serde::{Deserialize, Serialize};

use super::Fragment;

/// A converted document: its title plus the outline rooted at `root`.
///
/// The document owns its whole tree; nothing is shared between documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Empty when the source had no title; a missing header decodes as empty
    #[serde(default)]
    pub header: String,
    #[serde(rename = "section")]
    pub root: Section,
}

impl Document {
    pub fn new(header: impl Into<String>, root: Section) -> Self {
        Self {
            header: header.into(),
            root,
        }
    }

    /// Every sentence in document order
    pub fn sentences(&self) -> Box<dyn Iterator<Item = &Sentence> + '_> {
        self.root.sentences()
    }

    /// Mutable access to every sentence, in the same order as [`Document::sentences`]
    pub fn sentences_mut(&mut self) -> Vec<&mut Sentence> {
        self.root.sentences_mut()
    }
}

/// A node in the document outline: a heading and its directly nested content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// `None` only for an implicit root that never received a title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create an empty section with a header
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }

    /// Create an untitled root section
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn with_subsection(mut self, subsection: Section) -> Self {
        self.subsections.push(subsection);
        self
    }

    /// Sentences of this section's own paragraphs, then of each subsection depth-first.
    pub fn sentences(&self) -> Box<dyn Iterator<Item = &Sentence> + '_> {
        let own = self.paragraphs.iter().flat_map(|p| p.sentences.iter());
        let nested = self.subsections.iter().flat_map(|s| s.sentences());
        Box::new(own.chain(nested))
    }

    pub fn sentences_mut(&mut self) -> Vec<&mut Sentence> {
        let mut out = Vec::new();
        collect_sentences_mut(self, &mut out);
        out
    }

    /// Headers in pre-order, this section's own header first when it has one.
    pub fn headers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_headers(self, &mut out);
        out
    }

    /// Number of nested subsection levels below this section (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.subsections
            .iter()
            .map(|s| s.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of sections in this subtree, including this one.
    pub fn section_count(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::section_count)
            .sum::<usize>()
    }
}

fn collect_sentences_mut<'a>(section: &'a mut Section, out: &mut Vec<&'a mut Sentence>) {
    for paragraph in &mut section.paragraphs {
        out.extend(paragraph.sentences.iter_mut());
    }
    for subsection in &mut section.subsections {
        collect_sentences_mut(subsection, out);
    }
}

fn collect_headers<'a>(section: &'a Section, out: &mut Vec<&'a str>) {
    if let Some(header) = &section.header {
        out.push(header);
    }
    for subsection in &section.subsections {
        collect_headers(subsection, out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<Sentence>,
    /// Index within the owning section, 0-based
    pub position: usize,
}

impl Paragraph {
    pub fn new(position: usize, sentences: Vec<Sentence>) -> Self {
        Self {
            sentences,
            position,
        }
    }

    /// Build a paragraph from sentence texts, numbering them in order.
    pub fn from_texts<I, S>(position: usize, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sentences = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Sentence::new(text, i))
            .collect();
        Self::new(position, sentences)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    /// Index within the owning paragraph, 0-based
    pub position: usize,
    /// Populated by the fragment engine; `None` until requested.
    #[serde(
        rename = "sentence_parts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fragments: Option<Vec<Fragment>>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
            fragments: None,
        }
    }

    pub fn with_fragments(mut self, fragments: Vec<Fragment>) -> Self {
        self.fragments = Some(fragments);
        self
    }

    /// Whitespace tokens of the sentence text
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}
