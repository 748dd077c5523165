use crate::models::{Paragraph, Section};
use crate::text::SentenceSplitter;

use super::{InputError, OutlineEvent};

const ROOT: usize = 0;

/// Arena slot for a section under construction
#[derive(Debug)]
struct SectionNode {
    level: u32,
    header: Option<String>,
    paragraphs: Vec<Paragraph>,
    children: Vec<usize>,
}

impl SectionNode {
    fn new(level: u32, header: Option<String>) -> Self {
        Self {
            level,
            header,
            paragraphs: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Rebuilds a section tree from outline events.
///
/// Sections live in an arena and refer to their children by index; `stack` holds the
/// indices of the currently open sections with the root at the bottom.
pub struct OutlineBuilder<'s> {
    splitter: &'s dyn SentenceSplitter,
    nodes: Vec<SectionNode>,
    stack: Vec<usize>,
}

impl<'s> OutlineBuilder<'s> {
    pub fn new(splitter: &'s dyn SentenceSplitter) -> Self {
        Self {
            splitter,
            nodes: vec![SectionNode::new(0, None)],
            stack: vec![ROOT],
        }
    }

    pub fn push(&mut self, event: OutlineEvent) -> Result<(), InputError> {
        match event {
            OutlineEvent::Heading { level: None, text } => {
                Err(InputError::UndefinedLevel { text })
            }
            OutlineEvent::Heading {
                level: Some(0),
                text,
            } => {
                self.open_title(text);
                Ok(())
            }
            OutlineEvent::Heading {
                level: Some(level),
                text,
            } => {
                self.open_section(level, text);
                Ok(())
            }
            OutlineEvent::Paragraph { text } => {
                self.add_paragraph(&text);
                Ok(())
            }
        }
    }

    /// Materialize the root section, consuming the builder
    pub fn finish(mut self) -> Section {
        into_section(&mut self.nodes, ROOT)
    }

    fn open_title(&mut self, text: String) {
        if self.nodes[ROOT].header.is_none() {
            log::debug!("Document titled {text:?}");
            self.nodes[ROOT].header = Some(text);
            self.stack.truncate(1);
            return;
        }

        log::warn!("Document already titled; treating {text:?} as a level 1 heading");
        self.open_section(1, text);
    }

    fn open_section(&mut self, level: u32, text: String) {
        let current = self.stack.pop().unwrap_or(ROOT);

        let parent = if level > self.nodes[current].level {
            current
        } else {
            self.nearest_shallower(level)
        };

        log::trace!(
            "Section {text:?} (level {level}) placed under {:?} (level {})",
            self.nodes[parent].header,
            self.nodes[parent].level
        );

        let id = self.nodes.len();
        self.nodes.push(SectionNode::new(level, Some(text)));
        self.nodes[parent].children.push(id);

        self.stack.push(parent);
        self.stack.push(id);
    }

    /// Pop open sections until one is strictly shallower than `level`; defaults to the root.
    fn nearest_shallower(&mut self, level: u32) -> usize {
        while let Some(id) = self.stack.pop() {
            if self.nodes[id].level < level {
                return id;
            }
        }
        ROOT
    }

    fn add_paragraph(&mut self, text: &str) {
        let top = self.stack.last().copied().unwrap_or(ROOT);
        let section = &mut self.nodes[top];
        let position = section.paragraphs.len();
        let paragraph = Paragraph::from_texts(position, self.splitter.split(text));
        log::trace!(
            "Paragraph {position} with {} sentences added to {:?}",
            paragraph.sentences.len(),
            section.header
        );
        section.paragraphs.push(paragraph);
    }
}

fn into_section(nodes: &mut [SectionNode], id: usize) -> Section {
    let header = nodes[id].header.take();
    let paragraphs = std::mem::take(&mut nodes[id].paragraphs);
    let children = std::mem::take(&mut nodes[id].children);
    let subsections = children
        .into_iter()
        .map(|child| into_section(nodes, child))
        .collect();

    Section {
        header,
        paragraphs,
        subsections,
    }
}
