//! Shared fixtures and invariant checks for unit tests.

use crate::models::{Paragraph, Section};
use crate::outline::OutlineEvent;
use crate::tree::ParseTree;

/// `Hello, My name is Melroy.` as parsed by a PCFG parser (height 5).
pub fn melroy_tree() -> ParseTree {
    ParseTree::from_bracketed(
        "(ROOT (S (INTJ (UH Hello)) (, ,) (NP (PRP$ My) (NN name)) \
         (VP (VBZ is) (ADJP (JJ Melroy))) (. .)))",
    )
    .unwrap()
}

/// `Hello, world.` with leaves `Hello , world .`
pub fn hello_world_tree() -> ParseTree {
    ParseTree::from_bracketed("(ROOT (S (INTJ (UH Hello)) (, ,) (NP (NN world)) (. .)))").unwrap()
}

pub fn train_events() -> Vec<OutlineEvent> {
    vec![
        OutlineEvent::title("Train"),
        OutlineEvent::paragraph("Trains move."),
        OutlineEvent::heading(2, "History"),
        OutlineEvent::paragraph("Built in 1800."),
        OutlineEvent::heading(2, "Types"),
    ]
}

/// A chain of sections `depth` levels below the root, each with one paragraph.
pub fn nested_section(depth: usize) -> Section {
    let mut section = Section::new(format!("Level {depth}"))
        .with_paragraph(Paragraph::from_texts(0, [format!("Sentence at {depth}.")]));
    for level in (0..depth).rev() {
        section = Section::new(format!("Level {level}"))
            .with_paragraph(Paragraph::from_texts(0, [format!("Sentence at {level}.")]))
            .with_subsection(section);
    }
    section
}

/// Validates outline invariants.
///
/// Asserts that:
/// - Paragraph positions within each section run 0, 1, 2...
/// - Sentence positions within each paragraph run 0, 1, 2...
/// - Only the root may lack a header
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn assert_outline(root: &Section) {
    check_section(root, true);
}

fn check_section(section: &Section, is_root: bool) {
    assert!(
        is_root || section.header.is_some(),
        "nested section without header: {section:?}"
    );
    for (i, paragraph) in section.paragraphs.iter().enumerate() {
        assert_eq!(
            paragraph.position, i,
            "paragraph position out of order in {:?}",
            section.header
        );
        for (j, sentence) in paragraph.sentences.iter().enumerate() {
            assert_eq!(
                sentence.position, j,
                "sentence position out of order: {:?}",
                sentence.text
            );
        }
    }
    for subsection in &section.subsections {
        check_section(subsection, false);
    }
}
