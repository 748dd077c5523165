use std::collections::HashMap;

use super::{ParseTree, TreeSyntaxError, bracketed};

/// Failure reported by an external constituency parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Constituency parser failed on {sentence:?}: {reason}")]
pub struct ParserError {
    pub sentence: String,
    pub reason: String,
}

/// Turns a sentence into zero or more constituency trees.
///
/// Implementations are handed to the fragment engine explicitly; the engine never
/// configures or locates a parser on its own.
pub trait ConstituencyParser {
    fn parse(&self, sentence: &str) -> Result<Vec<ParseTree>, ParserError>;
}

impl<F> ConstituencyParser for F
where
    F: Fn(&str) -> Result<Vec<ParseTree>, ParserError>,
{
    fn parse(&self, sentence: &str) -> Result<Vec<ParseTree>, ParserError> {
        self(sentence)
    }
}

/// Pre-parsed trees looked up by sentence.
///
/// Sentences and trees are matched on their characters with all whitespace removed, so
/// `Hello, world.` finds the tree with leaves `Hello , world .`.
#[derive(Debug, Clone, Default)]
pub struct TreeBank {
    trees: HashMap<String, Vec<ParseTree>>,
}

impl TreeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every bracketed tree in `input`
    pub fn from_bracketed(input: &str) -> Result<Self, TreeSyntaxError> {
        let mut bank = Self::new();
        for tree in bracketed::parse_many(input)? {
            bank.insert(tree);
        }
        Ok(bank)
    }

    /// Add a tree. Several trees for the same sentence are kept in insertion order.
    pub fn insert(&mut self, tree: ParseTree) {
        let key = Self::key(&tree.leaves().concat());
        self.trees.entry(key).or_default().push(tree);
    }

    pub fn len(&self) -> usize {
        self.trees.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    fn key(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

impl ConstituencyParser for TreeBank {
    fn parse(&self, sentence: &str) -> Result<Vec<ParseTree>, ParserError> {
        match self.trees.get(&Self::key(sentence)) {
            Some(trees) => Ok(trees.clone()),
            None => {
                log::warn!("No tree in tree bank for sentence {sentence:?}");
                Ok(Vec::new())
            }
        }
    }
}
