//! # Constituency Parse Trees
//!
//! The fragment engine consumes parse trees but never produces them; trees come from an
//! external [`ConstituencyParser`] or are read from bracketed notation.
//!
//! ## Measures
//!
//! - **height**: a leaf token is 0, a node whose children are all leaves is 1, otherwise
//!   1 + the tallest child
//! - **length**: number of direct children
//! - **leaf count**: number of tokens under the node
//!
//! Traversal is pre-order and includes leaf tokens as height-0 subtrees.

pub mod bracketed;
pub mod parser;

use std::fmt;

pub use bracketed::TreeSyntaxError;
pub use parser::{ConstituencyParser, ParserError, TreeBank};

/// A labeled constituency tree whose leaves are the sentence's tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    Leaf(String),
    Node {
        label: String,
        children: Vec<ParseTree>,
    },
}

impl ParseTree {
    pub fn leaf(token: impl Into<String>) -> Self {
        ParseTree::Leaf(token.into())
    }

    pub fn node(label: impl Into<String>, children: Vec<ParseTree>) -> Self {
        ParseTree::Node {
            label: label.into(),
            children,
        }
    }

    /// Parse Penn-Treebank style bracketed notation, e.g. `(S (NP (DT A)) (. .))`.
    pub fn from_bracketed(input: &str) -> Result<Self, TreeSyntaxError> {
        bracketed::parse(input)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ParseTree::Leaf(_))
    }

    /// Node label; `None` for leaf tokens
    pub fn label(&self) -> Option<&str> {
        match self {
            ParseTree::Leaf(_) => None,
            ParseTree::Node { label, .. } => Some(label),
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Leaf(_) => &[],
            ParseTree::Node { children, .. } => children,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            ParseTree::Leaf(_) => 0,
            ParseTree::Node { children, .. } => {
                1 + children.iter().map(ParseTree::height).max().unwrap_or(0)
            }
        }
    }

    pub fn length(&self) -> usize {
        self.children().len()
    }

    /// Tokens under this node, in order
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ParseTree::Leaf(_) => 1,
            ParseTree::Node { children, .. } => children.iter().map(ParseTree::leaf_count).sum(),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ParseTree::Leaf(token) => out.push(token),
            ParseTree::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Every subtree in pre-order, starting with `self` and including leaf tokens.
    pub fn subtrees(&self) -> Subtrees<'_> {
        Subtrees { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`ParseTree::subtrees`]
pub struct Subtrees<'a> {
    stack: Vec<&'a ParseTree>,
}

impl<'a> Iterator for Subtrees<'a> {
    type Item = &'a ParseTree;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().iter().rev());
        Some(tree)
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf(token) => f.write_str(token),
            ParseTree::Node { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
