//! # Fragment Engine
//!
//! Re-segments a sentence into display-sized [`Fragment`]s. Every strategy is a pure
//! function of the sentence text and, for the tree strategies, its constituency parse.
//!
//! | Strategy        | Needs tree | Output                                              |
//! |-----------------|------------|-----------------------------------------------------|
//! | `WholeSentence` | no         | the sentence as one flush-left fragment             |
//! | `FixedWidth`    | no         | groups of `max_tokens` whitespace tokens            |
//! | `TreeDepth`     | yes        | staircase of up to `max_tokens` leaves per line     |
//! | `HeightBucket`  | yes        | every subtree, grouped by ascending height          |
//! | `LengthFilter`  | yes        | labeled subtrees whose leaf count is within bounds  |
//!
//! [`FragmentEngine`] applies a strategy to whole documents, asking the
//! [`ConstituencyParser`] it was given for trees when the strategy needs them.

mod constituent;
mod depth;
mod whitespace;

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::models::{Document, Fragment};
use crate::tree::{ConstituencyParser, ParseTree, ParserError};

/// Tokens per fragment when nothing else is configured
pub const DEFAULT_MAX_TOKENS: NonZeroUsize = NonZeroUsize::new(4).unwrap();

/// Largest leaf count kept by [`Strategy::LengthFilter`] when none is configured
pub const DEFAULT_MAX_LENGTH: usize = 20;

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

/// The closed set of fragmenting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum Strategy {
    WholeSentence,
    FixedWidth {
        max_tokens: NonZeroUsize,
    },
    /// Vertical staircase formatting over the parse tree's leaves
    TreeDepth {
        max_tokens: NonZeroUsize,
    },
    HeightBucket {
        /// Emit only subtrees of this height; all heights below the root's when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<usize>,
    },
    LengthFilter {
        #[serde(default)]
        min_length: usize,
        #[serde(default = "default_max_length")]
        max_length: usize,
    },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::FixedWidth {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("The {strategy} strategy needs a parse tree")]
    MissingParseTree { strategy: &'static str },
    #[error("The {strategy} strategy needs a constituency parser")]
    MissingParser { strategy: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::WholeSentence => "whole-sentence",
            Strategy::FixedWidth { .. } => "fixed-width",
            Strategy::TreeDepth { .. } => "tree-depth",
            Strategy::HeightBucket { .. } => "height-bucket",
            Strategy::LengthFilter { .. } => "length-filter",
        }
    }

    pub fn requires_tree(&self) -> bool {
        matches!(
            self,
            Strategy::TreeDepth { .. } | Strategy::HeightBucket { .. } | Strategy::LengthFilter { .. }
        )
    }

    /// Fragment one sentence.
    ///
    /// Tree strategies read only `tree` and fail when it is missing; the others read only
    /// `sentence`.
    pub fn format(
        &self,
        sentence: &str,
        tree: Option<&ParseTree>,
    ) -> Result<Vec<Fragment>, PreconditionError> {
        let fragments = match *self {
            Strategy::WholeSentence => whitespace::whole_sentence(sentence),
            Strategy::FixedWidth { max_tokens } => whitespace::fixed_width(sentence, max_tokens),
            Strategy::TreeDepth { max_tokens } => depth::tree_depth(self.tree(tree)?, max_tokens),
            Strategy::HeightBucket { height } => {
                constituent::height_bucket(self.tree(tree)?, height)
            }
            Strategy::LengthFilter {
                min_length,
                max_length,
            } => constituent::length_filter(self.tree(tree)?, min_length..=max_length),
        };
        Ok(fragments)
    }

    fn tree<'t>(&self, tree: Option<&'t ParseTree>) -> Result<&'t ParseTree, PreconditionError> {
        tree.ok_or(PreconditionError::MissingParseTree {
            strategy: self.name(),
        })
    }
}

/// Applies a [`Strategy`] to sentences and documents.
///
/// The parser is an explicit dependency; tree strategies fail without one.
pub struct FragmentEngine<'p> {
    strategy: Strategy,
    parser: Option<&'p dyn ConstituencyParser>,
}

impl<'p> FragmentEngine<'p> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            parser: None,
        }
    }

    pub fn with_parser(mut self, parser: &'p dyn ConstituencyParser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Fragment a single sentence.
    ///
    /// When the parser returns several trees their fragments are concatenated in order.
    pub fn fragment_sentence(&self, sentence: &str) -> Result<Vec<Fragment>, EngineError> {
        let Some(parser) = self.tree_parser()? else {
            return Ok(self.strategy.format(sentence, None)?);
        };

        let mut fragments = Vec::new();
        for tree in parser.parse(sentence)? {
            fragments.extend(self.strategy.format(sentence, Some(&tree))?);
        }
        log::trace!(
            "{} produced {} fragments for {sentence:?}",
            self.strategy.name(),
            fragments.len()
        );
        Ok(fragments)
    }

    /// Populate the fragments of every sentence in the document.
    ///
    /// On error the document is left untouched.
    pub fn fragment_document(&self, document: &mut Document) -> Result<(), EngineError> {
        self.tree_parser()?;

        let fragmented = document
            .sentences()
            .map(|sentence| self.fragment_sentence(&sentence.text))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Fragmented {} sentences of {:?} with {}",
            fragmented.len(),
            document.header,
            self.strategy.name()
        );

        for (sentence, fragments) in document.sentences_mut().into_iter().zip(fragmented) {
            sentence.fragments = Some(fragments);
        }
        Ok(())
    }

    /// The parser, when the strategy needs one
    fn tree_parser(&self) -> Result<Option<&'p dyn ConstituencyParser>, PreconditionError> {
        if !self.strategy.requires_tree() {
            return Ok(None);
        }
        self.parser
            .map(Some)
            .ok_or(PreconditionError::MissingParser {
                strategy: self.strategy.name(),
            })
    }
}
