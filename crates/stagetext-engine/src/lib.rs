pub mod codec;
pub mod fragment;
pub mod models;
pub mod outline;
pub mod text;
pub mod tree;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use codec::{DecodeError, EncodeError, Record};
pub use fragment::{EngineError, FragmentEngine, PreconditionError, Strategy};
pub use models::{Document, Fragment, Paragraph, Section, Sentence};
pub use outline::{InputError, OutlineBuilder, OutlineEvent, build, build_document};
pub use text::{PunctuationSplitter, SentenceSplitter};
pub use tree::{ConstituencyParser, ParseTree, ParserError, TreeBank, TreeSyntaxError};
