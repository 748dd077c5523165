pub mod document;
pub mod fragment;

pub use document::{Document, Paragraph, Section, Sentence};
pub use fragment::{Fragment, is_punctuation};
