use std::fmt;

use serde::{Deserialize, Serialize};

/// Returns true for tokens made up entirely of ASCII punctuation, e.g. `,` `.` `?!` `--`.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_punctuation())
}

/// One display-sized chunk of a sentence, tagged with an indentation depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Display depth; 0 is flush left.
    pub indent: usize,
    /// Tokens in sentence order. Never empty once the fragment is emitted.
    pub tokens: Vec<String>,
    /// Precomputed space-join of `tokens`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Fragment {
    /// Create an empty fragment at the given depth
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            tokens: Vec::new(),
            text: None,
        }
    }

    /// Create a fragment from tokens, precomputing its text
    pub fn from_tokens<I, S>(indent: usize, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(indent)
            .with_tokens(tokens.into_iter().map(Into::into).collect())
            .with_text()
    }

    fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Fill in `text` from the current tokens
    pub fn with_text(mut self) -> Self {
        self.text = Some(self.tokens.join(" "));
        self
    }

    /// Append a token. Punctuation is glued onto the preceding token rather than
    /// becoming a token of its own; with no preceding token it is kept as-is.
    pub fn append(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        if is_punctuation(token)
            && let Some(last) = self.tokens.last_mut()
        {
            last.push_str(token);
            return;
        }
        self.tokens.push(token.to_string());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The fragment text, joining tokens when it was not precomputed.
    pub fn joined(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.tokens.join(" "),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.joined(), indent = self.indent)
    }
}
