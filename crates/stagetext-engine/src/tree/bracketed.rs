//! Reader for Penn-Treebank bracketed trees.
//!
//! ```text
//! (ROOT (S (NP (DT A) (NN train)) (VP (VBZ moves)) (. .)))
//! ```
//!
//! A node is `(` label children `)`; the label may be empty, as in `( (S ...))`.
//! Children are nested nodes or bare tokens. Input is lexed with [Logos] and the
//! reader walks the resulting token vector.
//!
//! [Logos]: https://docs.rs/logos

use std::ops::Range;

use logos::Logos;

use super::ParseTree;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeSyntaxError {
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("Unexpected '{found}' at byte {offset}, expected {expected}")]
    Unexpected {
        found: String,
        offset: usize,
        expected: &'static str,
    },
    #[error("Trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum TokenKind {
    #[token("(")]
    Open,

    #[token(")")]
    Close,

    /// Labels and words: any run without whitespace or brackets
    #[regex(r"[^\s()]+")]
    Atom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    span: Range<usize>,
}

fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        // Every non-whitespace byte matches a rule, so errors cannot occur; fold them into atoms.
        let kind = result.unwrap_or(TokenKind::Atom);
        tokens.push(Token {
            kind,
            text: lexer.slice(),
            span: lexer.span(),
        });
    }

    tokens
}

pub(crate) fn parse(input: &str) -> Result<ParseTree, TreeSyntaxError> {
    let tokens = lex(input);
    let mut reader = Reader::new(&tokens);
    let tree = reader.node()?;
    if let Some(token) = reader.current() {
        return Err(TreeSyntaxError::TrailingInput {
            offset: token.span.start,
        });
    }
    Ok(tree)
}

/// Parse a sequence of top-level trees, as found in treebank files.
pub(crate) fn parse_many(input: &str) -> Result<Vec<ParseTree>, TreeSyntaxError> {
    let tokens = lex(input);
    let mut reader = Reader::new(&tokens);
    let mut trees = Vec::new();
    while !reader.at_end() {
        trees.push(reader.node()?);
    }
    Ok(trees)
}

struct Reader<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
}

impl<'t, 'input> Reader<'t, 'input> {
    fn new(tokens: &'t [Token<'input>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&'t Token<'input>> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn expect_open(&mut self) -> Result<(), TreeSyntaxError> {
        match self.current() {
            Some(token) if token.kind == TokenKind::Open => {
                self.bump();
                Ok(())
            }
            Some(token) => Err(TreeSyntaxError::Unexpected {
                found: token.text.to_string(),
                offset: token.span.start,
                expected: "'('",
            }),
            None => Err(TreeSyntaxError::UnexpectedEnd { expected: "'('" }),
        }
    }

    fn node(&mut self) -> Result<ParseTree, TreeSyntaxError> {
        self.expect_open()?;

        let label = match self.current() {
            Some(token) if token.kind == TokenKind::Atom => {
                self.bump();
                token.text.to_string()
            }
            Some(_) => String::new(),
            None => return Err(TreeSyntaxError::UnexpectedEnd { expected: "label" }),
        };

        let mut children = Vec::new();
        loop {
            let Some(token) = self.current() else {
                return Err(TreeSyntaxError::UnexpectedEnd { expected: "')'" });
            };
            match token.kind {
                TokenKind::Close => {
                    self.bump();
                    break;
                }
                TokenKind::Open => children.push(self.node()?),
                TokenKind::Atom => {
                    self.bump();
                    children.push(ParseTree::Leaf(token.text.to_string()));
                }
            }
        }

        Ok(ParseTree::Node { label, children })
    }
}
