//! Classified input segments.

mod tokenizer;

use serde::Serialize;

pub use tokenizer::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    SinglishWord,
    ForeignWord,
    Number,
    Punctuation,
    Symbol,
    Whitespace,
    Emoji,
}

impl TokenKind {
    pub fn is_word(self) -> bool {
        matches!(self, TokenKind::SinglishWord | TokenKind::ForeignWord)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolClass {
    Url,
    Email,
    Hashtag,
    /// Repeated punctuation such as `!!!`.
    Cluster,
    Other,
}

/// Byte range in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenFlags {
    /// Symbol or punctuation that interferes with conversion.
    pub disrupting: bool,
    /// Digits embedded in a letter run (`g3dhara`).
    pub ambiguous: bool,
    pub symbol: Option<SymbolClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl<'a> Token<'a> {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
