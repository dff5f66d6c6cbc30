/*
 * token.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Lexer tokens as handed over by the external JavaScript parser.
 */

use serde::{Deserialize, Serialize};

/// Token categories.
///
/// Only `Eof` and `Name` carry meaning for source mapping; the rest are kept
/// so a token stream can be described faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// End of the token stream
    Eof,
    /// An identifier
    Name,
    Keyword,
    Punctuation,
    String,
    Number,
    Template,
    Regexp,
}

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof",
    "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while",
    "with", "null", "true", "false",
];

impl TokenKind {
    /// Map an acorn-style token type label onto a kind.
    ///
    /// Unknown labels are punctuation: acorn labels every operator and
    /// bracket by its own spelling.
    pub fn from_label(label: &str) -> Self {
        match label {
            "eof" => TokenKind::Eof,
            "name" => TokenKind::Name,
            "string" => TokenKind::String,
            "num" => TokenKind::Number,
            "template" | "invalidTemplate" => TokenKind::Template,
            "regexp" => TokenKind::Regexp,
            keyword if KEYWORDS.contains(&keyword) => TokenKind::Keyword,
            _ => TokenKind::Punctuation,
        }
    }
}

/// Line and column as reported by the lexer (1-indexed line, 0-indexed
/// column in UTF-16 code units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    pub line: u32,
    pub column: u32,
}

/// A single lexical token over the original source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// UTF-8 byte offset of the first character
    ///
    /// JavaScript lexers report UTF-16 indices; convert before building a
    /// token, or supply `loc`, which is used as is.
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// Position precomputed by the lexer, when it tracks locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<LineInfo>,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<String>, start: usize, end: usize) -> Self {
        Token {
            kind,
            value,
            start,
            end,
            loc: None,
        }
    }

    /// An identifier token whose value is its own spelling
    pub fn name(value: impl Into<String>, start: usize) -> Self {
        let value = value.into();
        let end = start + value.len();
        Token::new(TokenKind::Name, Some(value), start, end)
    }

    /// The end-of-stream marker at `offset`
    pub fn eof(offset: usize) -> Self {
        Token::new(TokenKind::Eof, None, offset, offset)
    }

    pub fn with_loc(mut self, line: u32, column: u32) -> Self {
        self.loc = Some(LineInfo { line, column });
        self
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
