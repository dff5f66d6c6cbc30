//! Error types for fusion-source-map

use thiserror::Error;

use crate::types::Position;

#[derive(Error, Debug)]
pub enum SourceMapError {
    /// A byte offset that is past the end of the text or splits a character.
    #[error("Invalid offset {offset} in source of length {length}")]
    InvalidOffset { offset: usize, length: usize },

    /// Line or column does not fit the map's 32-bit position space.
    #[error("Position at offset {offset} does not fit in a source map")]
    PositionOverflow { offset: usize },

    /// A mapping the v3 format cannot express (line 0, missing source).
    #[error("Invalid mapping: original {original}, generated {generated}")]
    InvalidMapping {
        original: Position,
        generated: Position,
    },

    /// Encoding or decoding failed inside the source map library.
    #[error("Source map error: {0}")]
    SourceMap(#[from] sourcemap::Error),

    #[error("Serialized source map is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Unsupported source map version {0}")]
    UnsupportedVersion(u32),

    #[error("Source map JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SourceMapError>;
