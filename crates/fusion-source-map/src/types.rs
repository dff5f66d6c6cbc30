//! Core types for source mapping

use serde::{Deserialize, Serialize};

/// A position in source text as source maps address it.
///
/// Lines are 1-indexed and columns are 0-indexed, counted in UTF-16 code
/// units. This matches what JavaScript lexers report and what debuggers
/// expect when they read a version 3 map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (0-indexed, UTF-16 code units)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// A position is representable in a map only if its line is at least 1.
    pub fn is_valid(&self) -> bool {
        self.line >= 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
