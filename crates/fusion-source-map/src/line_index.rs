//! Line index for offset-to-position lookups

use crate::error::{Result, SourceMapError};
use crate::types::Position;

/// Line break index over a source text
///
/// Built with one scan of the text; afterwards each byte offset is resolved
/// to a [`Position`] by binary search over the line starts, so mapping a
/// whole token stream never re-scans the file.
///
/// Line terminators are the ECMAScript ones: `\n`, `\r`, `\r\n` (a single
/// break), U+2028 and U+2029.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,

    /// Byte offset at which each line begins; always starts with 0
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Index the line breaks of `source`
    ///
    /// # Example
    ///
    /// ```
    /// use fusion_source_map::LineIndex;
    ///
    /// let index = LineIndex::new("line 1\nline 2\nline 3");
    /// assert_eq!(index.line_count(), 3);
    /// ```
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\r' => match chars.peek() {
                    Some(&(next, '\n')) => {
                        chars.next();
                        line_starts.push(next + 1);
                    }
                    _ => line_starts.push(idx + 1),
                },
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(idx + ch.len_utf8()),
                _ => {}
            }
        }

        LineIndex {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-indexed line and a UTF-16 column
    ///
    /// Fails if the offset is past the end of the source or does not fall on
    /// a character boundary.
    ///
    /// # Example
    ///
    /// ```
    /// use fusion_source_map::{LineIndex, Position};
    ///
    /// let index = LineIndex::new("hello\nworld");
    /// assert_eq!(index.position(6).unwrap(), Position::new(2, 0));
    /// ```
    pub fn position(&self, offset: usize) -> Result<Position> {
        if offset > self.source.len() || !self.source.is_char_boundary(offset) {
            return Err(SourceMapError::InvalidOffset {
                offset,
                length: self.source.len(),
            });
        }

        // A terminator belongs to the line it ends, so only starts at or
        // before the offset count
        let row = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[row];

        let column = self.source[line_start..offset].encode_utf16().count();

        let line = u32::try_from(row + 1).map_err(|_| SourceMapError::PositionOverflow { offset })?;
        let column = u32::try_from(column).map_err(|_| SourceMapError::PositionOverflow { offset })?;

        Ok(Position { line, column })
    }

    /// Get the total length of the source in bytes
    pub fn total_length(&self) -> usize {
        self.source.len()
    }

    /// Get the number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.total_length(), 0);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(0).unwrap(), Position::new(1, 0));
    }

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("hello world");
        assert_eq!(index.line_count(), 1);

        assert_eq!(index.position(0).unwrap(), Position::new(1, 0));
        assert_eq!(index.position(6).unwrap(), Position::new(1, 6));
        assert_eq!(index.position(11).unwrap(), Position::new(1, 11));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("line 1\nline 2\nline 3");
        assert_eq!(index.line_count(), 3);

        assert_eq!(index.position(0).unwrap(), Position::new(1, 0));
        // Offset 6 is the first '\n'
        assert_eq!(index.position(6).unwrap(), Position::new(1, 6));
        assert_eq!(index.position(7).unwrap(), Position::new(2, 0));
        assert_eq!(index.position(13).unwrap(), Position::new(2, 6));
        assert_eq!(index.position(14).unwrap(), Position::new(3, 0));
        assert_eq!(index.position(20).unwrap(), Position::new(3, 6));
    }

    #[test]
    fn test_out_of_bounds() {
        let index = LineIndex::new("hello");
        let err = index.position(100).unwrap_err();
        assert!(matches!(
            err,
            SourceMapError::InvalidOffset {
                offset: 100,
                length: 5
            }
        ));
    }

    #[test]
    fn test_columns_count_utf16_units() {
        // 'é' is 2 bytes in UTF-8 but 1 UTF-16 unit; '😀' is 4 bytes and 2 units
        let source = "é😀x\nb";
        let index = LineIndex::new(source);

        assert_eq!(index.position(2).unwrap(), Position::new(1, 1));
        assert_eq!(index.position(6).unwrap(), Position::new(1, 3));
        assert_eq!(index.position(8).unwrap(), Position::new(2, 0));
    }

    #[test]
    fn test_offset_inside_character() {
        let index = LineIndex::new("café");
        // Byte 4 is the second byte of 'é'
        assert!(matches!(
            index.position(4),
            Err(SourceMapError::InvalidOffset { offset: 4, .. })
        ));
    }

    #[test]
    fn test_source_ending_with_newline() {
        let index = LineIndex::new("line 1\nline 2\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(13).unwrap(), Position::new(2, 6));
        assert_eq!(index.position(14).unwrap(), Position::new(3, 0));
    }

    #[test]
    fn test_consecutive_newlines() {
        let index = LineIndex::new("a\n\n\nb");
        assert_eq!(index.line_count(), 4);

        assert_eq!(index.position(1).unwrap(), Position::new(1, 1));
        assert_eq!(index.position(2).unwrap(), Position::new(2, 0));
        assert_eq!(index.position(3).unwrap(), Position::new(3, 0));
        assert_eq!(index.position(4).unwrap(), Position::new(4, 0));
    }

    #[test]
    fn test_carriage_return_breaks_line() {
        let index = LineIndex::new("a\rb");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.position(1).unwrap(), Position::new(1, 1));
        assert_eq!(index.position(2).unwrap(), Position::new(2, 0));
    }

    #[test]
    fn test_crlf_is_one_break() {
        let index = LineIndex::new("a\r\nb\r\n\r\nc");
        assert_eq!(index.line_count(), 4);
        // Both halves of the pair stay on the line they end
        assert_eq!(index.position(1).unwrap(), Position::new(1, 1));
        assert_eq!(index.position(2).unwrap(), Position::new(1, 2));
        assert_eq!(index.position(3).unwrap(), Position::new(2, 0));
        assert_eq!(index.position(6).unwrap(), Position::new(3, 0));
        assert_eq!(index.position(8).unwrap(), Position::new(4, 0));
    }

    #[test]
    fn test_unicode_line_separators() {
        // U+2028 and U+2029 are 3 bytes in UTF-8
        let index = LineIndex::new("a\u{2028}b\u{2029}c");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(1).unwrap(), Position::new(1, 1));
        assert_eq!(index.position(4).unwrap(), Position::new(2, 0));
        assert_eq!(index.position(5).unwrap(), Position::new(2, 1));
        assert_eq!(index.position(8).unwrap(), Position::new(3, 0));
    }

    #[test]
    fn test_mixed_terminators() {
        let index = LineIndex::new("a\nb\rc\r\nd\u{2028}e");
        assert_eq!(index.line_count(), 5);
        assert_eq!(index.position(4).unwrap(), Position::new(3, 0));
        assert_eq!(index.position(7).unwrap(), Position::new(4, 0));
        assert_eq!(index.position(11).unwrap(), Position::new(5, 0));
    }
}
