//! The version 3 interchange format and position lookup

use serde::Deserialize;
use sourcemap::SourceMap;

use crate::error::{Result, SourceMapError};
use crate::types::Position;

/// The raw fields of a version 3 source map as it appears on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapJson {
    pub version: u32,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub source_root: Option<String>,
    pub sources: Vec<String>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
    #[serde(default)]
    pub sources_content: Option<Vec<Option<String>>>,
}

impl SourceMapJson {
    /// Parse a serialized map, rejecting anything but version 3
    pub fn from_json(json: &str) -> Result<Self> {
        let map: SourceMapJson = serde_json::from_str(json)?;
        if map.version != 3 {
            return Err(SourceMapError::UnsupportedVersion(map.version));
        }
        Ok(map)
    }

    /// Embedded content for `source`, if the map carries it
    pub fn source_content(&self, source: &str) -> Option<&str> {
        let index = self.sources.iter().position(|s| s == source)?;
        self.sources_content
            .as_ref()?
            .get(index)?
            .as_deref()
    }
}

/// Where a generated position came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition<'a> {
    pub source: &'a str,
    pub position: Position,
    pub name: Option<&'a str>,
}

/// A decoded source map, ready for lookups
#[derive(Debug, Clone)]
pub struct ParsedSourceMap {
    map: SourceMap,
}

impl ParsedSourceMap {
    pub fn new(map: SourceMap) -> Self {
        ParsedSourceMap { map }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(SourceMap::from_reader(json.as_bytes())?))
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.map
    }

    /// Generated position of every mapping, in stored order
    pub fn generated_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.map
            .tokens()
            .map(|token| Position::new(token.get_dst_line() + 1, token.get_dst_col()))
    }

    /// Find the original position for a generated one
    ///
    /// Picks the closest mapping at or before `generated` on the same line,
    /// the way debuggers resolve a breakpoint column. Mappings without a
    /// source resolve to nothing.
    pub fn original_position_for(&self, generated: Position) -> Option<OriginalPosition<'_>> {
        if !generated.is_valid() {
            return None;
        }
        let line = generated.line - 1;

        let token = self.map.lookup_token(line, generated.column)?;
        if token.get_dst_line() != line {
            return None;
        }

        Some(OriginalPosition {
            source: token.get_source()?,
            position: Position::new(token.get_src_line() + 1, token.get_src_col()),
            name: token.get_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "version": 3,
            "file": "a.js",
            "sources": ["a.js"],
            "names": ["x", "y"],
            "mappings": "AAAA,OAAO,EAAEA;AACT,EAAEC",
            "sourcesContent": ["import x;\ny"]
        }"#
    }

    #[test]
    fn test_parse_and_field_names() {
        let map = SourceMapJson::from_json(sample_json()).unwrap();
        assert_eq!(map.version, 3);
        assert_eq!(map.file.as_deref(), Some("a.js"));
        assert_eq!(map.source_content("a.js"), Some("import x;\ny"));
        assert_eq!(map.source_content("b.js"), None);
    }

    #[test]
    fn test_camel_case_fields_are_read() {
        let map = SourceMapJson::from_json(
            r#"{"version":3,"sourceRoot":"/src/","sources":["a.js"],"mappings":"AAAA"}"#,
        )
        .unwrap();
        assert_eq!(map.source_root.as_deref(), Some("/src/"));
        assert!(map.names.is_empty());
        assert!(map.sources_content.is_none());
    }

    #[test]
    fn test_rejects_other_versions() {
        let err = SourceMapJson::from_json(r#"{"version":2,"sources":[],"mappings":""}"#)
            .unwrap_err();
        assert!(matches!(err, SourceMapError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SourceMapJson::from_json("{"),
            Err(SourceMapError::Json(_))
        ));
    }

    #[test]
    fn test_lookup_exact_and_between_segments() {
        let parsed = ParsedSourceMap::from_json(sample_json()).unwrap();

        let exact = parsed.original_position_for(Position::new(1, 9)).unwrap();
        assert_eq!(exact.source, "a.js");
        assert_eq!(exact.position, Position::new(1, 9));
        assert_eq!(exact.name, Some("x"));

        // Column 8 falls after the segment at column 7
        let between = parsed.original_position_for(Position::new(1, 8)).unwrap();
        assert_eq!(between.position, Position::new(1, 7));
        assert_eq!(between.name, None);

        let second_line = parsed.original_position_for(Position::new(2, 2)).unwrap();
        assert_eq!(second_line.position, Position::new(2, 2));
        assert_eq!(second_line.name, Some("y"));
    }

    #[test]
    fn test_parsed_map_rejects_malformed_json() {
        assert!(matches!(
            ParsedSourceMap::from_json("{"),
            Err(SourceMapError::SourceMap(_))
        ));
    }

    #[test]
    fn test_generated_positions_are_one_based() {
        let parsed = ParsedSourceMap::from_json(sample_json()).unwrap();
        let positions: Vec<_> = parsed.generated_positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(1, 0),
                Position::new(1, 7),
                Position::new(1, 9),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_lookup_misses() {
        let parsed = ParsedSourceMap::from_json(sample_json()).unwrap();
        assert!(parsed.original_position_for(Position::new(0, 0)).is_none());
        assert!(parsed.original_position_for(Position::new(5, 0)).is_none());
    }
}
