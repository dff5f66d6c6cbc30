//! Mapping table construction and v3 serialization

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use sourcemap::{SourceMap, SourceMapBuilder};

use crate::error::{Result, SourceMapError};
use crate::types::Position;

/// One original-to-generated position correspondence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub original: Position,
    pub generated: Position,
    /// Source file the original position refers to
    pub source: String,
    /// Symbol name at this position, for identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mapping {
    /// A mapping whose original and generated positions coincide.
    pub fn identity(position: Position, source: impl Into<String>, name: Option<String>) -> Self {
        Mapping {
            original: position,
            generated: position,
            source: source.into(),
            name,
        }
    }
}

/// Accumulates mappings for one generated file
///
/// Sources and names are interned in first-seen order, which is the order
/// they get in the serialized `sources` and `names` arrays. Mappings keep
/// insertion order; finalizing stable-sorts them by generated position so
/// a map built from an out-of-order stream is still binary-searchable.
/// Every mapping is kept, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    file: Option<String>,
    sources: IndexSet<String>,
    names: IndexSet<String>,
    sources_content: IndexMap<String, String>,
    mappings: Vec<Mapping>,
}

impl MappingTable {
    /// Create an empty table for the generated file `file`
    pub fn new(file: impl Into<String>) -> Self {
        MappingTable {
            file: Some(file.into()),
            ..Default::default()
        }
    }

    /// Append a mapping, interning its source and name
    ///
    /// Rejects mappings the v3 format cannot express (line 0).
    pub fn add_mapping(&mut self, mapping: Mapping) -> Result<()> {
        if !mapping.original.is_valid() || !mapping.generated.is_valid() {
            return Err(SourceMapError::InvalidMapping {
                original: mapping.original,
                generated: mapping.generated,
            });
        }

        if !self.sources.contains(&mapping.source) {
            self.sources.insert(mapping.source.clone());
        }
        if let Some(name) = &mapping.name {
            if !self.names.contains(name) {
                self.names.insert(name.clone());
            }
        }

        self.mappings.push(mapping);
        Ok(())
    }

    /// Embed the original text of `source`
    ///
    /// A source with content is listed in `sources` even if no mapping
    /// refers to it, so an empty file still carries its text.
    pub fn set_source_content(&mut self, source: impl Into<String>, content: impl Into<String>) {
        let source = source.into();
        if !self.sources.contains(&source) {
            self.sources.insert(source.clone());
        }
        self.sources_content.insert(source, content.into());
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Finalize the table into a [`SourceMap`]
    ///
    /// Sources and names are registered with the builder up front so their
    /// indices follow first-seen order. Lines are 1-based here and 0-based
    /// in the builder.
    pub fn into_source_map(self) -> SourceMap {
        let mut builder = SourceMapBuilder::new(self.file.as_deref());

        for source in &self.sources {
            builder.add_source(source);
        }
        for name in &self.names {
            builder.add_name(name);
        }
        for (source, content) in &self.sources_content {
            if let Some(id) = self.sources.get_index_of(source) {
                builder.set_source_contents(id as u32, Some(content.as_str()));
            }
        }

        let mut ordered: Vec<&Mapping> = self.mappings.iter().collect();
        ordered.sort_by_key(|m| m.generated);

        for mapping in ordered {
            builder.add(
                mapping.generated.line - 1,
                mapping.generated.column,
                mapping.original.line - 1,
                mapping.original.column,
                Some(mapping.source.as_str()),
                mapping.name.as_deref(),
            );
        }

        builder.into_sourcemap()
    }

    /// Finalize and serialize to a JSON string
    pub fn to_json(self) -> Result<String> {
        let mut out = Vec::new();
        self.into_source_map().to_writer(&mut out)?;
        Ok(String::from_utf8(out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_map::{ParsedSourceMap, SourceMapJson};
    use proptest::prelude::*;

    fn named(line: u32, column: u32, name: &str) -> Mapping {
        Mapping::identity(Position::new(line, column), "a.js", Some(name.to_string()))
    }

    fn unnamed(line: u32, column: u32) -> Mapping {
        Mapping::identity(Position::new(line, column), "a.js", None)
    }

    fn serialize(table: MappingTable) -> SourceMapJson {
        SourceMapJson::from_json(&table.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_table() {
        let table = MappingTable::new("a.js");
        assert!(table.is_empty());

        let map = serialize(table);
        assert_eq!(map.version, 3);
        assert_eq!(map.file.as_deref(), Some("a.js"));
        assert!(map.sources.is_empty());
        assert!(map.names.is_empty());
        assert_eq!(map.mappings, "");
        assert!(map.sources_content.is_none());
    }

    #[test]
    fn test_single_line_encoding() {
        let mut table = MappingTable::new("a.js");
        table.add_mapping(unnamed(1, 0)).unwrap();
        table.add_mapping(unnamed(1, 7)).unwrap();
        table.add_mapping(named(1, 9, "x")).unwrap();

        let map = serialize(table);
        assert_eq!(map.mappings, "AAAA,OAAO,EAAEA");
        assert_eq!(map.names, vec!["x"]);
        assert_eq!(map.sources, vec!["a.js"]);
    }

    #[test]
    fn test_line_change_resets_generated_column() {
        let mut table = MappingTable::new("a.js");
        table.add_mapping(unnamed(1, 4)).unwrap();
        table.add_mapping(unnamed(3, 2)).unwrap();

        // Line 3 follows two ';' and its column delta starts from zero again;
        // the original column delta is 2 - 4 = -2
        assert_eq!(serialize(table).mappings, "IAAI;;EAEF");
    }

    #[test]
    fn test_names_are_interned_once() {
        let mut table = MappingTable::new("a.js");
        table.add_mapping(named(1, 0, "foo")).unwrap();
        table.add_mapping(named(1, 4, "bar")).unwrap();
        table.add_mapping(named(1, 8, "foo")).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        let map = serialize(table);
        assert_eq!(map.names, vec!["foo", "bar"]);
        // The third segment points back to name 0: delta -1
        assert_eq!(map.mappings, "AAAAA,IAAIC,IAAID");
    }

    #[test]
    fn test_out_of_order_mappings_are_sorted() {
        let mut table = MappingTable::new("a.js");
        table.add_mapping(unnamed(2, 0)).unwrap();
        table.add_mapping(unnamed(1, 0)).unwrap();

        assert_eq!(serialize(table).mappings, "AAAA;AACA");
    }

    #[test]
    fn test_duplicate_mappings_are_kept() {
        let mut table = MappingTable::new("a.js");
        table.add_mapping(unnamed(1, 3)).unwrap();
        table.add_mapping(unnamed(1, 3)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.into_source_map().get_token_count(), 2);
    }

    #[test]
    fn test_line_zero_is_rejected() {
        let mut table = MappingTable::new("a.js");
        let err = table.add_mapping(unnamed(0, 0)).unwrap_err();
        assert!(matches!(err, SourceMapError::InvalidMapping { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_source_content_aligned_with_sources() {
        let mut table = MappingTable::new("bundle.js");
        table
            .add_mapping(Mapping::identity(Position::new(1, 0), "a.js", None))
            .unwrap();
        table
            .add_mapping(Mapping::identity(Position::new(2, 0), "b.js", None))
            .unwrap();
        table.set_source_content("b.js", "b text");

        let map = table.into_source_map();
        assert_eq!(map.sources().collect::<Vec<_>>(), vec!["a.js", "b.js"]);
        assert_eq!(map.get_source_contents(0), None);
        assert_eq!(map.get_source_contents(1), Some("b text"));
    }

    #[test]
    fn test_content_registers_source() {
        let mut table = MappingTable::new("a.js");
        table.set_source_content("a.js", "");

        let map = serialize(table);
        assert_eq!(map.sources, vec!["a.js"]);
        assert_eq!(map.sources_content, Some(vec![Some(String::new())]));
    }

    proptest! {
        #[test]
        fn prop_identity_mappings_look_up_to_themselves(
            points in prop::collection::vec((1u32..6, 0u32..60), 1..30)
        ) {
            let mut table = MappingTable::new("p.js");
            for &(line, column) in &points {
                table.add_mapping(unnamed(line, column)).unwrap();
            }

            let parsed = ParsedSourceMap::from_json(&table.to_json().unwrap()).unwrap();
            for &(line, column) in &points {
                let found = parsed.original_position_for(Position::new(line, column)).unwrap();
                prop_assert_eq!(found.source, "p.js");
                prop_assert_eq!(found.position, Position::new(line, column));
            }
        }
    }
}
