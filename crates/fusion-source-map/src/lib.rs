//! Source maps for fusion
//!
//! This crate builds version 3 source maps: a [`MappingTable`] collects
//! original-to-generated [`Mapping`]s for one generated file and finalizes
//! them through the `sourcemap` crate's builder. A [`LineIndex`] turns byte
//! offsets into the 1-indexed line / UTF-16 column positions maps use,
//! [`SourceMapJson`] exposes the raw wire fields, and [`ParsedSourceMap`]
//! reads a map back for position lookups.
//!
//! # Example
//!
//! ```rust
//! use fusion_source_map::*;
//!
//! let source = "let a = 1;\nlet b = a;";
//! let index = LineIndex::new(source);
//!
//! let mut table = MappingTable::new("main.js");
//! let position = index.position(15).unwrap();
//! table.add_mapping(Mapping::identity(position, "main.js", Some("b".into()))).unwrap();
//! table.set_source_content("main.js", source);
//!
//! let map = table.into_source_map();
//! assert_eq!(map.sources().collect::<Vec<_>>(), vec!["main.js"]);
//! assert_eq!(map.names().collect::<Vec<_>>(), vec!["b"]);
//! ```

pub mod error;
pub mod line_index;
pub mod mapping;
pub mod source_map;
pub mod types;

// Re-export main types
pub use error::{Result, SourceMapError};
pub use line_index::LineIndex;
pub use mapping::{Mapping, MappingTable};
pub use source_map::{OriginalPosition, ParsedSourceMap, SourceMapJson};
pub use types::Position;
