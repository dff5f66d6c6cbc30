/*
 * token_mapper.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Build a file's source map from its original token stream.
 */

//! Token-driven source maps.
//!
//! The import rewrite swaps whole statements for statements of the same
//! role and never moves the surrounding code, so each token maps onto
//! itself. Positions come from the immutable original token stream, never
//! from the (possibly rewritten) tree.

use fusion_ast::{Token, TokenKind};
use fusion_source_map::{LineIndex, Mapping, MappingTable, Position};

use crate::Result;

/// Build the mapping table for `file_path` from its tokens.
///
/// Iteration stops at the first end-of-stream token; anything after it is
/// ignored. Tokens that carry a lexer-computed location use it directly,
/// the rest are resolved against `source_text` through a line index built
/// once per call.
pub fn build_mapping_table<'t>(
    source_text: &str,
    file_path: &str,
    tokens: impl IntoIterator<Item = &'t Token>,
) -> Result<MappingTable> {
    let index = LineIndex::new(source_text);
    let mut table = MappingTable::new(file_path);

    for token in tokens {
        if token.is_eof() {
            break;
        }

        let position = match token.loc {
            Some(loc) => Position::new(loc.line, loc.column),
            None => index.position(token.start)?,
        };

        let name = match token.kind {
            TokenKind::Name => token.value.clone(),
            _ => None,
        };

        table.add_mapping(Mapping::identity(position, file_path, name))?;
    }

    table.set_source_content(file_path, source_text);

    tracing::debug!(
        file = file_path,
        mappings = table.len(),
        names = table.names().count(),
        "Built source map"
    );

    Ok(table)
}

/// Build and serialize the version 3 source map for `file_path`.
pub fn build_source_map<'t>(
    source_text: &str,
    file_path: &str,
    tokens: impl IntoIterator<Item = &'t Token>,
) -> Result<String> {
    let table = build_mapping_table(source_text, file_path, tokens)?;
    Ok(table.to_json()?)
}
