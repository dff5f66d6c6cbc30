/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Per-file transform: rewrite imports, then map the original tokens.
 */

//! Per-file transform driver.
//!
//! One call processes one file:
//!
//! 1. Walk the tree in pre-order and lower every import declaration.
//! 2. Build the file's source map from the original token stream.
//! 3. Write the lowered replacements into the tree.
//!
//! The tree is only modified once every lowering and the map succeeded; a
//! failure aborts the file and leaves the tree exactly as parsed.

use fusion_ast::{Ast, NodeId, Token};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::rewrite::{ImportLowering, Lowered, NotApplicable, lower_import};
use crate::token_mapper::build_source_map;

/// A loaded source file as handed over by the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Bundler-relative path, used as the map's source identifier
    pub path: String,
    /// Full original text
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        SourceFile {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Where a file's tree stands within one transform pass.
///
/// `Parsed` moves to `RegenerationRequired` on the first substitution and
/// stays there; a pass that ends still `Parsed` finishes as `Unchanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformState {
    Parsed,
    RegenerationRequired,
    Unchanged,
}

impl TransformState {
    pub fn record_substitution(&mut self) {
        *self = TransformState::RegenerationRequired;
    }

    pub fn finish(self) -> Self {
        match self {
            TransformState::Parsed => TransformState::Unchanged,
            other => other,
        }
    }

    /// Whether the tree must be turned back into text before use.
    pub fn requires_regeneration(&self) -> bool {
        matches!(self, TransformState::RegenerationRequired)
    }
}

/// Everything one file's transform produces besides the mutated tree.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Serialized version 3 source map
    pub source_map: String,
    pub state: TransformState,
    /// Import declarations that now hold a replacement
    pub rewritten: Vec<NodeId>,
    /// Import declarations left as parsed, with the reason
    pub skipped: Vec<(NodeId, NotApplicable)>,
}

impl TransformResult {
    pub fn requires_regeneration(&self) -> bool {
        self.state.requires_regeneration()
    }
}

/// Rewrite the imports of `ast` and build the source map of `file`.
pub fn transform_file(
    file: &SourceFile,
    tokens: &[Token],
    ast: &mut Ast,
    lowering: &dyn ImportLowering,
) -> Result<TransformResult> {
    let mut state = TransformState::Parsed;
    let mut pending = Vec::new();
    let mut skipped = Vec::new();

    // Collect first: replacing a declaration detaches its subtree
    for id in ast.import_declarations() {
        match lower_import(ast, id, lowering)? {
            Lowered::Ready(rewrite) => pending.push(rewrite),
            Lowered::NotApplicable(reason) => skipped.push((id, reason)),
        }
    }

    let source_map = build_source_map(&file.contents, &file.path, tokens)?;

    let mut rewritten = Vec::with_capacity(pending.len());
    for rewrite in pending {
        rewritten.push(rewrite.id);
        rewrite.apply(ast);
        state.record_substitution();
    }
    let state = state.finish();

    tracing::debug!(
        file = %file.path,
        rewritten = rewritten.len(),
        skipped = skipped.len(),
        state = ?state,
        "Transformed file"
    );

    Ok(TransformResult {
        source_map,
        state,
        rewritten,
        skipped,
    })
}
