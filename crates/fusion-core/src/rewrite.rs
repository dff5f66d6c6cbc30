/*
 * rewrite.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Replace ES import declarations with the loader's lowered form.
 */

//! Import declaration rewriting.
//!
//! An import declaration whose module specifier is a string literal is
//! handed to an [`ImportLowering`] together with its imported names, and the
//! replacement it returns takes over the declaration's arena slot. Anything
//! else is left exactly as parsed and reported as [`NotApplicable`].
//!
//! Lowering and substitution are separate steps: [`lower_import`] only reads
//! the tree, and [`PendingRewrite::apply`] writes the result. A caller that
//! rewrites several imports can lower all of them before touching the tree.

use fusion_ast::{Ast, ImportSpecifier, Node, NodeId, Replacement, quote};

use crate::{FusionError, Result};

/// Produces the replacement for one import declaration.
///
/// Receives the imported names in declaration order and the module
/// specifier. Returning `None` is a contract violation that aborts the
/// file's transform.
pub trait ImportLowering: Send + Sync {
    fn lower(&self, names: &[String], module: &str) -> Option<Replacement>;
}

impl<F> ImportLowering for F
where
    F: Fn(&[String], &str) -> Option<Replacement> + Send + Sync,
{
    fn lower(&self, names: &[String], module: &str) -> Option<Replacement> {
        self(names, module)
    }
}

/// Lowers imports to CommonJS `require` calls.
///
/// `import { a, b } from "m"` becomes `const { a, b } = require("m");` and a
/// declaration that binds nothing becomes `require("m");`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireLowering;

impl ImportLowering for RequireLowering {
    fn lower(&self, names: &[String], module: &str) -> Option<Replacement> {
        let call = format!("require({})", quote(module));
        if names.is_empty() {
            return Some(Replacement::new("ExpressionStatement", format!("{call};")));
        }
        Some(Replacement::new(
            "VariableDeclaration",
            format!("const {{ {} }} = {call};", names.join(", ")),
        ))
    }
}

/// Why an import was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotApplicable {
    /// The node is not an import declaration
    NotAnImport,
    /// The module specifier is computed rather than a string literal
    NonLiteralSource,
    /// A default or namespace binding, which has no imported name to lower
    UnsupportedSpecifier { local: String },
    /// `imported as local`, which the lowering's name list cannot express
    AliasedSpecifier { imported: String, local: String },
}

impl std::fmt::Display for NotApplicable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotApplicable::NotAnImport => write!(f, "not an import declaration"),
            NotApplicable::NonLiteralSource => write!(f, "module specifier is not a string literal"),
            NotApplicable::UnsupportedSpecifier { local } => {
                write!(f, "specifier `{local}` has no imported name")
            }
            NotApplicable::AliasedSpecifier { imported, local } => {
                write!(f, "specifier `{imported}` is bound as `{local}`")
            }
        }
    }
}

/// Result of one [`rewrite_import`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Rewritten { names: Vec<String>, module: String },
    NotApplicable(NotApplicable),
}

impl RewriteOutcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, RewriteOutcome::Rewritten { .. })
    }
}

/// Imported names of every specifier, or the first one that cannot be lowered.
///
/// The lowering only receives imported names, so a specifier is usable when
/// it binds its imported name under the same local name.
fn imported_names(specifiers: &[ImportSpecifier]) -> std::result::Result<Vec<String>, NotApplicable> {
    specifiers
        .iter()
        .map(|specifier| match specifier.imported() {
            Some(imported) if imported == specifier.local() => Ok(imported.to_string()),
            Some(imported) => Err(NotApplicable::AliasedSpecifier {
                imported: imported.to_string(),
                local: specifier.local().to_string(),
            }),
            None => Err(NotApplicable::UnsupportedSpecifier {
                local: specifier.local().to_string(),
            }),
        })
        .collect()
}

/// An import that has been lowered but not yet written into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRewrite {
    pub id: NodeId,
    pub names: Vec<String>,
    pub module: String,
    pub replacement: Replacement,
}

impl PendingRewrite {
    /// Write the replacement into the declaration's slot.
    ///
    /// The slot keeps its position in the parent's body, its parent link and
    /// its original span.
    pub fn apply(self, ast: &mut Ast) -> RewriteOutcome {
        tracing::debug!(
            node = %self.id,
            module = %self.module,
            names = self.names.len(),
            replacement = %self.replacement.kind,
            "Rewrote import"
        );
        ast.replace(self.id, Node::Replacement(self.replacement));

        RewriteOutcome::Rewritten {
            names: self.names,
            module: self.module,
        }
    }
}

/// Result of [`lower_import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lowered {
    Ready(PendingRewrite),
    NotApplicable(NotApplicable),
}

/// Lower the import declaration at `id` without modifying the tree.
pub fn lower_import(ast: &Ast, id: NodeId, lowering: &dyn ImportLowering) -> Result<Lowered> {
    let node = ast.node(id).ok_or(FusionError::UnknownNode(id))?;

    let Node::ImportDeclaration { specifiers, source } = node else {
        return Ok(Lowered::NotApplicable(NotApplicable::NotAnImport));
    };

    let Some(Node::StringLiteral { value: module }) = ast.node(*source) else {
        tracing::debug!(node = %id, "Skipping import with non-literal specifier");
        return Ok(Lowered::NotApplicable(NotApplicable::NonLiteralSource));
    };

    let names = match imported_names(specifiers) {
        Ok(names) => names,
        Err(reason) => {
            tracing::debug!(node = %id, module = %module, %reason, "Skipping import");
            return Ok(Lowered::NotApplicable(reason));
        }
    };

    let replacement = lowering
        .lower(&names, module)
        .ok_or_else(|| FusionError::LoweringContractViolation {
            module: module.clone(),
        })?;

    Ok(Lowered::Ready(PendingRewrite {
        id,
        names,
        module: module.clone(),
        replacement,
    }))
}

/// Rewrite the import declaration at `id` using `lowering`.
///
/// The replacement is written into the declaration's own slot, so its
/// position in the parent's body, its parent link and its original span are
/// unchanged. Token positions are never read from the tree, so a source map
/// built before or after the rewrite is the same.
pub fn rewrite_import(
    ast: &mut Ast,
    id: NodeId,
    lowering: &dyn ImportLowering,
) -> Result<RewriteOutcome> {
    match lower_import(ast, id, lowering)? {
        Lowered::Ready(rewrite) => Ok(rewrite.apply(ast)),
        Lowered::NotApplicable(reason) => Ok(RewriteOutcome::NotApplicable(reason)),
    }
}
