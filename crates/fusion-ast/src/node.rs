/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Syntax node variants stored in the arena.
 */

use serde::{Deserialize, Serialize};

/// Index of a node slot in an [`crate::Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Byte range of a node in the original source text (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One binding of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ImportSpecifier {
    /// `{ imported }` or `{ imported as local }`
    Named { imported: String, local: String },
    /// `import local from "..."`
    Default { local: String },
    /// `import * as local from "..."`
    Namespace { local: String },
}

impl ImportSpecifier {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        ImportSpecifier::Named {
            imported: name.clone(),
            local: name,
        }
    }

    /// The exported name this specifier binds, if it names one.
    pub fn imported(&self) -> Option<&str> {
        match self {
            ImportSpecifier::Named { imported, .. } => Some(imported),
            ImportSpecifier::Default { .. } | ImportSpecifier::Namespace { .. } => None,
        }
    }

    pub fn local(&self) -> &str {
        match self {
            ImportSpecifier::Named { local, .. }
            | ImportSpecifier::Default { local }
            | ImportSpecifier::Namespace { local } => local,
        }
    }
}

/// A subtree built outside the parser to stand in for another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Syntactic kind of the replacement (e.g. `VariableDeclaration`)
    pub kind: String,
    /// Source text the replacement regenerates to
    pub code: String,
}

impl Replacement {
    pub fn new(kind: impl Into<String>, code: impl Into<String>) -> Self {
        Replacement {
            kind: kind.into(),
            code: code.into(),
        }
    }
}

/// The syntactic shapes the import transform distinguishes.
///
/// Everything the transform does not look into is `Opaque`: it keeps its
/// kind name and its children so walks and regeneration still see the
/// whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Program {
        body: Vec<NodeId>,
    },
    ImportDeclaration {
        specifiers: Vec<ImportSpecifier>,
        source: NodeId,
    },
    StringLiteral {
        value: String,
    },
    Identifier {
        name: String,
    },
    Replacement(Replacement),
    Opaque {
        kind: String,
        children: Vec<NodeId>,
    },
}

impl Node {
    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Program { body } => body.clone(),
            Node::ImportDeclaration { source, .. } => vec![*source],
            Node::Opaque { children, .. } => children.clone(),
            Node::StringLiteral { .. } | Node::Identifier { .. } | Node::Replacement(_) => {
                Vec::new()
            }
        }
    }

    /// ESTree-style type name, used in logs.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Program { .. } => "Program",
            Node::ImportDeclaration { .. } => "ImportDeclaration",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::Identifier { .. } => "Identifier",
            Node::Replacement(replacement) => &replacement.kind,
            Node::Opaque { kind, .. } => kind,
        }
    }

    pub fn is_import_declaration(&self) -> bool {
        matches!(self, Node::ImportDeclaration { .. })
    }
}
