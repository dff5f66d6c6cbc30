/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Token and syntax tree types for the fusion import transform.
 *
 * Lexing and parsing happen outside this workspace; the parser hands over
 * a token stream and an arena-backed tree built from these types. The
 * tree is closed over the shapes the transform distinguishes and keeps
 * everything else as opaque nodes.
 */

pub mod arena;
pub mod node;
pub mod regenerate;
pub mod token;

// Re-export commonly used types at the crate root
pub use arena::{Ast, NodeData, Walk};
pub use node::{ImportSpecifier, Node, NodeId, Replacement, Span};
pub use regenerate::{quote, regenerate};
pub use token::{LineInfo, Token, TokenKind};
