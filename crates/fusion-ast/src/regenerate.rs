/*
 * regenerate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Turn a (possibly rewritten) tree back into source text.
 */

//! Source regeneration.
//!
//! Untouched nodes are copied verbatim from the original text, so comments
//! and formatting inside them survive. A node with a span is emitted as its
//! original text with each spanned child spliced in at the child's own
//! span; replacements emit their `code` in place of the span they took over.
//! Nodes without a span are printed from their fields.

use crate::arena::Ast;
use crate::node::{ImportSpecifier, Node, NodeId, Span};

/// Regenerate the text of the whole tree against its original `source`.
pub fn regenerate(ast: &Ast, source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    emit(ast, source, ast.root(), &mut out);
    out
}

fn slice(source: &str, start: usize, end: usize) -> &str {
    source.get(start..end).unwrap_or_default()
}

fn emit(ast: &Ast, source: &str, id: NodeId, out: &mut String) {
    let Some(data) = ast.get(id) else {
        return;
    };

    match (&data.node, data.span) {
        (Node::Replacement(replacement), _) => out.push_str(&replacement.code),
        (_, Some(span)) => emit_spliced(ast, source, &data.node, span, out),
        (node, None) => emit_synthesized(ast, source, node, out),
    }
}

fn emit_spliced(ast: &Ast, source: &str, node: &Node, span: Span, out: &mut String) {
    let mut children: Vec<(NodeId, Span)> = node
        .children()
        .into_iter()
        .filter_map(|child| {
            let child_span = ast.span(child)?;
            (child_span.start >= span.start && child_span.end <= span.end)
                .then_some((child, child_span))
        })
        .collect();
    children.sort_by_key(|(_, child_span)| child_span.start);

    let mut cursor = span.start;
    for (child, child_span) in children {
        if child_span.start < cursor {
            // Overlapping spans; the earlier child already covered this text
            continue;
        }
        out.push_str(slice(source, cursor, child_span.start));
        emit(ast, source, child, out);
        cursor = child_span.end;
    }
    out.push_str(slice(source, cursor, span.end));
}

fn emit_synthesized(ast: &Ast, source: &str, node: &Node, out: &mut String) {
    match node {
        Node::Program { body } => {
            for (index, statement) in body.iter().enumerate() {
                if index > 0 {
                    out.push('\n');
                }
                emit(ast, source, *statement, out);
            }
        }
        Node::Opaque { children, .. } => {
            for child in children {
                emit(ast, source, *child, out);
            }
        }
        Node::Identifier { name } => out.push_str(name),
        Node::StringLiteral { value } => out.push_str(&quote(value)),
        Node::ImportDeclaration { specifiers, source: module } => {
            out.push_str("import ");
            out.push_str(&format_specifiers(specifiers));
            out.push_str(" from ");
            emit(ast, source, *module, out);
            out.push(';');
        }
        Node::Replacement(replacement) => out.push_str(&replacement.code),
    }
}

fn format_specifiers(specifiers: &[ImportSpecifier]) -> String {
    let mut default = None;
    let mut namespace = None;
    let mut named = Vec::new();

    for specifier in specifiers {
        match specifier {
            ImportSpecifier::Default { local } => default = Some(local.as_str()),
            ImportSpecifier::Namespace { local } => namespace = Some(local.as_str()),
            ImportSpecifier::Named { imported, local } if imported == local => {
                named.push(imported.clone())
            }
            ImportSpecifier::Named { imported, local } => {
                named.push(format!("{imported} as {local}"))
            }
        }
    }

    let mut parts = Vec::new();
    if let Some(default) = default {
        parts.push(default.to_string());
    }
    if let Some(namespace) = namespace {
        parts.push(format!("* as {namespace}"));
    }
    if !named.is_empty() || parts.is_empty() {
        parts.push(format!("{{ {} }}", named.join(", ")));
    }
    parts.join(", ")
}

/// Quote a string as a JavaScript double-quoted literal.
///
/// JSON string syntax is a subset of JavaScript string syntax.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
