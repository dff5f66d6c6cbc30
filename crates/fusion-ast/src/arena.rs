/*
 * arena.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Arena-backed syntax tree with slot replacement.
 */

//! Arena-backed syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Parent
//! links are stored beside each node, so there are no back-pointers or
//! reference cycles. Replacing a node swaps the contents of its slot: the id,
//! the parent link and the original span survive, so every other id held by
//! the caller (or by a walk in progress) stays valid.

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId, Span};

/// One arena slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub node: Node,
    /// Where the node sits in the original text
    pub span: Option<Span>,
    pub parent: Option<NodeId>,
}

/// A parse tree for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Ast {
    /// Create a tree holding an empty `Program` root without a span.
    pub fn new() -> Self {
        Ast {
            nodes: vec![NodeData {
                node: Node::Program { body: Vec::new() },
                span: None,
                parent: None,
            }],
            root: NodeId(0),
        }
    }

    /// Create a tree whose `Program` root covers all of `source`.
    pub fn for_source(source: &str) -> Self {
        let mut ast = Ast::new();
        ast.nodes[0].span = Some(Span::new(0, source.len()));
        ast
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node to the arena and return its id.
    ///
    /// Children referenced by `node` must already be allocated (build
    /// bottom-up); they are linked to the new node as their parent.
    pub fn alloc(&mut self, node: Node, span: Option<Span>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let children = node.children();
        self.nodes.push(NodeData {
            node,
            span,
            parent: None,
        });
        self.link_children(id, &children);
        id
    }

    /// Append a statement to the root `Program` body.
    pub fn push_statement(&mut self, statement: NodeId) {
        let root = self.root;
        if let Some(NodeData {
            node: Node::Program { body },
            ..
        }) = self.nodes.get_mut(root.0)
        {
            body.push(statement);
        }
        self.link_children(root, &[statement]);
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).map(|data| &data.node)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes.get(id.0).and_then(|data| data.span)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|data| data.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    /// Replace the contents of slot `id` with `node`, returning the old node.
    ///
    /// The slot keeps its id, parent link and span. The old node's children
    /// are detached (their parent link is cleared) and the new node's
    /// children are attached. Returns `None` if `id` is not in the arena.
    pub fn replace(&mut self, id: NodeId, node: Node) -> Option<Node> {
        let new_children = node.children();
        let slot = self.nodes.get_mut(id.0)?;
        let old = std::mem::replace(&mut slot.node, node);

        for child in old.children() {
            if let Some(data) = self.nodes.get_mut(child.0) {
                if data.parent == Some(id) {
                    data.parent = None;
                }
            }
        }
        self.link_children(id, &new_children);

        Some(old)
    }

    /// Pre-order walk from the root, yielding `(node, parent)`.
    ///
    /// Only nodes reachable from the root are visited; detached subtrees
    /// left behind by [`Ast::replace`] are skipped.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            ast: self,
            stack: vec![(self.root, None)],
        }
    }

    /// Ids of every reachable import declaration, in source order.
    pub fn import_declarations(&self) -> Vec<NodeId> {
        self.walk()
            .filter(|(id, _)| self.node(*id).is_some_and(Node::is_import_declaration))
            .map(|(id, _)| id)
            .collect()
    }

    fn link_children(&mut self, parent: NodeId, children: &[NodeId]) {
        for child in children {
            if let Some(data) = self.nodes.get_mut(child.0) {
                data.parent = Some(parent);
            }
        }
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`Ast::walk`].
pub struct Walk<'a> {
    ast: &'a Ast,
    stack: Vec<(NodeId, Option<NodeId>)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, Option<NodeId>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, parent) = self.stack.pop()?;
        let children = self.ast.children(id);
        // Reverse so the first child is popped first
        self.stack
            .extend(children.into_iter().rev().map(|child| (child, Some(id))));
        Some((id, parent))
    }
}
