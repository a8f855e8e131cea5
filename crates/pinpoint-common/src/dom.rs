//! DOM Capability Abstraction
//!
//! This module defines the read-only view of a document that the selector
//! resolver works against. The resolver never walks a concrete tree type; it
//! asks a `Dom` for tags, attributes, structure and, crucially, for live
//! `query_selector_all` results to verify that a candidate selector is unique.
//!
//! Implementations:
//! - `pinpoint-html`: a parsed HTML document with a real CSS selector engine
//! - Tests: wrappers that inject query failures or mutate answers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to an element owned by a `Dom`.
///
/// Handles are arena indices assigned by the `Dom` implementation. They stay
/// valid for the lifetime of the document, including after the element is
/// detached, so caches can be keyed by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Errors a live selector query can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The selector engine rejected the syntax
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The query crossed an origin boundary (e.g. into a cross-origin frame)
    #[error("Cross-origin access denied: {0}")]
    CrossOrigin(String),
}

/// A DOM change reported by the host, the analog of a mutation observer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "node", rename_all = "snake_case")]
pub enum Mutation {
    /// The node (and its subtree) was removed from the document
    NodeRemoved(NodeId),
    /// One of the node's attributes changed
    AttributesChanged(NodeId),
    /// The node's children were added or removed
    ChildListChanged(NodeId),
}

/// Read-only access to a document plus its selector engine.
///
/// All structural methods speak about *elements* only: `parent` returns the
/// parent element, `children` the element children in document order. Unknown
/// handles answer `None` / empty rather than panicking.
pub trait Dom {
    /// Tag name (lowercase for HTML elements), or `None` if `node` is not an
    /// element of this document.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    /// Value of the attribute `name`, if present (even when empty).
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// All attributes, sorted by name.
    fn attributes(&self, node: NodeId) -> Vec<(String, String)>;

    /// Parent element, `None` for the root element and detached subtree roots.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Concatenated text of all descendant text nodes, excluding script and style content.
    fn text_content(&self, node: NodeId) -> String;

    /// First connected element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Whether the node is attached to the document tree.
    fn is_connected(&self, node: NodeId) -> bool;

    /// The document's root element (`<html>` for full documents).
    fn document_element(&self) -> Option<NodeId>;

    /// All connected elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, QueryError>;

    /// Whether the node lives in the SVG namespace.
    fn is_svg(&self, node: NodeId) -> bool {
        matches!(
            self.tag_name(node).as_deref(),
            Some(
                "svg"
                    | "path"
                    | "g"
                    | "circle"
                    | "rect"
                    | "line"
                    | "polyline"
                    | "polygon"
                    | "ellipse"
                    | "use"
                    | "symbol"
                    | "defs"
                    | "text"
                    | "tspan"
            )
        )
    }

    /// Element ancestors, nearest first.
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            out.push(parent);
            current = self.parent(parent);
        }
        out
    }

    /// The node followed by all element descendants, in document order.
    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            let children = self.children(current);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// 1-based position among element siblings, `None` without a parent.
    fn sibling_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent)
            .iter()
            .position(|&c| c == node)
            .map(|i| i + 1)
    }
}
