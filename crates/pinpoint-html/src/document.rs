use ego_tree::NodeId as TreeId;
use pinpoint_common::{Dom, Mutation, NodeId, QueryError};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use tracing::debug;

/// Tags whose text never renders.
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "template", "noscript"];

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A parsed HTML document exposed through the `Dom` capability.
///
/// Every element present at parse time gets a stable `NodeId`. Detaching an
/// element keeps its handle valid (the node stays in the arena) but it is no
/// longer connected, so live queries stop returning it.
#[derive(Debug)]
pub struct HtmlDom {
    html: Html,
    nodes: Vec<TreeId>,
    index: HashMap<TreeId, NodeId>,
}

impl HtmlDom {
    /// Parse a full HTML document.
    pub fn parse_document(source: &str) -> Self {
        Self::from_html(Html::parse_document(source))
    }

    /// Parse an HTML fragment. Its elements hang under a synthetic `<html>` root.
    pub fn parse_fragment(source: &str) -> Self {
        Self::from_html(Html::parse_fragment(source))
    }

    fn from_html(html: Html) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for node in html.tree.root().descendants() {
            if node.value().is_element() {
                let id = NodeId(nodes.len() as u32);
                nodes.push(node.id());
                index.insert(node.id(), id);
            }
        }
        debug!("Indexed {} elements", nodes.len());
        Self { html, nodes, index }
    }

    /// Number of elements known to this document, connected or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All elements matching a CSS selector. Alias for `query_selector_all`.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, QueryError> {
        self.query_selector_all(selector)
    }

    /// First element matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeId>, QueryError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Detach an element (and its subtree) from the document.
    ///
    /// Returns the mutation record to forward to observers, or `None` if the
    /// handle is unknown.
    pub fn detach(&mut self, node: NodeId) -> Option<Mutation> {
        let tree_id = *self.nodes.get(node.index())?;
        let mut node_mut = self.html.tree.get_mut(tree_id)?;
        node_mut.detach();
        debug!("Detached {}", node);
        Some(Mutation::NodeRemoved(node))
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        let tree_id = self.nodes.get(node.index())?;
        self.html.tree.get(*tree_id).and_then(ElementRef::wrap)
    }

    fn lookup(&self, tree_id: TreeId) -> Option<NodeId> {
        self.index.get(&tree_id).copied()
    }

    fn connected_elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

impl Dom for HtmlDom {
    fn tag_name(&self, node: NodeId) -> Option<String> {
        // Foreign elements keep their case (`linearGradient`); type
        // selectors match them case-sensitively.
        self.element(node).map(|el| {
            let name = el.value().name();
            if &*el.value().name.ns == HTML_NAMESPACE {
                name.to_ascii_lowercase()
            } else {
                name.to_string()
            }
        })
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.value().attr(name).map(str::to_string)
    }

    fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        let Some(el) = self.element(node) else {
            return vec![];
        };
        let mut attrs: Vec<(String, String)> = el
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        attrs.sort();
        attrs
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let el = self.element(node)?;
        let parent = el.parent().and_then(ElementRef::wrap)?;
        self.lookup(parent.id())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(el) = self.element(node) else {
            return vec![];
        };
        el.children()
            .filter_map(ElementRef::wrap)
            .filter_map(|child| self.lookup(child.id()))
            .collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        let mut out = String::new();
        let mut stack: Vec<_> = el.children().collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            match current.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) if NON_RENDERED_TAGS.contains(&element.name()) => {}
                Node::Element(_) => {
                    let mut children: Vec<_> = current.children().collect();
                    children.reverse();
                    stack.extend(children);
                }
                _ => {}
            }
        }
        out
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.connected_elements()
            .find(|el| el.value().id() == Some(id))
            .and_then(|el| self.lookup(el.id()))
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let Some(el) = self.element(node) else {
            return false;
        };
        let root = self.html.tree.root().id();
        el.ancestors().last().is_some_and(|top| top.id() == root)
    }

    fn document_element(&self) -> Option<NodeId> {
        self.lookup(self.html.root_element().id())
    }

    fn is_svg(&self, node: NodeId) -> bool {
        self.element(node)
            .is_some_and(|el| &*el.value().name.ns == SVG_NAMESPACE)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, QueryError> {
        let parsed = Selector::parse(selector).map_err(|e| QueryError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self
            .connected_elements()
            .filter(|el| parsed.matches(el))
            .filter_map(|el| self.lookup(el.id()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexes_every_element() {
        let dom = HtmlDom::parse_document("<div><p>a</p><p>b</p></div>");
        // html, head, body, div, p, p
        assert_eq!(dom.len(), 6);
        assert_eq!(dom.tag_name(NodeId(0)).as_deref(), Some("html"));
        assert_eq!(dom.document_element(), Some(NodeId(0)));
    }

    #[test]
    fn test_unknown_handle_is_not_an_element() {
        let dom = HtmlDom::parse_fragment("<span></span>");
        assert_eq!(dom.tag_name(NodeId(999)), None);
        assert!(!dom.is_connected(NodeId(999)));
        assert!(dom.children(NodeId(999)).is_empty());
    }

    #[test]
    fn test_text_content_skips_scripts() {
        let dom = HtmlDom::parse_fragment(
            "<div id=\"t\">Hello <b>world</b><script>var x = 1;</script></div>",
        );
        let div = dom.element_by_id("t").unwrap();
        assert_eq!(dom.text_content(div), "Hello world");
    }
}
