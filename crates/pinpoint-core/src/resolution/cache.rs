//! Per-node memoization for resolved selectors and extracted text.
//!
//! Entries are keyed by `NodeId` and stay valid until the host reports that
//! the node left the document. Attribute and text edits do not evict; callers
//! that need fresh results after such edits clear the cache explicitly.

use super::strategy::Resolution;
use pinpoint_common::{Dom, NodeId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct NodeCache<V> {
    entries: HashMap<NodeId, V>,
}

impl<V> Default for NodeCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> NodeCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&V> {
        self.entries.get(&node)
    }

    pub fn insert(&mut self, node: NodeId, value: V) {
        self.entries.insert(node, value);
    }

    pub fn get_or_insert_with(&mut self, node: NodeId, compute: impl FnOnce() -> V) -> &V {
        self.entries.entry(node).or_insert_with(compute)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn evict(&mut self, node: NodeId) -> Option<V> {
        self.entries.remove(&node)
    }

    /// Drop the entries of `node` and every element below it.
    ///
    /// Returns how many entries were removed.
    pub fn evict_subtree(&mut self, dom: &dyn Dom, node: NodeId) -> usize {
        dom.subtree(node)
            .into_iter()
            .filter(|&n| self.evict(n).is_some())
            .count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type SelectorCache = NodeCache<Resolution>;

/// Visible text per node; `None` records "no usable text".
pub type TextCache = NodeCache<Option<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_computes_once() {
        let mut cache: NodeCache<String> = NodeCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(NodeId(1), || {
                calls += 1;
                "value".to_string()
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.get(NodeId(1)).map(String::as_str), Some("value"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache: TextCache = NodeCache::new();
        cache.insert(NodeId(1), None);
        cache.insert(NodeId(2), Some("Save".into()));
        assert!(cache.contains(NodeId(1)));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evict_subtree() {
        use pinpoint_html::HtmlDom;

        let dom = HtmlDom::parse_fragment(r#"<div id="a"><p><b>x</b></p></div><span>y</span>"#);
        let div = dom.element_by_id("a").unwrap();
        let b = dom.select_first("b").unwrap().unwrap();
        let span = dom.select_first("span").unwrap().unwrap();

        let mut cache: NodeCache<u32> = NodeCache::new();
        cache.insert(div, 1);
        cache.insert(b, 2);
        cache.insert(span, 3);

        assert_eq!(cache.evict_subtree(&dom, div), 2);
        assert!(!cache.contains(b));
        assert_eq!(cache.evict(span), Some(3));
        assert!(cache.is_empty());
    }
}
