use super::cache::{SelectorCache, TextCache};
use super::strategy::{Resolution, StrategyContext, run_chain, structural_css};
use super::text::extract_visible_text;
use crate::config::ResolverConfig;
use pinpoint_common::{Dom, Mutation, NodeId};
use tracing::{debug, trace};

/// Cache occupancy, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub selectors: usize,
    pub texts: usize,
}

/// Resolves elements to stable locator strings.
///
/// One resolver serves one document: cached entries are keyed by the
/// document's `NodeId`s and are only evicted when [`observe`] is told a node
/// was removed.
///
/// [`observe`]: SelectorResolver::observe
#[derive(Debug, Default)]
pub struct SelectorResolver {
    config: ResolverConfig,
    selectors: SelectorCache,
    texts: TextCache,
}

impl SelectorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Best selector for `node`, or `""` when `node` is not an element of `dom`.
    pub fn resolve(&mut self, dom: &dyn Dom, node: NodeId) -> String {
        self.resolve_detailed(dom, node)
            .map(|resolution| resolution.selector)
            .unwrap_or_default()
    }

    /// Like [`resolve`](Self::resolve), also reporting which strategy won.
    pub fn resolve_detailed(&mut self, dom: &dyn Dom, node: NodeId) -> Option<Resolution> {
        let Some(tag) = dom.tag_name(node) else {
            debug!("{} is not an element; nothing to resolve", node);
            return None;
        };

        if let Some(cached) = self.selectors.get(node) {
            trace!("Selector cache hit for {}", node);
            return Some(cached.clone());
        }

        let text = self.visible_text(dom, node);
        let ctx = StrategyContext {
            dom,
            node,
            tag: &tag,
            text: text.as_deref(),
            config: &self.config,
        };
        let resolution = run_chain(&ctx);

        self.selectors.insert(node, resolution.clone());
        Some(resolution)
    }

    /// Whitespace-normalized text of `node`, cached.
    pub fn visible_text(&mut self, dom: &dyn Dom, node: NodeId) -> Option<String> {
        if let Some(cached) = self.texts.get(node) {
            trace!("Text cache hit for {}", node);
            return cached.clone();
        }
        self.texts
            .get_or_insert_with(node, || extract_visible_text(dom, node))
            .clone()
    }

    /// The structural CSS selector for `node`, skipping the semantic
    /// strategies. Always plain CSS; not cached.
    pub fn structural_selector(&mut self, dom: &dyn Dom, node: NodeId) -> String {
        let Some(tag) = dom.tag_name(node) else {
            return String::new();
        };
        let text = self.visible_text(dom, node);
        let ctx = StrategyContext {
            dom,
            node,
            tag: &tag,
            text: text.as_deref(),
            config: &self.config,
        };
        structural_css(&ctx)
    }

    /// Apply a DOM change reported by the host.
    ///
    /// Removal evicts the node and its subtree. Attribute and child-list
    /// changes leave cached entries in place, so they may go stale.
    pub fn observe(&mut self, dom: &dyn Dom, mutation: &Mutation) {
        match *mutation {
            Mutation::NodeRemoved(node) => {
                let selectors = self.selectors.evict_subtree(dom, node);
                let texts = self.texts.evict_subtree(dom, node);
                debug!(
                    "Evicted {} selector(s) and {} text entr(ies) under removed {}",
                    selectors, texts, node
                );
            }
            Mutation::AttributesChanged(node) | Mutation::ChildListChanged(node) => {
                trace!("Ignoring {:?} for {}", mutation, node);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selectors.clear();
        self.texts.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            selectors: self.selectors.len(),
            texts: self.texts.len(),
        }
    }
}
