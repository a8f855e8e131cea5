//! Playwright locator generation.
//!
//! Where the resolver picks the single best selector, the generator offers
//! every plausible locator for an element, most stable first, so a test
//! author can choose. Strategies that need the live DOM (uniqueness, `.nth`,
//! `.first()`) query it through the same `Dom` capability.

use super::command::{
    Action, ActionOptions, Assertion, build_action_command, build_assertion_command, quote,
};
use crate::config::LocatorConfig;
use crate::resolution::SelectorResolver;
use crate::resolution::identity::{attribute_selector, class_selector, meaningful_id_selector};
use crate::resolution::role::effective_role;
use crate::resolution::text::normalize_text;
use crate::resolution::uniqueness::{ensure_unique_selector, log_query_error};
use pinpoint_common::{Dom, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Ordered locator list without duplicates.
#[derive(Debug, Default)]
struct Locators {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl Locators {
    fn push(&mut self, locator: String) {
        if self.seen.insert(locator.clone()) {
            self.items.push(locator);
        }
    }

    fn push_css(&mut self, selector: &str) {
        self.push(format!("page.locator({})", quote(selector)));
    }
}

pub struct LocatorGenerator {
    config: LocatorConfig,
}

impl Default for LocatorGenerator {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}

impl LocatorGenerator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// All locators for `node`, most stable first.
    ///
    /// `exclude_text` drops the `getByText` variant (used for `toHaveText`
    /// assertions). Returns an empty list when `node` is not an element.
    pub fn generate_locators(
        &self,
        resolver: &mut SelectorResolver,
        dom: &dyn Dom,
        node: NodeId,
        exclude_text: bool,
    ) -> Vec<String> {
        let Some(tag) = dom.tag_name(node) else {
            return Vec::new();
        };
        let resolver_config = resolver.config().clone();
        let mut locators = Locators::default();

        // Test attributes
        if let Some(value) = resolver_config.test_attributes.iter().find_map(|attr| {
            dom.attribute(node, attr)
                .filter(|v| !v.trim().is_empty())
        }) {
            locators.push(format!("page.getByTestId({})", quote(&value)));
        }

        let visible_text = resolver
            .visible_text(dom, node)
            .filter(|text| text.chars().count() <= self.config.max_text_length);

        // Role and name
        if let Some(role) = effective_role(dom, node)
            && let Some(name) = self
                .accessible_name(dom, node)
                .or_else(|| visible_text.clone())
        {
            locators.push(format!(
                "page.getByRole({}, {{ name: {} }})",
                quote(&role),
                quote(&name)
            ));
        }

        // Icon inside a clickable container
        if dom.is_svg(node)
            && let Some(parent) = dom.parent(node)
            && is_clickable(dom, parent)
            && let Some(classes) = class_selector(dom, parent)
        {
            locators.push_css(&ensure_unique_selector(
                dom,
                &classes,
                parent,
                &resolver_config,
            ));
        }

        if !exclude_text && let Some(text) = &visible_text {
            locators.push(format!("page.getByText({}, {{ exact: true }})", quote(text)));
        }

        if let Some(id) = meaningful_id_selector(dom, node, &resolver_config.meaningful_id_prefixes)
        {
            locators.push_css(&id);
        }

        if matches!(tag.as_str(), "input" | "textarea" | "select")
            && let Some(name) = dom.attribute(node, "name").filter(|n| !n.is_empty())
        {
            locators.push_css(&attribute_selector("name", &name));
        }

        // Scope by a classed ancestor for icons and class-less elements
        if (dom.is_svg(node) || class_selector(dom, node).is_none())
            && let Some((parent, parent_selector)) = parent_with_classes(
                dom,
                node,
                resolver_config.max_ancestor_depth,
                &resolver_config.meaningful_id_prefixes,
            )
        {
            let mut variants = vec![format!("{} > {}", parent_selector, tag)];
            if dom.is_svg(node) {
                let svg_path = svg_path(dom, node, parent);
                if svg_path.len() > 1 {
                    variants.push(format!("{} > {}", parent_selector, svg_path.join(" > ")));
                }
            }
            for variant in variants {
                locators.push_css(&ensure_unique_selector(
                    dom,
                    &variant,
                    node,
                    &resolver_config,
                ));
            }
        }

        let css = resolver.structural_selector(dom, node);
        if !css.is_empty() {
            locators.push_css(&css);
        }

        // Document index among same-tag elements
        let same_tag = query(dom, &tag);
        if same_tag.len() > 1
            && let Some(index) = same_tag.iter().position(|&n| n == node)
            && index <= self.config.max_nth_index
        {
            locators.push(format!("page.locator({}).nth({})", quote(&tag), index));
        }

        let css_matches = if css.is_empty() {
            Vec::new()
        } else {
            query(dom, &css)
        };
        if css_matches.len() > 1 {
            if css_matches.first() == Some(&node) {
                locators.push(format!("page.locator({}).first()", quote(&css)));
            }
            if let Some(parent) = dom.parent(node)
                && let Some(parent_selector) =
                    parent_selector(dom, parent, &resolver_config.meaningful_id_prefixes)
            {
                locators.push_css(&format!("{} > {}", parent_selector, tag));
            }
        }

        debug!(
            "Generated {} locator(s) for {}",
            locators.items.len(),
            node
        );
        locators.items
    }

    /// One `await <locator>.<action>(...)` statement per locator.
    pub fn generate_commands(
        &self,
        resolver: &mut SelectorResolver,
        dom: &dyn Dom,
        node: NodeId,
        action: &Action,
        options: &ActionOptions,
    ) -> Vec<String> {
        self.generate_locators(resolver, dom, node, false)
            .iter()
            .map(|locator| build_action_command(locator, action, options))
            .collect()
    }

    /// One `await expect(<locator>)...` statement per locator.
    pub fn generate_assertions(
        &self,
        resolver: &mut SelectorResolver,
        dom: &dyn Dom,
        node: NodeId,
        assertion: &Assertion,
    ) -> Vec<String> {
        self.generate_locators(resolver, dom, node, assertion.excludes_text_locator())
            .iter()
            .map(|locator| build_assertion_command(locator, assertion))
            .collect()
    }

    /// Accessible name for `getByRole`: ARIA attributes, the labelledby
    /// target, then an associated `<label>` for form controls.
    fn accessible_name(&self, dom: &dyn Dom, node: NodeId) -> Option<String> {
        let limit = |value: String| {
            normalize_text(&value).filter(|v| v.chars().count() <= self.config.max_text_length)
        };

        for attr in ["aria-label", "title", "alt"] {
            if let Some(value) = dom.attribute(node, attr).and_then(limit) {
                return Some(value);
            }
        }

        if let Some(label) = dom
            .attribute(node, "aria-labelledby")
            .and_then(|ids| {
                ids.split_whitespace()
                    .next()
                    .and_then(|id| dom.element_by_id(id))
            })
            .and_then(|label| limit(dom.text_content(label)))
        {
            return Some(label);
        }

        let tag = dom.tag_name(node)?;
        if matches!(tag.as_str(), "input" | "textarea" | "select") {
            return associated_label(dom, node).and_then(|label| limit(dom.text_content(label)));
        }
        None
    }
}

/// `<label for=id>` first, then a wrapping `<label>`.
fn associated_label(dom: &dyn Dom, node: NodeId) -> Option<NodeId> {
    if let Some(id) = dom.attribute(node, "id").filter(|id| !id.trim().is_empty()) {
        let selector = format!("label{}", attribute_selector("for", &id));
        if let Some(&label) = query(dom, &selector).first() {
            return Some(label);
        }
    }
    dom.ancestors(node)
        .into_iter()
        .find(|&a| dom.tag_name(a).as_deref() == Some("label"))
}

fn is_clickable(dom: &dyn Dom, node: NodeId) -> bool {
    dom.tag_name(node).as_deref() == Some("button")
        || dom.attribute(node, "role").as_deref() == Some("button")
        || dom.attribute(node, "onclick").is_some()
}

/// Nearest ancestor (within `max_levels`) with meaningful classes, as
/// `#id` when it also has a meaningful id, else its class selector.
fn parent_with_classes(
    dom: &dyn Dom,
    node: NodeId,
    max_levels: usize,
    prefixes: &[String],
) -> Option<(NodeId, String)> {
    dom.ancestors(node)
        .into_iter()
        .take(max_levels)
        .find_map(|parent| {
            let classes = class_selector(dom, parent)?;
            let selector = meaningful_id_selector(dom, parent, prefixes).unwrap_or(classes);
            Some((parent, selector))
        })
}

/// SVG tag names from `stop` (exclusive) down to `node`.
fn svg_path(dom: &dyn Dom, node: NodeId, stop: NodeId) -> Vec<String> {
    let mut path: Vec<String> = std::iter::once(node)
        .chain(dom.ancestors(node))
        .take_while(|&n| n != stop)
        .filter(|&n| dom.is_svg(n))
        .filter_map(|n| dom.tag_name(n))
        .collect();
    path.reverse();
    path
}

/// Parent selector for chaining: meaningful id, `data-testid`, classes, role.
fn parent_selector(dom: &dyn Dom, parent: NodeId, prefixes: &[String]) -> Option<String> {
    meaningful_id_selector(dom, parent, prefixes)
        .or_else(|| {
            dom.attribute(parent, "data-testid")
                .map(|v| attribute_selector("data-testid", &v))
        })
        .or_else(|| class_selector(dom, parent))
        .or_else(|| {
            dom.attribute(parent, "role")
                .map(|v| attribute_selector("role", &v))
        })
}

fn query(dom: &dyn Dom, selector: &str) -> Vec<NodeId> {
    dom.query_selector_all(selector).unwrap_or_else(|e| {
        log_query_error(&e, selector);
        Vec::new()
    })
}
