//! Element inspection helpers for capture payloads.
//!
//! These complement the resolver with plain descriptions of an element:
//! a `querySelector`-compatible selector, selected attributes and a short
//! ancestor path.

pub mod simplify;

pub use simplify::simplify_dom;

use crate::css::to_css_selector;
use crate::resolution::SelectorResolver;
use crate::resolution::identity::{attribute_selector, escape_css_ident};
use crate::resolution::strategy::nth_of_type;
use pinpoint_common::protocol::ElementSnapshot;
use pinpoint_common::{Dom, NodeId};
use std::collections::BTreeMap;

/// Attributes reported by default.
pub const BASIC_ATTRS: &[&str] = &["id", "class", "name", "type"];

const QUERY_TEST_ATTRS: &[&str] = &["data-testid", "data-test-id", "data-test", "data-id"];

/// Plain CSS selector for `document.querySelector` consumers.
///
/// Prefers `#id`, then a test attribute, then `tag.classes` with
/// `:nth-of-type(n)` when same-tag siblings exist. Unlike the resolver this
/// does not verify uniqueness.
pub fn query_selector(dom: &dyn Dom, node: NodeId) -> String {
    let Some(tag) = dom.tag_name(node) else {
        return String::new();
    };

    if let Some(id) = dom.attribute(node, "id").filter(|id| !id.is_empty()) {
        return format!("#{}", escape_css_ident(&id));
    }

    for attr in QUERY_TEST_ATTRS {
        if let Some(value) = dom.attribute(node, attr).filter(|v| !v.is_empty()) {
            return attribute_selector(attr, &value);
        }
    }

    let mut selector = tag.clone();
    if let Some(class_attr) = dom.attribute(node, "class") {
        for class in class_attr.split_whitespace() {
            selector.push('.');
            selector.push_str(&escape_css_ident(class));
        }
    }
    if let Some(index) = nth_of_type(dom, node, &tag) {
        selector.push_str(&format!(":nth-of-type({})", index));
    }
    selector
}

/// The non-empty attributes named in `keys`, plus every `data-*` attribute.
pub fn attributes(dom: &dyn Dom, node: NodeId, keys: &[&str]) -> BTreeMap<String, String> {
    dom.attributes(node)
        .into_iter()
        .filter(|(name, value)| {
            name.starts_with("data-") || (keys.contains(&name.as_str()) && !value.is_empty())
        })
        .collect()
}

/// `tag#id.class > ...` from below `<body>` down to `node`.
///
/// Only the nearest three levels unless `full` is set.
pub fn ancestor_hierarchy(dom: &dyn Dom, node: NodeId, full: bool) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node);

    while let Some(el) = current {
        let Some(tag) = dom.tag_name(el) else {
            break;
        };
        if tag == "body" || tag == "html" {
            break;
        }

        let mut part = tag;
        if let Some(id) = dom.attribute(el, "id").filter(|id| !id.is_empty()) {
            part.push('#');
            part.push_str(&id);
        }
        if let Some(class_attr) = dom.attribute(el, "class") {
            let classes: Vec<&str> = class_attr.split_whitespace().collect();
            if !classes.is_empty() {
                part.push('.');
                part.push_str(&classes.join("."));
            }
        }
        parts.push(part);

        if !full && parts.len() >= 3 {
            break;
        }
        current = dom.parent(el);
    }

    parts.reverse();
    parts.join(" > ")
}

/// Everything a capture payload records about `node`.
pub fn snapshot(
    resolver: &mut SelectorResolver,
    dom: &dyn Dom,
    node: NodeId,
) -> Option<ElementSnapshot> {
    let tag = dom.tag_name(node)?;
    let selector = resolver.resolve(dom, node);

    Some(ElementSnapshot {
        tag,
        css_selector: to_css_selector(&selector),
        selector,
        query_selector: query_selector(dom, node),
        attributes: attributes(dom, node, BASIC_ATTRS),
        text: resolver.visible_text(dom, node),
        hierarchy: ancestor_hierarchy(dom, node, false),
    })
}
