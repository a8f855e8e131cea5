//! The selector strategy chain.
//!
//! Strategies run from the most semantically stable identifier to the most
//! brittle; the first one that produces a selector wins. The structural CSS
//! fallback always produces something.

use super::identity::{
    attribute_selector, class_selector, escape_css_ident, meaningful_classes,
    meaningful_id_selector, quote_value,
};
use super::role::{ROLES_MEANINGFUL_WITHOUT_NAME, accessible_name, effective_role};
use super::text::{is_text_tag, is_within_limit};
use super::uniqueness::{
    Uniqueness, ensure_unique_selector, log_query_error, validate_and_enhance_selector, verify,
};
use crate::config::ResolverConfig;
use pinpoint_common::{Dom, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which strategy produced a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    TestAttribute,
    RoleName,
    VisibleText,
    FormAttribute,
    MeaningfulId,
    StructuralCss,
}

/// A resolved selector and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub selector: String,
    pub strategy: Strategy,
}

/// Everything a strategy may look at.
pub(crate) struct StrategyContext<'a> {
    pub dom: &'a dyn Dom,
    pub node: NodeId,
    pub tag: &'a str,
    /// Cached visible text of `node`
    pub text: Option<&'a str>,
    pub config: &'a ResolverConfig,
}

type StrategyFn = fn(&StrategyContext<'_>) -> Option<String>;

const CHAIN: [(Strategy, StrategyFn); 5] = [
    (Strategy::TestAttribute, test_attribute),
    (Strategy::RoleName, role_and_name),
    (Strategy::VisibleText, visible_text),
    (Strategy::FormAttribute, form_attribute),
    (Strategy::MeaningfulId, meaningful_id),
];

pub(crate) fn run_chain(ctx: &StrategyContext<'_>) -> Resolution {
    for (strategy, apply) in CHAIN {
        if let Some(selector) = apply(ctx) {
            debug!("{:?} resolved {} to '{}'", strategy, ctx.node, selector);
            return Resolution { selector, strategy };
        }
    }

    let selector = structural_css(ctx);
    debug!("StructuralCss resolved {} to '{}'", ctx.node, selector);
    Resolution {
        selector,
        strategy: Strategy::StructuralCss,
    }
}

/// `[data-testid="..."]` and friends.
pub(crate) fn test_attribute(ctx: &StrategyContext<'_>) -> Option<String> {
    ctx.config.test_attributes.iter().find_map(|attr| {
        let value = ctx.dom.attribute(ctx.node, attr)?;
        (!value.trim().is_empty()).then(|| attribute_selector(attr, &value))
    })
}

/// `role=ROLE[name="NAME"]`, or bare `role=ROLE` for landmarks.
pub(crate) fn role_and_name(ctx: &StrategyContext<'_>) -> Option<String> {
    let role = effective_role(ctx.dom, ctx.node)?;

    match accessible_name(ctx.dom, ctx.node, ctx.text, ctx.config.max_text_length) {
        Some(name) if name.chars().count() <= ctx.config.max_name_length => {
            Some(format!("role={}[name=\"{}\"]", role, quote_value(&name)))
        }
        Some(name) => {
            // A truncated name would never match the element's real name.
            debug!(
                "Skipping role strategy for {}: name has {} characters",
                ctx.node,
                name.chars().count()
            );
            None
        }
        None if ROLES_MEANINGFUL_WITHOUT_NAME.contains(&role.as_str()) => {
            Some(format!("role={}", role))
        }
        None => None,
    }
}

/// `text="..."` for text-carrying tags.
pub(crate) fn visible_text(ctx: &StrategyContext<'_>) -> Option<String> {
    if !is_text_tag(ctx.tag) {
        return None;
    }
    let text = ctx
        .text
        .filter(|text| is_within_limit(text, ctx.config.max_text_length))?;
    Some(format!("text=\"{}\"", quote_value(text)))
}

/// `name`, then `id`, then `placeholder` for form controls.
pub(crate) fn form_attribute(ctx: &StrategyContext<'_>) -> Option<String> {
    if !matches!(ctx.tag, "input" | "select" | "textarea" | "button") {
        return None;
    }

    // Values are emitted untrimmed; attribute matching is exact.
    let non_empty = |attr: &str| {
        ctx.dom
            .attribute(ctx.node, attr)
            .filter(|v| !v.trim().is_empty())
    };

    if let Some(name) = non_empty("name") {
        return Some(attribute_selector("name", &name));
    }
    if let Some(id) = non_empty("id") {
        return Some(format!("#{}", escape_css_ident(&id)));
    }
    non_empty("placeholder").map(|placeholder| attribute_selector("placeholder", &placeholder))
}

/// `#id` for hand-written ids, disambiguated if the id is duplicated.
pub(crate) fn meaningful_id(ctx: &StrategyContext<'_>) -> Option<String> {
    let selector = meaningful_id_selector(ctx.dom, ctx.node, &ctx.config.meaningful_id_prefixes)?;
    Some(ensure_unique_selector(ctx.dom, &selector, ctx.node, ctx.config))
}

/// Tag, classes, one important attribute and `:nth-of-type`, scoped by an
/// ancestor when the element has no usable classes.
pub(crate) fn structural_css(ctx: &StrategyContext<'_>) -> String {
    let class_attr = ctx.dom.attribute(ctx.node, "class").unwrap_or_default();
    let classes = meaningful_classes(&class_attr);

    let mut selector = ctx.tag.to_string();
    for class in &classes {
        selector.push('.');
        selector.push_str(&escape_css_ident(class));
    }

    let important = ctx.config.important_attributes.iter().find_map(|attr| {
        ctx.dom
            .attribute(ctx.node, attr)
            .filter(|v| !v.trim().is_empty())
            .map(|v| (attr, v))
    });
    if let Some((attr, value)) = important {
        selector.push_str(&attribute_selector(attr, &value));
    }

    if let Some(index) = nth_of_type(ctx.dom, ctx.node, ctx.tag) {
        selector.push_str(&format!(":nth-of-type({})", index));
    }

    if classes.is_empty()
        && let Some(scoped) = scope_by_ancestor(ctx)
    {
        return scoped;
    }

    validate_and_enhance_selector(ctx.dom, &selector, ctx.node, ctx.config)
}

/// 1-based index among same-tag siblings, only when there is more than one.
pub(crate) fn nth_of_type(dom: &dyn Dom, node: NodeId, tag: &str) -> Option<usize> {
    let parent = dom.parent(node)?;
    let same_tag: Vec<NodeId> = dom
        .children(parent)
        .into_iter()
        .filter(|&sibling| dom.tag_name(sibling).as_deref() == Some(tag))
        .collect();
    if same_tag.len() < 2 {
        return None;
    }
    same_tag.iter().position(|&s| s == node).map(|i| i + 1)
}

/// Walk up to `max_ancestor_depth` ancestors looking for one with a
/// meaningful id or class whose `ANCESTOR > ... > tag` path is unique.
fn scope_by_ancestor(ctx: &StrategyContext<'_>) -> Option<String> {
    if !ctx.dom.is_connected(ctx.node) {
        return None;
    }

    let mut path = vec![ctx.tag.to_string()];
    let mut current = ctx.node;
    for _ in 0..ctx.config.max_ancestor_depth {
        let parent = ctx.dom.parent(current)?;
        let anchor =
            meaningful_id_selector(ctx.dom, parent, &ctx.config.meaningful_id_prefixes)
                .or_else(|| class_selector(ctx.dom, parent));

        if let Some(anchor) = anchor {
            let candidate = format!("{} > {}", anchor, path.join(" > "));
            match verify(ctx.dom, &candidate, ctx.node) {
                Ok(Uniqueness::Unique) => return Some(candidate),
                Ok(_) => {}
                Err(e) => {
                    log_query_error(&e, &candidate);
                    return None;
                }
            }
        }

        path.insert(0, ctx.dom.tag_name(parent)?);
        current = parent;
    }
    None
}
