//! Compact DOM trees for LLM context.
//!
//! Walks a subtree and keeps only what helps a model reason about the page:
//! tags, identifying attributes, labels and short text. Noisy and hidden
//! elements are pruned, tables and long lists are summarised.

use crate::config::SimplifyConfig;
use pinpoint_common::protocol::SimplifiedNode;
use pinpoint_common::{Dom, NodeId};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const NOISY_TAGS: &[&str] = &[
    "script", "style", "meta", "link", "noscript", "iframe", "svg", "canvas", "head", "title",
    "object", "embed",
];

static KEY_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(id|class|role|name|type|data-|aria-)").unwrap());

const MAX_TEXT_CHARS: usize = 120;
const LIST_SUMMARY_THRESHOLD: usize = 10;
const LIST_PREVIEW_ITEMS: usize = 3;

/// Simplify the subtree rooted at `root`.
///
/// Returns `None` when `root` itself is pruned (noisy, hidden or not an
/// element).
pub fn simplify_dom(
    dom: &dyn Dom,
    root: NodeId,
    options: &SimplifyConfig,
) -> Option<SimplifiedNode> {
    walk(dom, root, 0, options)
}

fn walk(
    dom: &dyn Dom,
    node: NodeId,
    depth: usize,
    options: &SimplifyConfig,
) -> Option<SimplifiedNode> {
    if depth > options.max_depth {
        return None;
    }
    let tag = dom.tag_name(node)?;
    if NOISY_TAGS.contains(&tag.as_str()) || !is_visible(dom, node) {
        return None;
    }

    let children = dom.children(node);
    match tag.as_str() {
        "table" => return Some(summarize_table(dom, node)),
        "ul" | "ol" if children.len() > LIST_SUMMARY_THRESHOLD => {
            return Some(summarize_list(dom, node, &tag));
        }
        _ => {}
    }

    let mut out = leaf(dom, node, tag);
    out.label = ["aria-label", "alt", "title"]
        .iter()
        .find_map(|attr| dom.attribute(node, attr).filter(|v| !v.is_empty()));
    out.children = children
        .into_iter()
        .filter_map(|child| walk(dom, child, depth + 1, options))
        .take(options.max_children)
        .collect();
    Some(out)
}

fn leaf(dom: &dyn Dom, node: NodeId, tag: String) -> SimplifiedNode {
    SimplifiedNode {
        attrs: key_attrs(dom, node),
        text: short_text(dom, node),
        ..SimplifiedNode::new(tag)
    }
}

/// Hidden via the `hidden` attribute (self or ancestor), `aria-hidden`, or
/// an inline style. Stylesheet rules are not evaluated.
fn is_visible(dom: &dyn Dom, node: NodeId) -> bool {
    if dom.attribute(node, "aria-hidden").as_deref() == Some("true") {
        return false;
    }
    if let Some(style) = dom.attribute(node, "style")
        && hidden_by_style(&style)
    {
        return false;
    }
    std::iter::once(node)
        .chain(dom.ancestors(node))
        .all(|el| dom.attribute(el, "hidden").is_none())
}

fn hidden_by_style(style: &str) -> bool {
    style.split(';').any(|declaration| {
        let Some((property, value)) = declaration.split_once(':') else {
            return false;
        };
        let value = value.trim().trim_end_matches("!important").trim();
        match property.trim().to_ascii_lowercase().as_str() {
            "display" => value.eq_ignore_ascii_case("none"),
            "visibility" => value.eq_ignore_ascii_case("hidden"),
            "opacity" => value.parse::<f32>().is_ok_and(|o| o == 0.0),
            _ => false,
        }
    })
}

fn key_attrs(dom: &dyn Dom, node: NodeId) -> BTreeMap<String, String> {
    dom.attributes(node)
        .into_iter()
        .filter(|(name, _)| KEY_ATTR.is_match(name))
        .collect()
}

/// Trimmed text, cut to 117 characters plus `...` beyond 120.
fn short_text(dom: &dyn Dom, node: NodeId) -> Option<String> {
    let text = dom.text_content(node);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        let cut: String = text.chars().take(MAX_TEXT_CHARS - 3).collect();
        return Some(format!("{}...", cut));
    }
    Some(text.to_string())
}

/// First row plus row and column counts.
fn summarize_table(dom: &dyn Dom, table: NodeId) -> SimplifiedNode {
    let rows = table_rows(dom, table);
    let first_cells: Vec<NodeId> = rows
        .first()
        .map(|&row| {
            dom.children(row)
                .into_iter()
                .filter(|&c| matches!(dom.tag_name(c).as_deref(), Some("td" | "th")))
                .collect()
        })
        .unwrap_or_default();

    let mut out = SimplifiedNode {
        attrs: key_attrs(dom, table),
        row_count: Some(rows.len()),
        col_count: Some(first_cells.len()),
        ..SimplifiedNode::new("table")
    };
    if !rows.is_empty() {
        out.first_row = Some(
            first_cells
                .into_iter()
                .filter_map(|cell| dom.tag_name(cell).map(|tag| leaf(dom, cell, tag)))
                .collect(),
        );
    }
    out
}

/// `tr` elements belonging to `table`, skipping nested tables.
fn table_rows(dom: &dyn Dom, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    let mut stack: Vec<NodeId> = dom.children(table).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        match dom.tag_name(node).as_deref() {
            Some("tr") => rows.push(node),
            Some("thead" | "tbody" | "tfoot") => {
                stack.extend(dom.children(node).into_iter().rev());
            }
            _ => {}
        }
    }
    rows
}

/// First three `li` items plus the count of the rest.
fn summarize_list(dom: &dyn Dom, list: NodeId, tag: &str) -> SimplifiedNode {
    let items: Vec<NodeId> = dom
        .children(list)
        .into_iter()
        .filter(|&c| dom.tag_name(c).as_deref() == Some("li"))
        .collect();

    SimplifiedNode {
        attrs: key_attrs(dom, list),
        items: Some(
            items
                .iter()
                .take(LIST_PREVIEW_ITEMS)
                .map(|&li| leaf(dom, li, "li".to_string()))
                .collect(),
        ),
        more_items: (items.len() > LIST_PREVIEW_ITEMS).then(|| items.len() - LIST_PREVIEW_ITEMS),
        ..SimplifiedNode::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_by_style() {
        assert!(hidden_by_style("display: none"));
        assert!(hidden_by_style("color: red; visibility:HIDDEN"));
        assert!(hidden_by_style("opacity: 0 !important"));
        assert!(!hidden_by_style("opacity: 0.5"));
        assert!(!hidden_by_style("display: flex"));
        assert!(!hidden_by_style(""));
    }
}
