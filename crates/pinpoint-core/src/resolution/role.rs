//! ARIA role and accessible name computation.

use super::text::{is_within_limit, normalize_text};
use pinpoint_common::{Dom, NodeId};

/// Roles that identify a landmark even without a name.
pub const ROLES_MEANINGFUL_WITHOUT_NAME: &[&str] = &[
    "navigation",
    "main",
    "complementary",
    "banner",
    "contentinfo",
    "form",
    "search",
];

/// An entry of the implicit role table.
#[derive(Clone, Copy)]
pub enum ImplicitRole {
    /// The tag always maps to this role
    Fixed(&'static str),
    /// The role depends on the element's attributes
    Computed(fn(&dyn Dom, NodeId) -> Option<&'static str>),
}

impl ImplicitRole {
    pub fn resolve(&self, dom: &dyn Dom, node: NodeId) -> Option<&'static str> {
        match *self {
            ImplicitRole::Fixed(role) => Some(role),
            ImplicitRole::Computed(compute) => compute(dom, node),
        }
    }
}

impl std::fmt::Debug for ImplicitRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImplicitRole::Fixed(role) => f.debug_tuple("Fixed").field(role).finish(),
            ImplicitRole::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Implicit role table keyed by lowercase tag name.
pub fn implicit_role(tag: &str) -> Option<ImplicitRole> {
    use ImplicitRole::{Computed, Fixed};

    Some(match tag {
        "a" => Computed(link_role),
        "img" => Computed(img_role),
        "input" => Computed(input_role),
        "button" => Fixed("button"),
        "textarea" => Fixed("textbox"),
        "select" => Fixed("combobox"),
        "option" => Fixed("option"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Fixed("heading"),
        "article" => Fixed("article"),
        "aside" => Fixed("complementary"),
        "main" => Fixed("main"),
        "nav" => Fixed("navigation"),
        "form" => Fixed("form"),
        "header" => Fixed("banner"),
        "footer" => Fixed("contentinfo"),
        "table" => Fixed("table"),
        "ul" | "ol" => Fixed("list"),
        "li" => Fixed("listitem"),
        "dialog" => Fixed("dialog"),
        "search" => Fixed("search"),
        _ => return None,
    })
}

fn link_role(dom: &dyn Dom, node: NodeId) -> Option<&'static str> {
    dom.attribute(node, "href").map(|_| "link")
}

fn img_role(dom: &dyn Dom, node: NodeId) -> Option<&'static str> {
    let has_alt = dom
        .attribute(node, "alt")
        .is_some_and(|alt| !alt.trim().is_empty());
    Some(if has_alt { "img" } else { "presentation" })
}

fn input_role(dom: &dyn Dom, node: NodeId) -> Option<&'static str> {
    let input_type = dom
        .attribute(node, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string());

    match input_type.as_str() {
        "checkbox" => Some("checkbox"),
        "radio" => Some("radio"),
        "range" => Some("slider"),
        "search" => Some("searchbox"),
        "button" | "submit" | "reset" | "image" => Some("button"),
        "hidden" => None,
        _ => Some("textbox"),
    }
}

/// Explicit `role` attribute (first token), else the implicit role of the tag.
pub fn effective_role(dom: &dyn Dom, node: NodeId) -> Option<String> {
    if let Some(explicit) = dom.attribute(node, "role")
        && let Some(first) = explicit.split_whitespace().next()
    {
        return Some(first.to_string());
    }

    let tag = dom.tag_name(node)?;
    implicit_role(&tag)?
        .resolve(dom, node)
        .map(str::to_string)
}

/// Accessible name by precedence: `aria-label`, `title`, `alt`, the text of
/// the `aria-labelledby` targets, then the element's own visible text when it
/// has between 1 and `max_text_length` characters.
pub fn accessible_name(
    dom: &dyn Dom,
    node: NodeId,
    visible_text: Option<&str>,
    max_text_length: usize,
) -> Option<String> {
    for attr in ["aria-label", "title", "alt"] {
        if let Some(value) = dom.attribute(node, attr).and_then(|v| normalize_text(&v)) {
            return Some(value);
        }
    }

    if let Some(ids) = dom.attribute(node, "aria-labelledby") {
        let label = ids
            .split_whitespace()
            .filter_map(|id| dom.element_by_id(id))
            .filter_map(|label| normalize_text(&dom.text_content(label)))
            .collect::<Vec<_>>()
            .join(" ");
        if !label.is_empty() {
            return Some(label);
        }
    }

    visible_text
        .filter(|text| is_within_limit(text, max_text_length))
        .map(str::to_string)
}
