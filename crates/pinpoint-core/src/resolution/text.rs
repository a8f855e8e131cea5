use pinpoint_common::{Dom, NodeId};

/// Tags whose text is a reasonable locator on its own.
pub const TEXT_TAGS: &[&str] = &[
    "a",
    "button",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "td",
    "th",
    "label",
    "span",
    "p",
    "strong",
    "em",
    "b",
    "i",
    "small",
    "summary",
    "legend",
    "caption",
    "dt",
    "dd",
    "figcaption",
    "option",
];

/// Collapse whitespace runs and trim. `None` when nothing is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Rendered text of an element: all descendant text, whitespace-normalized.
pub fn extract_visible_text(dom: &dyn Dom, node: NodeId) -> Option<String> {
    normalize_text(&dom.text_content(node))
}

/// Whether `text` has between 1 and `max_chars` characters.
pub fn is_within_limit(text: &str, max_chars: usize) -> bool {
    let len = text.chars().count();
    len >= 1 && len <= max_chars
}

pub fn is_text_tag(tag: &str) -> bool {
    TEXT_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Sign\n   in "), Some("Sign in".to_string()));
        assert_eq!(normalize_text(" \t\n"), None);
    }

    #[test]
    fn test_limit_counts_chars_not_bytes() {
        assert!(is_within_limit("héllo", 5));
        assert!(!is_within_limit("", 5));
        assert!(!is_within_limit("toolong", 5));
    }
}
