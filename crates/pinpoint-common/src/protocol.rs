use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything downstream consumers (context tagging, test payloads) need to
/// know about a captured element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag: String,
    /// Resolver output, possibly in the `role=` / `text=` sub-grammars
    pub selector: String,
    /// `selector` rewritten for consumers that only run a CSS engine
    pub css_selector: String,
    /// Plain `querySelector`-compatible selector
    pub query_selector: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `tag#id.class > ...` path down to the element
    pub hierarchy: String,
}

/// Compact, LLM-friendly view of a DOM subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SimplifiedNode>,

    // Table summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_row: Option<Vec<SimplifiedNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_count: Option<usize>,

    // List summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SimplifiedNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_items: Option<usize>,
}

impl SimplifiedNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_skips_missing_text() {
        let snapshot = ElementSnapshot {
            tag: "button".into(),
            selector: "role=button".into(),
            css_selector: "[role=\"button\"]".into(),
            query_selector: "button".into(),
            attributes: BTreeMap::from([("type".to_string(), "submit".to_string())]),
            text: None,
            hierarchy: "form > button".into(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["attributes"]["type"], "submit");
    }

    #[test]
    fn test_simplified_node_skips_empty_fields() {
        let mut node = SimplifiedNode::new("ul");
        node.more_items = Some(4);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"tag":"ul","more_items":4}"#);
    }
}
