//! Identifier heuristics and selector escaping.
//!
//! Decides whether ids and classes look hand-written (stable across builds)
//! or generated by a framework or bundler, and renders the pieces that end up
//! inside selectors.

use pinpoint_common::{Dom, NodeId};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static GENERATED_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // UUID
        r"(?i)^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$",
        // MD5, SHA1, SHA256
        r"(?i)^[a-f0-9]{32}$",
        r"(?i)^[a-f0-9]{40}$",
        r"(?i)^[a-f0-9]{64}$",
        r"(?i)^[a-f0-9]{12,}$",
        r"(?i)^react-[a-z0-9]{6,}$",
        r"(?i)^ember[0-9]+$",
        r"(?i)^vue-[a-z0-9]{6,}$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static FRAMEWORK_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(react-|ember-|vue-|ng-|jquery-)").unwrap());

static HEX_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]{8,}$").unwrap());

/// Minimum number of distinct characters a meaningful id needs.
const MIN_ID_ENTROPY: usize = 3;

/// Check if an id looks hand-written.
///
/// Generated shapes (hashes, UUIDs, framework counters, low-entropy strings)
/// are rejected first. Survivors are accepted when they contain a separator
/// (`-` or `_`) or start with one of `prefixes`.
pub fn is_meaningful_id(id: &str, prefixes: &[String]) -> bool {
    let id = id.trim();
    if id.is_empty() {
        return false;
    }

    if GENERATED_ID_PATTERNS.iter().any(|re| re.is_match(id)) {
        return false;
    }

    if id.chars().collect::<HashSet<_>>().len() < MIN_ID_ENTROPY {
        return false;
    }

    if id.contains('-') || id.contains('_') {
        return true;
    }

    let lower = id.to_lowercase();
    prefixes
        .iter()
        .any(|prefix| lower.starts_with(prefix.to_lowercase().as_str()))
}

/// Classes from a `class` attribute that are worth putting in a selector.
pub fn meaningful_classes(class_attr: &str) -> Vec<&str> {
    class_attr
        .split_whitespace()
        .filter(|class| class.chars().count() > 1)
        .filter(|class| !FRAMEWORK_CLASS.is_match(class))
        .filter(|class| !HEX_CLASS.is_match(class))
        .collect()
}

/// `.a.b` built from the element's meaningful classes, if it has any.
pub fn class_selector(dom: &dyn Dom, node: NodeId) -> Option<String> {
    let class_attr = dom.attribute(node, "class")?;
    let classes = meaningful_classes(&class_attr);
    if classes.is_empty() {
        return None;
    }
    Some(
        classes
            .iter()
            .map(|class| format!(".{}", escape_css_ident(class)))
            .collect(),
    )
}

/// `#id` for the element when its id passes [`is_meaningful_id`].
pub fn meaningful_id_selector(dom: &dyn Dom, node: NodeId, prefixes: &[String]) -> Option<String> {
    let id = dom.attribute(node, "id")?;
    is_meaningful_id(&id, prefixes).then(|| format!("#{}", escape_css_ident(&id)))
}

/// Escape a string for use as a CSS identifier (`#id`, `.class`).
///
/// Follows the `CSS.escape()` algorithm: leading digits become hex escapes,
/// other ASCII punctuation is backslash-escaped, non-ASCII passes through.
pub fn escape_css_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let chars: Vec<char> = ident.chars().collect();

    if chars.len() == 1 && chars[0] == '-' {
        return "\\-".to_string();
    }

    for (i, &c) in chars.iter().enumerate() {
        let leading_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        match c {
            '\0' => out.push('\u{FFFD}'),
            c if c.is_control() || leading_digit => {
                out.push_str(&format!("\\{:x} ", c as u32));
            }
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => {
                out.push(c)
            }
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

/// Escape a value for use inside a double-quoted selector string.
pub fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\a "),
            c => out.push(c),
        }
    }
    out
}

/// `[attr="value"]`
pub fn attribute_selector(attr: &str, value: &str) -> String {
    format!("[{}=\"{}\"]", attr, quote_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        crate::config::ResolverConfig::default().meaningful_id_prefixes
    }

    #[test]
    fn test_separator_ids_are_meaningful() {
        assert!(is_meaningful_id("login-button", &prefixes()));
        assert!(is_meaningful_id("search_box", &prefixes()));
    }

    #[test]
    fn test_prefix_ids_are_meaningful() {
        assert!(is_meaningful_id("sidebar", &prefixes()));
        assert!(is_meaningful_id("userMenu", &prefixes()));
        assert!(is_meaningful_id("MainContent", &prefixes()));
        assert!(!is_meaningful_id("btn1", &prefixes()));
        assert!(!is_meaningful_id("x", &prefixes()));
    }

    #[test]
    fn test_generated_ids_are_rejected() {
        let p = prefixes();
        assert!(!is_meaningful_id("a3f9c2e1b7d4", &p));
        assert!(!is_meaningful_id("550e8400-e29b-41d4-a716-446655440000", &p));
        assert!(!is_meaningful_id("d41d8cd98f00b204e9800998ecf8427e", &p));
        assert!(!is_meaningful_id("react-a1b2c3", &p));
        assert!(!is_meaningful_id("ember1234", &p));
        assert!(!is_meaningful_id("vue-f00ba7", &p));
    }

    #[test]
    fn test_low_entropy_ids_are_rejected() {
        let p = prefixes();
        assert!(!is_meaningful_id("aaaaaa", &p));
        assert!(!is_meaningful_id("a-a-a", &p));
        assert!(is_meaningful_id("ab-c", &p));
    }

    #[test]
    fn test_meaningful_classes_filter() {
        let classes = meaningful_classes("btn react-root ng-star-inserted a 1f3a9b7c primary");
        assert_eq!(classes, vec!["btn", "primary"]);
        assert!(meaningful_classes("   ").is_empty());
    }

    #[test]
    fn test_escape_css_ident() {
        assert_eq!(escape_css_ident("login-button"), "login-button");
        assert_eq!(escape_css_ident("md:flex"), "md\\:flex");
        assert_eq!(escape_css_ident("w-1/2"), "w-1\\/2");
        assert_eq!(escape_css_ident("1col"), "\\31 col");
        assert_eq!(escape_css_ident("-"), "\\-");
    }

    #[test]
    fn test_quote_value() {
        assert_eq!(quote_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(attribute_selector("name", "q"), r#"[name="q"]"#);
    }
}
