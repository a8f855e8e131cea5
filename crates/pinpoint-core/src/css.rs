//! Rewrite resolver output for consumers that only run a CSS engine.
//!
//! `role=` and `text=` selectors are not CSS. They are rewritten into
//! attribute selectors plus the `:has-text()` pseudo-class that
//! Playwright-style engines understand; everything else passes through.

use regex::Regex;
use std::sync::LazyLock;

static ROLE_WITH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^role=([A-Za-z][\w-]*)\[name="((?:[^"\\]|\\.)*)"\]$"#).unwrap()
});

static ROLE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^role=([A-Za-z][\w-]*)$").unwrap());

static TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^text="((?:[^"\\]|\\.)*)"$"#).unwrap());

/// Convert a resolver selector into its CSS-engine form.
///
/// ```
/// use pinpoint_core::to_css_selector;
///
/// assert_eq!(to_css_selector("role=main"), r#"[role="main"]"#);
/// assert_eq!(to_css_selector("#login-button"), "#login-button");
/// ```
pub fn to_css_selector(selector: &str) -> String {
    if let Some(caps) = ROLE_WITH_NAME.captures(selector) {
        let (role, name) = (&caps[1], &caps[2]);
        return format!(
            r#"[role="{role}"][aria-label="{name}"], [role="{role}"][title="{name}"], [role="{role}"]:has-text("{name}")"#
        );
    }

    if let Some(caps) = ROLE_ONLY.captures(selector) {
        return format!(r#"[role="{}"]"#, &caps[1]);
    }

    if let Some(caps) = TEXT.captures(selector) {
        return format!(r#":has-text("{}")"#, &caps[1]);
    }

    selector.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_with_name() {
        assert_eq!(
            to_css_selector(r#"role=button[name="Sign in"]"#),
            r#"[role="button"][aria-label="Sign in"], [role="button"][title="Sign in"], [role="button"]:has-text("Sign in")"#
        );
    }

    #[test]
    fn test_escaped_quotes_survive() {
        assert_eq!(
            to_css_selector(r#"text="Say \"hi\"""#),
            r#":has-text("Say \"hi\"")"#
        );
    }

    #[test]
    fn test_passthrough() {
        for selector in [
            r#"[data-testid="save"]"#,
            "div.card > span:nth-of-type(2)",
            "role=",
            "text=unquoted",
        ] {
            assert_eq!(to_css_selector(selector), selector);
        }
    }
}
