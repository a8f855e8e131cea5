use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinpointConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub locators: LocatorConfig,
    #[serde(default)]
    pub simplify: SimplifyConfig,
}

/// Tuning for the selector strategy chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Automation attributes, checked in order
    #[serde(default = "default_test_attributes")]
    pub test_attributes: Vec<String>,
    /// Attributes the structural selector may append (first present wins)
    #[serde(default = "default_important_attributes")]
    pub important_attributes: Vec<String>,
    /// Id prefixes that mark a hand-written id
    #[serde(default = "default_meaningful_id_prefixes")]
    pub meaningful_id_prefixes: Vec<String>,
    /// Longest accessible name used in a `role=` selector
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Longest visible text used as a name or `text=` selector
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Ancestor levels walked when scoping or disambiguating
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            test_attributes: default_test_attributes(),
            important_attributes: default_important_attributes(),
            meaningful_id_prefixes: default_meaningful_id_prefixes(),
            max_name_length: default_max_name_length(),
            max_text_length: default_max_text_length(),
            max_ancestor_depth: default_max_ancestor_depth(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_test_attributes() -> Vec<String> {
    to_strings(&[
        "data-testid",
        "data-test-id",
        "data-test",
        "data-id",
        "data-cy",
        "data-qa",
    ])
}

fn default_important_attributes() -> Vec<String> {
    to_strings(&["name", "type", "value", "placeholder", "title", "alt"])
}

fn default_meaningful_id_prefixes() -> Vec<String> {
    to_strings(&[
        "user", "main", "nav", "header", "footer", "content", "app", "page", "section",
        "sidebar", "modal", "form", "button", "input", "menu", "login", "signup",
    ])
}

fn default_max_name_length() -> usize {
    50
}

fn default_max_text_length() -> usize {
    99
}

fn default_max_ancestor_depth() -> usize {
    3
}

/// Tuning for Playwright locator generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Longest text used in `getByRole` names and `getByText`
    #[serde(default = "default_max_locator_text_length")]
    pub max_text_length: usize,
    /// Highest document index for which `.nth(i)` is suggested
    #[serde(default = "default_max_nth_index")]
    pub max_nth_index: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_locator_text_length(),
            max_nth_index: default_max_nth_index(),
        }
    }
}

fn default_max_locator_text_length() -> usize {
    200
}

fn default_max_nth_index() -> usize {
    5
}

/// Limits for DOM simplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_children")]
    pub max_children: usize,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_children: default_max_children(),
        }
    }
}

fn default_max_depth() -> usize {
    12
}

fn default_max_children() -> usize {
    30
}
