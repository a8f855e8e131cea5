use anyhow::{Context, Result, bail};
use pinpoint_common::{Dom, NodeId};
use pinpoint_core::config::{ConfigLoader, PinpointConfig, SimplifyConfig};
use pinpoint_core::inspect::{simplify_dom, snapshot};
use pinpoint_core::locator::{Action, ActionOptions, Assertion, LocatorGenerator, goto_commands};
use pinpoint_core::{SelectorResolver, to_css_selector};
use pinpoint_html::HtmlDom;
use std::path::Path;
use tracing::{debug, info};

/// Explicit `--config` file, else the default search path.
pub fn load_config(path: Option<&Path>) -> Result<PinpointConfig> {
    let config = match path {
        Some(path) => ConfigLoader::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigLoader::load_default().context("Failed to load default config")?,
    };
    debug!("Using config: {:?}", config);
    Ok(config)
}

pub fn load_document(path: &Path) -> Result<HtmlDom> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dom = HtmlDom::parse_document(&source);
    info!("Loaded {} ({} elements)", path.display(), dom.len());
    Ok(dom)
}

/// Elements matching `css`; an error when the query is invalid or empty.
pub fn select(dom: &HtmlDom, css: &str) -> Result<Vec<NodeId>> {
    let nodes = dom
        .select(css)
        .with_context(|| format!("Invalid CSS query '{}'", css))?;
    if nodes.is_empty() {
        bail!("No element matches '{}'", css);
    }
    Ok(nodes)
}

fn select_first(dom: &HtmlDom, css: &str) -> Result<NodeId> {
    let nodes = select(dom, css)?;
    if nodes.len() > 1 {
        debug!("'{}' matches {} elements; using the first", css, nodes.len());
    }
    Ok(nodes[0])
}

/// One resolved selector per matching element, optionally followed by its
/// CSS-engine form (tab separated).
pub fn resolve(
    dom: &HtmlDom,
    css: &str,
    config: &PinpointConfig,
    with_css: bool,
) -> Result<Vec<String>> {
    let mut resolver = SelectorResolver::with_config(config.resolver.clone());
    let lines = select(dom, css)?
        .into_iter()
        .map(|node| {
            let selector = resolver.resolve(dom, node);
            if with_css {
                let css = to_css_selector(&selector);
                format!("{}\t{}", selector, css)
            } else {
                selector
            }
        })
        .collect();
    Ok(lines)
}

pub fn locators(dom: &HtmlDom, css: &str, config: &PinpointConfig) -> Result<Vec<String>> {
    let node = select_first(dom, css)?;
    let mut resolver = SelectorResolver::with_config(config.resolver.clone());
    Ok(LocatorGenerator::new(config.locators.clone()).generate_locators(
        &mut resolver,
        dom,
        node,
        false,
    ))
}

pub fn commands(
    dom: &HtmlDom,
    css: &str,
    config: &PinpointConfig,
    action: &str,
    value: Option<&str>,
    options: &ActionOptions,
) -> Result<Vec<String>> {
    let action = Action::parse(action, value)?;
    let node = select_first(dom, css)?;
    let mut resolver = SelectorResolver::with_config(config.resolver.clone());
    Ok(LocatorGenerator::new(config.locators.clone()).generate_commands(
        &mut resolver,
        dom,
        node,
        &action,
        options,
    ))
}

pub fn assertions(
    dom: &HtmlDom,
    css: &str,
    config: &PinpointConfig,
    assertion: &str,
    expected: Option<&str>,
) -> Result<Vec<String>> {
    let assertion = Assertion::parse(assertion, expected)?;
    let node = select_first(dom, css)?;
    let mut resolver = SelectorResolver::with_config(config.resolver.clone());
    Ok(LocatorGenerator::new(config.locators.clone()).generate_assertions(
        &mut resolver,
        dom,
        node,
        &assertion,
    ))
}

pub fn goto(url: &str) -> Vec<String> {
    goto_commands(url)
}

/// Pretty JSON of the simplified `<body>` (or root element).
pub fn simplify(dom: &HtmlDom, options: &SimplifyConfig) -> Result<String> {
    let root = match dom.select_first("body")? {
        Some(body) => body,
        None => dom
            .document_element()
            .context("Document has no root element")?,
    };
    let tree = simplify_dom(dom, root, options);
    Ok(serde_json::to_string_pretty(&tree)?)
}

/// Pretty JSON snapshot of the first element matching `css`.
pub fn inspect(dom: &HtmlDom, css: &str, config: &PinpointConfig) -> Result<String> {
    let node = select_first(dom, css)?;
    let mut resolver = SelectorResolver::with_config(config.resolver.clone());
    let snap = snapshot(&mut resolver, dom, node).context("Matched node is not an element")?;
    Ok(serde_json::to_string_pretty(&snap)?)
}
