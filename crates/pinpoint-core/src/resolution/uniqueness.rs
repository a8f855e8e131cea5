//! Uniqueness verification against the live DOM, with ancestor-scoped
//! disambiguation when a candidate selector matches more than the target.

use super::identity::{attribute_selector, class_selector, meaningful_id_selector};
use crate::config::ResolverConfig;
use pinpoint_common::{Dom, NodeId, QueryError};
use tracing::{debug, warn};

/// Outcome of querying a candidate selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    /// Exactly one match, and it is the target
    Unique,
    /// Several matches including the target
    Ambiguous(usize),
    /// No match, or matches that exclude the target
    Missing,
}

/// Which ancestor identifier to try first when scoping a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorPreference {
    /// id, `data-testid`, classes, role, tag
    IdFirst,
    /// classes, id, `data-testid`, role, tag
    ClassFirst,
}

/// Query `selector` and classify the result relative to `target`.
pub fn verify(dom: &dyn Dom, selector: &str, target: NodeId) -> Result<Uniqueness, QueryError> {
    let matches = dom.query_selector_all(selector)?;
    Ok(match matches.as_slice() {
        [only] if *only == target => Uniqueness::Unique,
        many if many.len() > 1 && many.contains(&target) => Uniqueness::Ambiguous(many.len()),
        _ => Uniqueness::Missing,
    })
}

/// Make an id-anchored selector unique.
///
/// Used for the meaningful-id strategy: duplicate ids are scoped by the
/// nearest ancestors, preferring their class selectors.
pub fn ensure_unique_selector(
    dom: &dyn Dom,
    selector: &str,
    target: NodeId,
    config: &ResolverConfig,
) -> String {
    refine(dom, selector, target, AncestorPreference::ClassFirst, config)
}

/// Make a structural CSS selector unique.
///
/// Ancestors are identified by their id first, since the candidate is
/// already class-based.
pub fn validate_and_enhance_selector(
    dom: &dyn Dom,
    selector: &str,
    target: NodeId,
    config: &ResolverConfig,
) -> String {
    refine(dom, selector, target, AncestorPreference::IdFirst, config)
}

fn refine(
    dom: &dyn Dom,
    selector: &str,
    target: NodeId,
    preference: AncestorPreference,
    config: &ResolverConfig,
) -> String {
    if !dom.is_connected(target) {
        debug!("{} is detached; returning '{}' unverified", target, selector);
        return selector.to_string();
    }

    match verify(dom, selector, target) {
        Ok(Uniqueness::Unique) => return selector.to_string(),
        Ok(Uniqueness::Missing) => {
            debug!("'{}' does not select {}; keeping it as is", selector, target);
            return selector.to_string();
        }
        Ok(Uniqueness::Ambiguous(count)) => {
            debug!("'{}' matches {} elements; adding ancestor context", selector, count);
        }
        Err(e) => {
            log_query_error(&e, selector);
            return selector.to_string();
        }
    }

    let mut current = selector.to_string();
    let mut ancestor = dom.parent(target);
    for _ in 0..config.max_ancestor_depth {
        let Some(node) = ancestor else {
            break;
        };
        let candidate = format!(
            "{} > {}",
            ancestor_selector(dom, node, preference, config),
            current
        );
        match verify(dom, &candidate, target) {
            Ok(Uniqueness::Unique) => return candidate,
            Ok(_) => current = candidate,
            Err(e) => {
                log_query_error(&e, &candidate);
                return current;
            }
        }
        ancestor = dom.parent(node);
    }

    // Unique within the parent only; repeated subtrees can still collide.
    match dom.sibling_index(target) {
        Some(index) => format!("{}:nth-child({})", current, index),
        None => current,
    }
}

/// Selector identifying an ancestor, in the order given by `preference`.
pub fn ancestor_selector(
    dom: &dyn Dom,
    node: NodeId,
    preference: AncestorPreference,
    config: &ResolverConfig,
) -> String {
    let id = meaningful_id_selector(dom, node, &config.meaningful_id_prefixes);
    let test_id = dom
        .attribute(node, "data-testid")
        .filter(|v| !v.trim().is_empty())
        .map(|v| attribute_selector("data-testid", &v));
    let classes = class_selector(dom, node);
    let role = dom
        .attribute(node, "role")
        .filter(|v| !v.trim().is_empty())
        .map(|v| attribute_selector("role", &v));

    let ordered = match preference {
        AncestorPreference::IdFirst => [id, test_id, classes, role],
        AncestorPreference::ClassFirst => [classes, id, test_id, role],
    };

    ordered
        .into_iter()
        .flatten()
        .next()
        .or_else(|| dom.tag_name(node))
        .unwrap_or_else(|| "*".to_string())
}

pub(crate) fn log_query_error(error: &QueryError, selector: &str) {
    match error {
        QueryError::CrossOrigin(detail) => {
            warn!(
                "Cross-origin restriction while verifying '{}': {}",
                selector, detail
            );
        }
        other => warn!("Could not verify selector '{}': {}", selector, other),
    }
}
