//! Element selector resolution.
//!
//! Given an element of a live document, [`SelectorResolver`] produces the
//! most robust locator string an automation tool can use to find it again.
//! The crate also converts those locators for plain CSS engines, generates
//! Playwright locators and commands, and describes elements for capture
//! payloads.

pub mod config;
pub mod css;
pub mod inspect;
pub mod locator;
pub mod resolution;

pub use config::{ConfigError, ConfigLoader, PinpointConfig, ResolverConfig};
pub use css::to_css_selector;
pub use locator::{Action, ActionOptions, Assertion, LocatorGenerator};
pub use resolution::{Resolution, SelectorResolver, Strategy};
