//! `Dom` implementation over parsed HTML.
//!
//! Backs the selector resolver with a real CSS selector engine (scraper /
//! servo's `selectors`) so uniqueness checks behave like `querySelectorAll`
//! in a browser.

pub mod document;

pub use document::HtmlDom;
