pub mod cache;
pub mod engine;
pub mod identity;
pub mod role;
pub mod strategy;
pub mod text;
pub mod uniqueness;

pub use cache::{NodeCache, SelectorCache, TextCache};
pub use engine::{CacheStats, SelectorResolver};
pub use identity::{escape_css_ident, is_meaningful_id, meaningful_classes};
pub use role::{ImplicitRole, accessible_name, effective_role, implicit_role};
pub use strategy::{Resolution, Strategy};
pub use uniqueness::{
    AncestorPreference, Uniqueness, ensure_unique_selector, validate_and_enhance_selector, verify,
};
