//! Filesystem rule loader.
//!
//! Supports both rule kinds via two-pass deserialization
//! (RuleEnvelope -> RuleDocument) and `extends` inheritance, including
//! inheritance from the embedded default documents.

mod core;
mod error;
mod extends;

#[cfg(test)]
mod tests;

pub use self::core::RuleLoader;
pub use self::error::{LoadResult, LoadStatus, Result, RuleError};
pub use self::extends::{deep_merge, resolve_extends, ExtendsError};
