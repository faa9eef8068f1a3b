//! YAML rule document types.
//!
//! - `RuleEnvelope`: lightweight first-pass header (apiVersion, kind, metadata)
//! - `RuleDocument`: enum dispatching to kind-specific types
//!
//! The kind-specific types live next to their compiled forms in
//! [`crate::ontology`] and [`crate::policy`].

mod document;
mod envelope;
mod kind;
mod metadata;

pub use document::*;
pub use envelope::*;
pub use kind::*;
pub use metadata::*;

/// The only supported `apiVersion`.
pub const API_VERSION: &str = "v1";
