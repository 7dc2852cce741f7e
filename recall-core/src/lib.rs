//! # recall-core
//!
//! Foundation crate for the Recall vault-memory engine.
//! Defines all shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fragment;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export the most commonly used types at the crate root.
pub use config::RecallConfig;
pub use errors::{RecallError, RecallResult};
pub use fragment::{Fragment, FragmentMetadata, RelevanceScore};
pub use models::{
    DomainMatch, Epoch, IntentKind, QueryIntent, RetrievalOptions, ScopeKind, ScoredFragment,
};
