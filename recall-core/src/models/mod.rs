//! Shared model types exchanged between the store and the retrieval engine.

mod domain_match;
mod epoch;
mod intent;
mod options;
mod scored;

pub use domain_match::DomainMatch;
pub use epoch::Epoch;
pub use intent::{IntentKind, QueryIntent};
pub use options::RetrievalOptions;
pub use scored::{ScopeKind, ScoredFragment};
