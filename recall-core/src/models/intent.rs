use serde::{Deserialize, Serialize};

use super::DomainMatch;

/// What shape of answer the query is asking for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IntentKind {
    /// An enumeration of a class of fragments ("list my clients").
    /// `category` is the normalized, canonicalized class noun.
    Categorical { category: String },
    /// A particular fact or item. The conservative default.
    Specific,
}

/// Classified query intent plus the semantic signal that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub kind: IntentKind,
    /// True when the query matched a list/enumeration anchor.
    pub is_list_query: bool,
    /// Domain inference captured during classification, reused by scoring.
    pub semantic: Option<DomainMatch>,
}

impl QueryIntent {
    /// The conservative fallback used for ambiguous queries.
    pub fn specific() -> Self {
        Self {
            kind: IntentKind::Specific,
            is_list_query: false,
            semantic: None,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, IntentKind::Categorical { .. })
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            IntentKind::Categorical { category } => Some(category),
            IntentKind::Specific => None,
        }
    }
}
