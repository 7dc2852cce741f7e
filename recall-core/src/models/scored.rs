use serde::{Deserialize, Serialize};

use crate::fragment::{Fragment, RelevanceScore};

/// Which search root a fragment was loaded from.
/// Project-scoped hits outrank general-scope hits at near-equal relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Project,
    General,
}

/// A fragment annotated with its computed retrieval relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFragment {
    pub fragment: Fragment,
    pub relevance: RelevanceScore,
    /// Chaos score resolved at scoring time (ingestion default applied).
    pub chaos_score: f64,
    pub scope: ScopeKind,
}

impl ScoredFragment {
    pub fn new(fragment: Fragment, relevance: RelevanceScore, scope: ScopeKind) -> Self {
        let chaos_score = fragment.chaos_score();
        Self {
            fragment,
            relevance,
            chaos_score,
            scope,
        }
    }

    /// Chaos-weighted composite used for final ordering.
    pub fn weighted_score(&self) -> f64 {
        self.relevance.weighted(self.chaos_score)
    }

    /// Diversity dedup key: `folder|type|day-bucket`, with `na` for any
    /// missing component.
    pub fn diversity_key(&self) -> String {
        let folder = self.fragment.metadata.folder.as_deref().unwrap_or("na");
        let kind = self.fragment.effective_type().unwrap_or("na");
        let day = match self.fragment.best_timestamp() {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => "na".to_string(),
        };
        format!("{folder}|{kind}|{day}")
    }
}
