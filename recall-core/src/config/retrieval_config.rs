use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights for the scorer's signal contributions.
///
/// Content and metadata weights shift for name-like queries: a person's
/// name is best answered by a title match, not prose term density.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerWeights {
    pub semantic_match: f64,
    pub type_match: f64,
    pub content_match: f64,
    pub content_match_name_query: f64,
    pub metadata_match: f64,
    pub metadata_match_name_query: f64,
    pub expanded_match: f64,
    pub temporal_bonus: f64,
    pub chaos_bonus: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            semantic_match: 0.25,
            type_match: 0.20,
            content_match: 0.35,
            content_match_name_query: 0.25,
            metadata_match: 0.10,
            metadata_match_name_query: 0.25,
            expanded_match: 0.10,
            temporal_bonus: 0.03,
            chaos_bonus: 0.02,
        }
    }
}

impl ScorerWeights {
    /// Effective content weight for the current query shape.
    pub fn content_weight(&self, is_name_query: bool) -> f64 {
        if is_name_query {
            self.content_match_name_query
        } else {
            self.content_match
        }
    }

    /// Effective metadata/filename weight for the current query shape.
    pub fn metadata_weight(&self, is_name_query: bool) -> f64 {
        if is_name_query {
            self.metadata_match_name_query
        } else {
            self.metadata_match
        }
    }
}

/// Adaptive threshold selector knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Target result count for specific queries.
    pub k_default: usize,
    /// Target result count for categorical/list queries.
    pub k_list: usize,
    /// Hard cap on returned results.
    pub max_results: usize,
    /// Percentile for the initial τ.
    pub percentile: f64,
    /// Absolute floor for τ.
    pub epsilon: f64,
    /// Descending thresholds retried when τ yields fewer than K hits.
    pub step_schedule: Vec<f64>,
    /// Backfill window below τ, recency-ordered.
    pub mercy_delta: f64,
    /// Below this, the best candidate is noise and an empty result is
    /// returned rather than filler.
    pub real_match_floor: f64,
    /// Relevance delta within which project-scope hits rank first.
    pub scope_preference_delta: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            k_default: defaults::K_DEFAULT,
            k_list: defaults::K_LIST,
            max_results: defaults::MAX_RESULTS,
            percentile: defaults::PERCENTILE,
            epsilon: defaults::EPSILON,
            step_schedule: defaults::STEP_SCHEDULE.to_vec(),
            mercy_delta: defaults::MERCY_DELTA,
            real_match_floor: defaults::REAL_MATCH_FLOOR,
            scope_preference_delta: defaults::SCOPE_PREFERENCE_DELTA,
        }
    }
}

/// Query expansion caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub max_terms: usize,
    pub max_terms_semantic: usize,
    pub subtype_term_cap: usize,
    pub decay: f64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_terms: defaults::MAX_EXPANSION_TERMS,
            max_terms_semantic: defaults::MAX_EXPANSION_TERMS_SEMANTIC,
            subtype_term_cap: defaults::SUBTYPE_TERM_CAP,
            decay: defaults::EXPANSION_DECAY,
        }
    }
}
