//! Configuration for the retrieval pipeline.
//!
//! Every struct is `#[serde(default)]` so a partial TOML file overrides
//! only the knobs it names.

mod retrieval_config;
mod store_config;

pub use retrieval_config::{ExpansionConfig, ScorerWeights, ThresholdConfig};
pub use store_config::StoreConfig;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default knob values, kept in one place for tests and docs.
pub mod defaults {
    /// Target result count for specific queries.
    pub const K_DEFAULT: usize = 5;
    /// Target result count for categorical/list queries.
    pub const K_LIST: usize = 7;
    /// Hard cap on returned results.
    pub const MAX_RESULTS: usize = 25;
    /// Percentile used for the initial adaptive threshold.
    pub const PERCENTILE: f64 = 0.65;
    /// Absolute score floor.
    pub const EPSILON: f64 = 0.01;
    /// Step-down schedule tried when the percentile yields too few hits.
    pub const STEP_SCHEDULE: [f64; 5] = [0.15, 0.10, 0.06, 0.03, 0.01];
    /// Window below τ for recency-ordered mercy backfill.
    pub const MERCY_DELTA: f64 = 0.01;
    /// Scores below this are temporal/chaos noise, not real matches.
    pub const REAL_MATCH_FLOOR: f64 = 0.1;
    /// Relevance delta within which project scope outranks general scope.
    pub const SCOPE_PREFERENCE_DELTA: f64 = 0.1;

    /// Expansion caps with and without a semantic domain match.
    pub const MAX_EXPANSION_TERMS: usize = 8;
    pub const MAX_EXPANSION_TERMS_SEMANTIC: usize = 12;
    /// Terms taken per matched subtype during domain-aware expansion.
    pub const SUBTYPE_TERM_CAP: usize = 3;
    /// Multiplier on expanded-term credit when direct words already hit.
    pub const EXPANSION_DECAY: f64 = 0.7;

    /// Fragment files larger than this are skipped.
    pub const MAX_FRAGMENT_FILE_BYTES: u64 = 50 * 1024 * 1024;
    /// Recursion bound for the corpus walk.
    pub const MAX_WALK_DEPTH: usize = 10;
}

/// Top-level configuration for the Recall engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub scorer: ScorerWeights,
    pub threshold: ThresholdConfig,
    pub expansion: ExpansionConfig,
    pub store: StoreConfig,
    /// Query keyword → project name, consulted before semantic inference.
    /// Ordered map so inference is deterministic when several keywords hit.
    pub project_keywords: BTreeMap<String, String>,
}

impl RecallConfig {
    /// Parse from a TOML document; unnamed knobs keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// The default keyword → project table for a personal vault.
    pub fn with_default_project_keywords(mut self) -> Self {
        for (keyword, project) in [
            ("client", "clients"),
            ("clients", "clients"),
            ("customer", "clients"),
            ("customers", "clients"),
            ("recipe", "foods"),
            ("recipes", "foods"),
            ("food", "foods"),
            ("foods", "foods"),
            ("meal", "foods"),
            ("meals", "foods"),
            ("cooking", "foods"),
            ("lift", "lifts"),
            ("lifts", "lifts"),
            ("workout", "lifts"),
            ("workouts", "lifts"),
            ("exercise", "lifts"),
            ("exercises", "lifts"),
            ("training", "lifts"),
            ("gym", "lifts"),
            // Semantic subtype/domain fallbacks.
            ("sales", "clients"),
            ("professional", "clients"),
            ("nutrition", "foods"),
            ("physical", "lifts"),
        ] {
            self.project_keywords
                .insert(keyword.to_string(), project.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_overrides_only_named_knobs() {
        let cfg = RecallConfig::from_toml_str(
            r#"
            [threshold]
            max_results = 10

            [scorer]
            content_match = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(cfg.threshold.max_results, 10);
        assert_eq!(cfg.threshold.k_default, defaults::K_DEFAULT);
        assert_eq!(cfg.scorer.content_match, 0.5);
        assert_eq!(cfg.scorer.semantic_match, 0.25);
    }

    #[test]
    fn default_project_keywords_resolve_deterministically() {
        let cfg = RecallConfig::default().with_default_project_keywords();
        assert_eq!(cfg.project_keywords.get("recipes").unwrap(), "foods");
        assert_eq!(cfg.project_keywords.get("gym").unwrap(), "lifts");
    }
}
