//! Property tests over randomized corpora and queries, using an in-memory
//! store so proptest can shrink without touching the filesystem.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use proptest::prelude::*;

use recall_core::config::{defaults, RecallConfig};
use recall_core::models::RetrievalOptions;
use recall_core::traits::{FragmentStore, Retriever};
use recall_core::{Fragment, RecallResult};
use recall_retrieval::RetrievalEngine;

struct MemStore {
    general: Vec<Fragment>,
    projects: BTreeMap<String, Vec<Fragment>>,
}

impl FragmentStore for MemStore {
    fn load_general(&self) -> RecallResult<Vec<Fragment>> {
        Ok(self.general.clone())
    }

    fn load_project(&self, project: &str) -> RecallResult<Vec<Fragment>> {
        Ok(self.projects.get(project).cloned().unwrap_or_default())
    }
}

const VOCAB: &[&str] = &[
    "halloumi", "bacon", "invoice", "deadlift", "sourdough", "meeting", "garden", "pricing",
    "retreat", "onboarding", "quarterly", "session",
];

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCAB)
}

fn arb_corpus() -> impl Strategy<Value = Vec<Fragment>> {
    let entry = (
        prop::collection::vec(word(), 1..8),
        0i64..500,
        prop::option::of(0.0f64..=1.0),
    );
    prop::collection::vec(entry, 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (words, age_days, chaos))| {
                let mut f = Fragment {
                    id: format!("frag-{i:03}"),
                    content: words.join(" "),
                    timestamp: Some(Utc::now() - Duration::days(age_days)),
                    ..Fragment::default()
                };
                f.metadata.chaos_score = chaos;
                f
            })
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn results_respect_bounds(corpus in arb_corpus(), query in arb_query(), limit in prop::option::of(1usize..50)) {
        let store = MemStore { general: corpus, projects: BTreeMap::new() };
        let engine = RetrievalEngine::new(&store, RecallConfig::default());
        let options = RetrievalOptions { limit, ..Default::default() };

        let results = engine.retrieve(&query, &options).unwrap();

        prop_assert!(results.len() <= defaults::MAX_RESULTS);
        if let Some(limit) = limit {
            prop_assert!(results.len() <= limit);
        }
        for r in &results {
            prop_assert!((0.0..=1.0).contains(&r.relevance.value()));
            prop_assert!((0.0..=1.0).contains(&r.chaos_score));
        }
    }

    #[test]
    fn retrieval_is_deterministic(corpus in arb_corpus(), query in arb_query()) {
        let store = MemStore { general: corpus, projects: BTreeMap::new() };
        let engine = RetrievalEngine::new(&store, RecallConfig::default());
        let options = RetrievalOptions::default();

        let first: Vec<String> = engine
            .retrieve(&query, &options)
            .unwrap()
            .into_iter()
            .map(|r| r.fragment.id)
            .collect();
        let second: Vec<String> = engine
            .retrieve(&query, &options)
            .unwrap()
            .into_iter()
            .map(|r| r.fragment.id)
            .collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn result_ids_are_unique(corpus in arb_corpus(), query in arb_query()) {
        let store = MemStore { general: corpus, projects: BTreeMap::new() };
        let engine = RetrievalEngine::new(&store, RecallConfig::default());

        let results = engine.retrieve(&query, &RetrievalOptions::default()).unwrap();
        let mut ids: Vec<&str> = results.iter().map(|r| r.fragment.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        prop_assert_eq!(before, ids.len());
    }

    #[test]
    fn blank_queries_always_error(corpus in arb_corpus(), pad in 0usize..5) {
        let store = MemStore { general: corpus, projects: BTreeMap::new() };
        let engine = RetrievalEngine::new(&store, RecallConfig::default());

        let query = " ".repeat(pad);
        prop_assert!(engine.retrieve(&query, &RetrievalOptions::default()).is_err());
    }
}
