//! Diversity dedup pass.
//!
//! Near-duplicate fragments — same folder, same type, same day — crowd a
//! result list without adding information. After ranking, only the first
//! (highest chaos-weighted) fragment per `folder|type|day` key survives,
//! unless dedup would leave fewer results than the caller needs.

use std::collections::HashSet;

use recall_core::models::ScoredFragment;
use tracing::debug;

/// Collapse ranked results by diversity key, keeping first occurrences.
/// Falls back to the undeduplicated list when dedup cannot cover the
/// target count.
pub fn apply(results: Vec<ScoredFragment>, target: usize) -> Vec<ScoredFragment> {
    let needed = target.min(results.len());

    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped: Vec<ScoredFragment> = Vec::with_capacity(results.len());
    let mut dropped = 0usize;
    for result in &results {
        if seen.insert(result.diversity_key()) {
            deduped.push(result.clone());
        } else {
            dropped += 1;
        }
    }

    if deduped.len() >= needed {
        if dropped > 0 {
            debug!(dropped, kept = deduped.len(), "diversity dedup");
        }
        deduped
    } else {
        debug!(dropped, needed, "diversity dedup skipped, too few distinct keys");
        results
    }
}
