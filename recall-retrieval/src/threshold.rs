//! Adaptive percentile thresholding.
//!
//! Rather than a fixed relevance cutoff, the selector derives τ from the
//! score distribution of the current candidate set, steps it down through
//! a fixed schedule when too few candidates clear it, and finally
//! backfills from a small mercy window ordered by recency. A corpus with
//! no real match still returns empty: filler is worse than silence.

use recall_core::config::ThresholdConfig;
use recall_core::models::{QueryIntent, ScopeKind, ScoredFragment};
use tracing::debug;

/// Value at percentile `p` of the scores, by sorted-index interpolation
/// floor. Empty input yields 0.
pub fn percentile(scores: &[f64], p: f64) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = ((p * (sorted.len() - 1) as f64).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Select the result set from scored candidates.
///
/// Returns candidates in no particular order; [`rank`] imposes the final
/// ordering afterwards.
pub fn select(
    mut candidates: Vec<ScoredFragment>,
    intent: &QueryIntent,
    config: &ThresholdConfig,
) -> Vec<ScoredFragment> {
    if candidates.is_empty() {
        return candidates;
    }

    let k = if intent.is_list_query {
        config.k_list
    } else {
        config.k_default
    };

    let scores: Vec<f64> = candidates.iter().map(|c| c.relevance.value()).collect();
    let max_score = scores.iter().copied().fold(0.0, f64::max);
    let tau = percentile(&scores, config.percentile).max(config.epsilon);
    let has_real_match = max_score > config.real_match_floor;

    let mut hits: Vec<ScoredFragment> = Vec::new();
    let mut rest: Vec<ScoredFragment> = Vec::new();
    for c in candidates.drain(..) {
        if c.relevance.value() >= tau {
            hits.push(c);
        } else {
            rest.push(c);
        }
    }

    debug!(
        tau,
        k,
        max_score,
        has_real_match,
        above = hits.len(),
        "initial percentile cut"
    );

    if !has_real_match && hits.is_empty() {
        return Vec::new();
    }

    // Step the threshold down until K candidates qualify. Without a real
    // match the floor stays at the real-match bar so noise cannot creep in.
    let floor = if has_real_match {
        config.epsilon
    } else {
        config.real_match_floor
    };
    for step in &config.step_schedule {
        if hits.len() >= k {
            break;
        }
        let step = step.max(floor);
        if step >= tau {
            continue;
        }
        let mut i = 0;
        while i < rest.len() {
            if rest[i].relevance.value() >= step {
                hits.push(rest.swap_remove(i));
            } else {
                i += 1;
            }
        }
        debug!(step, above = hits.len(), "threshold step-down");
    }

    // Mercy backfill: near-miss fragments just under τ, newest first.
    if hits.len() < k {
        let mercy_floor = (tau - config.mercy_delta).max(config.epsilon);
        let mut mercy: Vec<ScoredFragment> = rest
            .into_iter()
            .filter(|c| c.relevance.value() >= mercy_floor)
            .collect();
        mercy.sort_by(|a, b| {
            b.fragment
                .best_timestamp()
                .cmp(&a.fragment.best_timestamp())
                .then_with(|| a.fragment.id.cmp(&b.fragment.id))
        });
        let needed = k - hits.len();
        let taken = mercy.len().min(needed);
        if taken > 0 {
            debug!(taken, mercy_floor, "mercy backfill");
        }
        hits.extend(mercy.into_iter().take(needed));
    }

    hits
}

/// Final ordering: chaos-weighted score with a fixed bonus for
/// project-scope hits, descending, then id ascending for determinism.
///
/// The scope bonus equals the preference delta, so a project hit ranks
/// above a general hit whenever their scores are within that delta. A
/// single precomputed key keeps the comparator a total order; a pairwise
/// "near-equal" rule is cyclic under mixed scope and chaos.
pub fn rank(results: &mut [ScoredFragment], config: &ThresholdConfig) {
    let key = |r: &ScoredFragment| {
        let scope_bonus = match r.scope {
            ScopeKind::Project => config.scope_preference_delta,
            ScopeKind::General => 0.0,
        };
        r.weighted_score() + scope_bonus
    };
    results.sort_by(|a, b| {
        key(b)
            .total_cmp(&key(a))
            .then_with(|| a.fragment.id.cmp(&b.fragment.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::{Fragment, RelevanceScore};

    fn scored_with_chaos(
        id: &str,
        relevance: f64,
        scope: ScopeKind,
        chaos: f64,
    ) -> ScoredFragment {
        let fragment = Fragment {
            id: id.into(),
            content: "x".into(),
            metadata: recall_core::FragmentMetadata {
                chaos_score: Some(chaos),
                ..Default::default()
            },
            ..Fragment::default()
        };
        ScoredFragment::new(fragment, RelevanceScore::new(relevance), scope)
    }

    // Neutral chaos so tests reason about raw scores.
    fn scored(id: &str, relevance: f64, scope: ScopeKind) -> ScoredFragment {
        scored_with_chaos(id, relevance, scope, 0.0)
    }

    #[test]
    fn percentile_of_sorted_values() {
        let scores = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(percentile(&scores, 0.0), 0.1);
        assert_eq!(percentile(&scores, 1.0), 0.5);
        // 0.65 * 4 = 2.6, floor 2.
        assert_eq!(percentile(&scores, 0.65), 0.3);
        assert_eq!(percentile(&[], 0.65), 0.0);
    }

    #[test]
    fn strong_cluster_excludes_noise_once_k_is_met() {
        let candidates = vec![
            scored("a", 0.90, ScopeKind::General),
            scored("b", 0.88, ScopeKind::General),
            scored("c", 0.87, ScopeKind::General),
            scored("d", 0.86, ScopeKind::General),
            scored("e", 0.85, ScopeKind::General),
            scored("x", 0.05, ScopeKind::General),
            scored("y", 0.04, ScopeKind::General),
        ];
        let out = select(candidates, &QueryIntent::specific(), &ThresholdConfig::default());
        let ids: Vec<&str> = out.iter().map(|c| c.fragment.id.as_str()).collect();
        for id in ["a", "b", "c", "d", "e"] {
            assert!(ids.contains(&id));
        }
        assert!(!ids.contains(&"x") && !ids.contains(&"y"));
    }

    #[test]
    fn sub_epsilon_noise_returns_empty() {
        // Everything scores below ε, so the percentile cut yields nothing,
        // and with no real match the selector refuses to backfill.
        let candidates = vec![
            scored("a", 0.005, ScopeKind::General),
            scored("b", 0.002, ScopeKind::General),
        ];
        let out = select(candidates, &QueryIntent::specific(), &ThresholdConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn step_down_fills_toward_k() {
        // One strong hit plus middling ones; step-down should recover
        // enough to approach K rather than returning a single result.
        let candidates = vec![
            scored("a", 0.9, ScopeKind::General),
            scored("b", 0.12, ScopeKind::General),
            scored("c", 0.11, ScopeKind::General),
            scored("d", 0.11, ScopeKind::General),
            scored("e", 0.02, ScopeKind::General),
        ];
        let out = select(candidates, &QueryIntent::specific(), &ThresholdConfig::default());
        assert!(out.len() >= 4);
    }

    #[test]
    fn rank_prefers_project_scope_at_near_equal_relevance() {
        let mut results = vec![
            scored("general", 0.82, ScopeKind::General),
            scored("project", 0.80, ScopeKind::Project),
        ];
        rank(&mut results, &ThresholdConfig::default());
        assert_eq!(results[0].fragment.id, "project");
    }

    #[test]
    fn rank_orders_mixed_scope_and_chaos_without_cycles() {
        // Pairwise preferences here would cycle under a relative
        // comparator: project beats b on scope at near-equal relevance,
        // b beats c on chaos-weighted score, c beats project on score.
        let mut results = vec![
            scored_with_chaos("project", 0.50, ScopeKind::Project, 0.0),
            scored_with_chaos("b", 0.45, ScopeKind::General, 1.0),
            scored_with_chaos("c", 0.61, ScopeKind::General, 0.0),
        ];
        rank(&mut results, &ThresholdConfig::default());
        let ids: Vec<String> = results.iter().map(|r| r.fragment.id.clone()).collect();
        assert_eq!(ids, vec!["b", "c", "project"]);

        // Re-ranking an already ranked list changes nothing.
        let before = ids.clone();
        rank(&mut results, &ThresholdConfig::default());
        let after: Vec<String> = results.iter().map(|r| r.fragment.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rank_is_deterministic_on_exact_ties() {
        let mut a = vec![
            scored("beta", 0.5, ScopeKind::General),
            scored("alpha", 0.5, ScopeKind::General),
        ];
        rank(&mut a, &ThresholdConfig::default());
        assert_eq!(a[0].fragment.id, "alpha");
    }
}
