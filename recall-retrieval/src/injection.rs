//! Context-injection scoring.
//!
//! Ranks already-retrieved fragments for inclusion in an assistant prompt.
//! Unlike retrieval relevance this is an unbounded priority, blending a
//! term-match base with pin/promotion boosts and the epoch decay weight.

use chrono::{DateTime, Utc};

use recall_core::models::Epoch;
use recall_core::Fragment;

use crate::epoch;

const MATCH_BASE: f64 = 10.0;
const CURATION_BOOST: f64 = 5.0;
const RECENT_BOOST: f64 = 3.0;
const CHAT_MISS_PENALTY: f64 = 10.0;

/// Priority of one fragment for prompt injection, given the query terms.
///
/// Matching fragments start from a flat base, raised by a curation boost
/// when pinned or promoted; an unmatched fragment earns nothing, and an
/// unmatched conversation is pushed below zero so it never displaces real
/// content. The epoch weight scales the whole priority, fading old context.
pub fn priority(fragment: &Fragment, query_terms: &[String], now: DateTime<Utc>) -> f64 {
    let haystack = search_text(fragment);
    let matched = query_terms
        .iter()
        .any(|t| !t.is_empty() && haystack.contains(t.as_str()));

    let mut score = 0.0;
    if matched {
        score += MATCH_BASE;
        if fragment.pinned || fragment.promoted {
            score += CURATION_BOOST;
        }
    } else if is_chat(fragment) {
        score -= CHAT_MISS_PENALTY;
    }

    let assignment = epoch::classify(fragment, now);
    if score > 0.0 && assignment.epoch == Epoch::Recent {
        score += RECENT_BOOST;
    }

    score * assignment.weight
}

fn search_text(fragment: &Fragment) -> String {
    let mut text = String::new();
    if let Some(name) = &fragment.metadata.file_name {
        text.push_str(name);
        text.push(' ');
    }
    text.push_str(fragment.body());
    for tag in fragment.normalized_tags() {
        text.push(' ');
        text.push_str(&tag);
    }
    text.to_lowercase()
}

fn is_chat(fragment: &Fragment) -> bool {
    matches!(
        fragment.effective_type(),
        Some("chat") | Some("conversation")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn recent(content: &str) -> Fragment {
        Fragment {
            id: "t".into(),
            content: content.into(),
            timestamp: Some(Utc::now() - Duration::days(1)),
            ..Fragment::default()
        }
    }

    #[test]
    fn matching_recent_fragment_gets_base_plus_recency() {
        let f = recent("notes about halloumi");
        let p = priority(&f, &terms(&["halloumi"]), Utc::now());
        assert_eq!(p, 13.0); // (10 + 3) × 1.0
    }

    #[test]
    fn pinned_fragment_outranks_unpinned_peer() {
        let plain = recent("notes about halloumi");
        let mut pinned = recent("notes about halloumi");
        pinned.pinned = true;
        let q = terms(&["halloumi"]);
        assert!(priority(&pinned, &q, Utc::now()) > priority(&plain, &q, Utc::now()));
    }

    #[test]
    fn unmatched_chat_sinks_below_zero() {
        let mut f = recent("how is the weather");
        f.fragment_type = Some("conversation".into());
        let p = priority(&f, &terms(&["halloumi"]), Utc::now());
        assert!(p < 0.0);
    }

    #[test]
    fn epoch_weight_fades_old_matches() {
        let now = Utc::now();
        let fresh = recent("halloumi");
        let mut old = recent("halloumi");
        old.timestamp = Some(now - Duration::days(400));
        let q = terms(&["halloumi"]);
        let fresh_p = priority(&fresh, &q, now);
        let old_p = priority(&old, &q, now);
        assert!(fresh_p > old_p);
        assert_eq!(old_p, 10.0 * 0.2);
    }

    #[test]
    fn no_match_no_curation_is_zero() {
        let f = recent("unrelated");
        assert_eq!(priority(&f, &terms(&["halloumi"]), Utc::now()), 0.0);
    }

    #[test]
    fn curation_boost_requires_a_term_match() {
        let mut pinned = recent("unrelated");
        pinned.pinned = true;
        assert_eq!(priority(&pinned, &terms(&["halloumi"]), Utc::now()), 0.0);

        let mut promoted = recent("unrelated");
        promoted.promoted = true;
        assert_eq!(priority(&promoted, &terms(&["halloumi"]), Utc::now()), 0.0);
    }

    #[test]
    fn matched_pinned_recent_stacks_all_bonuses() {
        let mut f = recent("notes about halloumi");
        f.pinned = true;
        let p = priority(&f, &terms(&["halloumi"]), Utc::now());
        assert_eq!(p, 18.0); // (10 + 5 + 3) × 1.0
    }
}
