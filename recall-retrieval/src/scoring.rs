//! Multi-signal relevance scoring.
//!
//! Each fragment is scored against the query as a weighted sum of
//! independent signals: semantic domain alignment, type match, content
//! term density with an exact-phrase shortcut, metadata/filename match,
//! discounted expanded-term credit, a recency bonus, and a small chaos
//! bonus for exploratory queries. The sum clamps into [0, 1].

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use recall_core::config::{ExpansionConfig, ScorerWeights};
use recall_core::models::DomainMatch;
use recall_core::{Fragment, RelevanceScore};

use crate::domains;

/// Words too common to carry signal on their own.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Keywords that mark a query as exploratory, unlocking the chaos bonus.
const EXPLORATORY_KEYWORDS: &[&str] = &["interesting", "random", "explore", "discover", "unusual"];

/// Query-shape context shared across every fragment scored for one query.
pub struct ScoreContext<'a> {
    pub semantic: Option<&'a DomainMatch>,
    pub expanded_terms: &'a [String],
    pub is_name_query: bool,
    pub now: DateTime<Utc>,
}

/// Score one fragment against the query. Pure: same inputs, same score.
pub fn score(
    fragment: &Fragment,
    query: &str,
    ctx: &ScoreContext<'_>,
    weights: &ScorerWeights,
    expansion: &ExpansionConfig,
) -> RelevanceScore {
    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower
        .split_whitespace()
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(w))
        .collect();

    let body = fragment.body().to_lowercase();
    let mut total = 0.0;

    total += semantic_signal(fragment, ctx) * weights.semantic_match;
    total += type_signal(fragment, &query_lower, ctx) * weights.type_match;

    let content = content_signal(&body, &query_lower, &query_words);
    total += content * weights.content_weight(ctx.is_name_query);

    total += metadata_signal(fragment, &query_lower, &query_words, ctx.is_name_query)
        * weights.metadata_weight(ctx.is_name_query);

    total += expanded_signal(&body, &query_lower, ctx.expanded_terms, content, expansion)
        * weights.expanded_match;

    total += temporal_signal(fragment, ctx.now) * weights.temporal_bonus;
    total += chaos_signal(fragment, &query_lower) * weights.chaos_bonus;

    RelevanceScore::new(total)
}

/// Domain alignment: full credit when the fragment's declared domain
/// matches the query's inferred domain, partial when only the fragment's
/// own text lands in the same domain.
fn semantic_signal(fragment: &Fragment, ctx: &ScoreContext<'_>) -> f64 {
    let Some(query_domain) = ctx.semantic else {
        return 0.0;
    };

    if let Some(declared) = &fragment.metadata.domain {
        if declared.eq_ignore_ascii_case(&query_domain.domain) {
            return 0.8
                + if subtype_overlap(fragment, query_domain) {
                    0.2
                } else {
                    0.0
                };
        }
    }

    match domains::detect(fragment.body()) {
        Some(m) if m.domain == query_domain.domain => 0.2,
        _ => 0.0,
    }
}

fn subtype_overlap(fragment: &Fragment, query_domain: &DomainMatch) -> bool {
    fragment
        .metadata
        .subtype
        .as_deref()
        .is_some_and(|s| query_domain.subtypes.iter().any(|q| q.eq_ignore_ascii_case(s)))
}

/// Type match: the query naming the fragment's type (exactly, pluralized,
/// or de-pluralized) is full credit; a same-domain type is half.
fn type_signal(fragment: &Fragment, query_lower: &str, ctx: &ScoreContext<'_>) -> f64 {
    let Some(ftype) = fragment.effective_type() else {
        return 0.0;
    };
    let ftype = ftype.to_lowercase();
    if ftype.is_empty() {
        return 0.0;
    }

    let plural = format!("{ftype}s");
    let singular = ftype.strip_suffix('s').unwrap_or(&ftype);
    if query_lower.contains(&ftype)
        || query_lower.contains(&plural)
        || (!singular.is_empty() && query_lower.contains(singular))
    {
        return 1.0;
    }

    if let Some(query_domain) = ctx.semantic {
        if let Some(type_domain) = domains::detect(&ftype) {
            if type_domain.domain == query_domain.domain {
                return 0.5;
            }
        }
    }

    0.0
}

/// Content density: an exact phrase hit is full credit; otherwise the
/// fraction of query words present, with small bonuses for early matches.
fn content_signal(body: &str, query_lower: &str, query_words: &[&str]) -> f64 {
    if body.is_empty() {
        return 0.0;
    }
    if query_lower.len() > 3 && body.contains(query_lower) {
        return 1.0;
    }
    if query_words.is_empty() {
        return 0.0;
    }

    let mut hits = 0usize;
    let mut position_bonus: f64 = 0.0;
    for word in query_words {
        if let Some(pos) = body.find(word) {
            hits += 1;
            if pos < 100 {
                position_bonus += 0.1;
            } else if pos < 300 {
                position_bonus += 0.05;
            }
        }
    }
    if hits == 0 {
        return 0.0;
    }

    let fraction = hits as f64 / query_words.len() as f64;
    let bonus = (position_bonus * 0.1).min(fraction * 0.2);
    // Scattered words never reach the exact-phrase ceiling, so a verbatim
    // phrase hit always outscores full word coverage.
    (fraction + bonus).min(0.95)
}

/// Filename, folder, author, and tag matches. The filename carries most
/// of the weight for name-like queries.
fn metadata_signal(
    fragment: &Fragment,
    query_lower: &str,
    query_words: &[&str],
    is_name_query: bool,
) -> f64 {
    let mut signal = 0.0;

    if let Some(file_name) = &fragment.metadata.file_name {
        let name_lower = file_name.to_lowercase();
        if query_lower.len() > 3 && name_lower.contains(query_lower) {
            signal += 0.6;
        } else if !query_words.is_empty() {
            let hits = query_words.iter().filter(|w| name_lower.contains(*w)).count();
            let ratio = hits as f64 / query_words.len() as f64;
            signal += ratio * if is_name_query { 0.5 } else { 0.3 };
            // "Alice and Bob.md" style compound names: matching either
            // half is an identity signal.
            if name_lower.contains(" and ") && hits >= 1 {
                signal += 0.3;
            }
        }
    }

    if let Some(folder) = &fragment.metadata.folder {
        let folder_lower = folder.to_lowercase();
        if query_words.iter().any(|w| folder_lower.contains(*w)) {
            signal += 0.2;
        }
    }

    if let Some(author) = &fragment.metadata.author {
        let author_lower = author.to_lowercase();
        if query_words.iter().any(|w| author_lower.contains(*w)) {
            signal += 0.2;
        }
    }

    let tags = fragment.normalized_tags();
    if query_words
        .iter()
        .any(|w| tags.iter().any(|t| t.contains(*w)))
    {
        signal += 0.3;
    }

    signal.min(1.0)
}

/// Credit for expansion-only terms found in the body. Discounted by the
/// decay factor when the user's own words already hit, so expansion never
/// outranks a direct match.
fn expanded_signal(
    body: &str,
    query_lower: &str,
    expanded_terms: &[String],
    direct_content: f64,
    expansion: &ExpansionConfig,
) -> f64 {
    let (_, extra) = crate::expansion::partition_expanded(expanded_terms, query_lower);
    if extra.is_empty() {
        return 0.0;
    }

    let hits = extra.iter().filter(|t| body.contains(*t)).count();
    if hits == 0 {
        return 0.0;
    }

    let fraction = hits as f64 / extra.len() as f64;
    if direct_content > 0.0 {
        fraction * expansion.decay
    } else {
        fraction
    }
}

/// Recency bonus, stepped rather than continuous.
fn temporal_signal(fragment: &Fragment, now: DateTime<Utc>) -> f64 {
    let Some(ts) = fragment.best_timestamp() else {
        return 0.0;
    };
    let age_days = (now - ts).num_days();
    if age_days < 7 {
        0.6
    } else if age_days < 30 {
        0.3
    } else if age_days < 90 {
        0.1
    } else {
        0.0
    }
}

/// Chaos bonus: only exploratory queries reward high-chaos fragments.
fn chaos_signal(fragment: &Fragment, query_lower: &str) -> f64 {
    if EXPLORATORY_KEYWORDS.iter().any(|k| query_lower.contains(k)) {
        fragment.chaos_score()
    } else {
        0.0
    }
}
