//! Query term expansion.
//!
//! Broadens the literal query with domain root terms, subtype vocabulary,
//! and a small curated synonym table, under a hard term cap. Expanded
//! terms are scored at a discount relative to the user's own words, so
//! expansion can only widen recall, never outrank a direct match.

use recall_core::config::ExpansionConfig;
use recall_core::models::DomainMatch;
use tracing::debug;

/// Curated synonym clusters for high-traffic personal-vault vocabulary.
/// Kept deliberately small; the domain table handles the long tail.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("lifts", &["workout", "exercise", "training", "strength", "gym"]),
    ("lift", &["workout", "exercise", "training", "strength"]),
    ("recipe", &["food", "meal", "cooking", "dish", "preparation"]),
    ("recipes", &["food", "meal", "cooking", "dish"]),
    ("client", &["customer", "account", "contact", "business"]),
    ("clients", &["customer", "account", "contact", "business"]),
];

/// Maximum synonyms contributed per matched cluster.
const SYNONYMS_PER_CLUSTER: usize = 4;

/// Expand a query into a term list: original words first, then domain and
/// synonym terms, deduplicated, capped at `max_terms` (or the larger
/// `max_terms_semantic` when a domain matched).
pub fn expand(query: &str, config: &ExpansionConfig, semantic: Option<&DomainMatch>) -> Vec<String> {
    let lower = query.to_lowercase();
    let mut terms: Vec<String> = Vec::new();

    for word in lower.split_whitespace() {
        push_unique(&mut terms, word);
    }
    let original_count = terms.len();

    if let Some(m) = semantic.filter(|m| m.confidence >= 2) {
        if let Some(entry) = crate::domains::DOMAINS.iter().find(|d| d.name == m.domain) {
            for root in entry.root_terms {
                push_unique(&mut terms, root);
            }
            for subtype in &m.subtypes {
                let vocab = entry
                    .subtypes
                    .iter()
                    .find(|(name, _)| name == subtype)
                    .map(|(_, terms)| *terms)
                    .unwrap_or(&[]);
                push_unique(&mut terms, subtype);
                for term in vocab.iter().take(config.subtype_term_cap) {
                    push_unique(&mut terms, term);
                }
            }
        }
    }

    for (trigger, synonyms) in SYNONYMS {
        if lower.split_whitespace().any(|w| w == *trigger) {
            for syn in synonyms.iter().take(SYNONYMS_PER_CLUSTER) {
                push_unique(&mut terms, syn);
            }
        }
    }

    let cap = if semantic.is_some() {
        config.max_terms_semantic
    } else {
        config.max_terms
    };
    // Original words always survive the cap.
    let cap = cap.max(original_count);
    terms.truncate(cap);

    debug!(
        query,
        expanded = terms.len() - original_count,
        total = terms.len(),
        "expanded query terms"
    );
    terms
}

fn push_unique(terms: &mut Vec<String>, term: &str) {
    if term.len() > 1 && !terms.iter().any(|t| t == term) {
        terms.push(term.to_string());
    }
}

/// Split an expanded term list back into (original, expanded-only) given
/// the raw query, for discounted scoring.
pub fn partition_expanded<'a>(terms: &'a [String], query: &str) -> (Vec<&'a str>, Vec<&'a str>) {
    let lower = query.to_lowercase();
    let original: Vec<&str> = lower.split_whitespace().collect();
    let mut base = Vec::new();
    let mut extra = Vec::new();
    for t in terms {
        if original.iter().any(|o| o == t) {
            base.push(t.as_str());
        } else {
            extra.push(t.as_str());
        }
    }
    (base, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains;

    fn cfg() -> ExpansionConfig {
        ExpansionConfig::default()
    }

    #[test]
    fn original_words_come_first() {
        let terms = expand("bacon halloumi", &cfg(), None);
        assert_eq!(&terms[..2], &["bacon".to_string(), "halloumi".to_string()]);
    }

    #[test]
    fn synonyms_widen_client_queries() {
        let terms = expand("my clients", &cfg(), None);
        assert!(terms.iter().any(|t| t == "customer"));
        assert!(terms.iter().any(|t| t == "contact"));
    }

    #[test]
    fn domain_match_raises_the_cap() {
        let query = "meditation practice notes";
        let m = domains::detect(query);
        let with = expand(query, &cfg(), m.as_ref());
        let without = expand(query, &cfg(), None);
        assert!(with.len() >= without.len());
        assert!(with.len() <= cfg().max_terms_semantic);
    }

    #[test]
    fn cap_is_enforced_without_dropping_originals() {
        let query = "one two three four five six seven eight nine ten";
        let terms = expand(query, &cfg(), None);
        // Ten original words exceed max_terms; all still present.
        assert_eq!(terms.len(), 10);
    }

    #[test]
    fn partition_separates_expansion_terms() {
        let terms = expand("my recipes", &cfg(), None);
        let (base, extra) = partition_expanded(&terms, "my recipes");
        assert!(base.contains(&"recipes"));
        assert!(extra.contains(&"meal"));
    }
}
