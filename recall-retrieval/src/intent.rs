//! Query intent classification and tag extraction.
//!
//! Decides whether a query requests an enumerated category ("list my X")
//! or a specific lookup, and flags name-like queries so scoring can shift
//! weight toward filename/metadata matches.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use recall_core::models::{IntentKind, QueryIntent};

use crate::domains;

/// Anchor patterns for enumeration requests. The category noun is the last
/// capture group of whichever pattern matches.
static LIST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^(list|show|what are|give me|display) (all )?(my |the )?(\w+)",
        r"(?i)^all (my |the )?(\w+)",
        r"(?i)^my (\w+)$",
        r"(?i)^get (all |my )?(\w+)",
        r"(?i)^(who|what)\s+(are|were)\s+(my|our)\s+(\w+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static intent pattern"))
    .collect()
});

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("static tag pattern"));

/// Phrases that force a query to `Specific` even when a list anchor also
/// matches ("tell me about my clients" is a lookup, not an enumeration).
const SPECIFIC_PHRASES: &[&str] = &["tell me about", "describe", "explain", "what is"];

/// Lookup verbs that mark a query as name-like.
const NAME_INDICATORS: &[&str] = &["find", "search", "looking for", "client", "person"];

/// Classify a query as categorical or specific.
///
/// Ambiguity defaults to `Specific` — forcing an enumeration the user did
/// not ask for is worse than answering narrowly.
pub fn classify(query: &str) -> QueryIntent {
    let lower = query.to_lowercase();

    if SPECIFIC_PHRASES.iter().any(|p| lower.contains(p)) {
        debug!(query, "specific phrase overrides list anchors");
        return QueryIntent {
            semantic: domains::detect(&lower),
            ..QueryIntent::specific()
        };
    }

    for pattern in LIST_PATTERNS.iter() {
        let Some(caps) = pattern.captures(query) else {
            continue;
        };
        // Category is the last participating capture group.
        let Some(noun) = (1..caps.len()).rev().find_map(|i| caps.get(i)) else {
            continue;
        };
        let raw = noun.as_str().to_lowercase();

        let semantic = domains::detect(&raw);
        let category = match &semantic {
            Some(m) if m.confidence >= 2 => m.canonical_term().to_string(),
            _ => domains::legacy_category(&raw)
                .map(str::to_string)
                .unwrap_or_else(|| domains::normalize_category(&raw)),
        };

        debug!(query, %category, "categorical intent");
        return QueryIntent {
            kind: IntentKind::Categorical { category },
            is_list_query: true,
            // Domain inference over the full query, for scoring reuse.
            semantic: domains::detect(&lower),
        };
    }

    QueryIntent {
        semantic: domains::detect(&lower),
        ..QueryIntent::specific()
    }
}

/// True when the query looks like a personal-name lookup: 1–3 capitalized
/// tokens, "First Last" / "First M. Last" shapes, or a lookup verb.
pub fn is_name_query(query: &str) -> bool {
    let trimmed = query.trim();
    let words: Vec<&str> = trimmed.split_whitespace().collect();

    if (1..=3).contains(&words.len()) {
        let all_name_like = words.iter().all(|w| is_name_token(w));
        if all_name_like {
            return true;
        }
    }

    let lower = trimmed.to_lowercase();
    NAME_INDICATORS.iter().any(|ind| lower.contains(ind))
}

/// A capitalized word ("Angela") or a middle initial ("D.").
fn is_name_token(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    if rest.is_empty() {
        return false;
    }
    // Middle initial: single uppercase letter followed by a period.
    if rest == ['.'] {
        return true;
    }
    rest.iter().all(|c| c.is_ascii_lowercase())
}

/// Extract inline `#tag` filters and return `(tags, cleaned_query)`.
/// Tags are lowercased; the cleaned query has tag tokens stripped and
/// whitespace collapsed.
pub fn extract_tags(query: &str) -> (Vec<String>, String) {
    let tags: Vec<String> = TAG_PATTERN
        .captures_iter(query)
        .map(|c| c[1].to_lowercase())
        .collect();

    if tags.is_empty() {
        return (tags, query.to_string());
    }

    let cleaned = TAG_PATTERN.replace_all(query, "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (tags, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_all_my_clients_is_categorical() {
        let intent = classify("list all my clients");
        assert!(intent.is_categorical());
        assert!(intent.is_list_query);
        // "clients" canonicalizes through the legacy alias map.
        assert_eq!(intent.category(), Some("sales"));
    }

    #[test]
    fn what_are_my_recipes_is_categorical_cooking() {
        let intent = classify("what are my recipes");
        assert!(intent.is_categorical());
        assert_eq!(intent.category(), Some("cooking"));
    }

    #[test]
    fn tell_me_about_forces_specific() {
        // "smith" could plural-fold into a category; the disambiguating
        // phrase wins regardless.
        let intent = classify("tell me about Jane Smith");
        assert!(!intent.is_categorical());
        assert!(!intent.is_list_query);
    }

    #[test]
    fn who_are_our_customers_is_categorical() {
        let intent = classify("who are our customers");
        assert!(intent.is_categorical());
        assert_eq!(intent.category(), Some("sales"));
    }

    #[test]
    fn plain_question_is_specific() {
        let intent = classify("when did the halloumi order arrive");
        assert!(!intent.is_categorical());
    }

    #[test]
    fn name_detection() {
        assert!(is_name_query("Angela Smith"));
        assert!(is_name_query("John D. Smith"));
        assert!(is_name_query("Angela"));
        assert!(is_name_query("find the onboarding doc"));
        assert!(!is_name_query("what did I eat yesterday"));
        assert!(!is_name_query("ANGELA SMITH"));
    }

    #[test]
    fn tag_extraction_strips_and_lowercases() {
        let (tags, clean) = extract_tags("show notes #VIP #q3 about pricing");
        assert_eq!(tags, vec!["vip", "q3"]);
        assert_eq!(clean, "show notes about pricing");
    }

    #[test]
    fn no_tags_leaves_query_untouched() {
        let (tags, clean) = extract_tags("plain query");
        assert!(tags.is_empty());
        assert_eq!(clean, "plain query");
    }
}
