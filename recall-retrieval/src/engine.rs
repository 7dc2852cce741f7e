//! Search orchestration.
//!
//! [`RetrievalEngine`] wires the pipeline together: tag extraction, intent
//! classification, project resolution, the scope chain (project first,
//! general fallback), parallel scoring, adaptive thresholding, diversity
//! dedup, and the final ranked, capped result list.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info};

use chrono::Utc;

use recall_core::config::RecallConfig;
use recall_core::errors::RetrievalError;
use recall_core::models::{QueryIntent, RetrievalOptions, ScopeKind, ScoredFragment};
use recall_core::traits::{FragmentStore, Retriever};
use recall_core::validation::is_valid_category;
use recall_core::{Fragment, RecallResult, RelevanceScore};

use crate::{diversity, domains, expansion, intent, scoring, threshold};

/// Phrases that mark a stored assistant turn as a failed interaction;
/// such turns are filtered out so they never resurface as "memory".
const FAILURE_PHRASES: &[&str] = &[
    "i don't have",
    "no client data",
    "would you like me to re-index",
    "i don't see any",
    "no information about",
];

/// The retrieval pipeline over a borrowed fragment store.
///
/// Stateless across calls: every `retrieve` re-reads the store, so
/// fragments written between calls are visible immediately.
pub struct RetrievalEngine<'a> {
    store: &'a dyn FragmentStore,
    config: RecallConfig,
    current_project: Option<String>,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(store: &'a dyn FragmentStore, config: RecallConfig) -> Self {
        Self {
            store,
            config,
            current_project: None,
        }
    }

    /// Ambient project context from the host, consulted after the
    /// per-call option but before query-based inference.
    pub fn with_current_project(mut self, project: impl Into<String>) -> Self {
        self.current_project = Some(project.into());
        self
    }

    /// Resolve the project scope for a query: explicit option, then the
    /// engine's current-project context, then keyword inference.
    fn resolve_project(
        &self,
        options: &RetrievalOptions,
        query_lower: &str,
        intent: &QueryIntent,
    ) -> Option<String> {
        if let Some(p) = &options.project {
            return Some(p.clone());
        }
        if let Some(p) = &self.current_project {
            return Some(p.clone());
        }

        // Keyword table first. BTreeMap iteration keeps inference
        // deterministic when several keywords hit.
        for word in query_lower.split_whitespace() {
            if let Some(project) = self.config.project_keywords.get(word) {
                debug!(word, project, "project inferred from keyword");
                return Some(project.clone());
            }
        }

        // Semantic fallback: the matched domain or one of its subtypes may
        // itself be a keyword ("physical" → "lifts").
        if let Some(m) = &intent.semantic {
            for key in m.subtypes.iter().chain(std::iter::once(&m.domain)) {
                if let Some(project) = self.config.project_keywords.get(key) {
                    debug!(key, project, "project inferred from semantic domain");
                    return Some(project.clone());
                }
            }
        }

        None
    }

    /// Categorical short-circuit: an enumeration query against a resolved
    /// project returns the whole project scope at maximum relevance,
    /// newest first. An empty project falls back to general fragments
    /// that match the category.
    fn retrieve_categorical(
        &self,
        category: &str,
        project: &str,
        tags: &[String],
        options: &RetrievalOptions,
    ) -> RecallResult<Vec<ScoredFragment>> {
        let project_fragments = self.store.load_project(project)?;

        let (fragments, scope) = if project_fragments.is_empty() {
            let general: Vec<Fragment> = self
                .store
                .load_general()?
                .into_iter()
                .filter(|f| matches_category(f, category))
                .collect();
            (general, ScopeKind::General)
        } else {
            (project_fragments, ScopeKind::Project)
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<ScoredFragment> = fragments
            .into_iter()
            .filter(|f| seen.insert(f.id.clone()))
            .filter(|f| has_all_tags(f, tags))
            .map(|f| ScoredFragment::new(f, RelevanceScore::MAX, scope))
            .collect();

        results.sort_by(|a, b| {
            b.fragment
                .best_timestamp()
                .cmp(&a.fragment.best_timestamp())
                .then_with(|| a.fragment.id.cmp(&b.fragment.id))
        });
        results.truncate(self.result_cap(options));

        info!(
            category,
            project,
            count = results.len(),
            "categorical retrieval"
        );
        Ok(results)
    }

    /// Scored path: gather the scope chain, score in parallel, then
    /// threshold, rank, dedup, and cap.
    fn retrieve_scored(
        &self,
        query: &str,
        intent: &QueryIntent,
        project: Option<&str>,
        tags: &[String],
        options: &RetrievalOptions,
    ) -> RecallResult<Vec<ScoredFragment>> {
        let mut candidates: Vec<(Fragment, ScopeKind)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(project) = project {
            for f in self.store.load_project(project)? {
                if seen.insert(f.id.clone()) {
                    candidates.push((f, ScopeKind::Project));
                }
            }
        }
        for f in self.store.load_general()? {
            if seen.insert(f.id.clone()) {
                candidates.push((f, ScopeKind::General));
            }
        }

        candidates.retain(|(f, _)| !is_failed_interaction(f));
        debug!(candidates = candidates.len(), "scope chain gathered");

        let expanded = expansion::expand(query, &self.config.expansion, intent.semantic.as_ref());
        let ctx = scoring::ScoreContext {
            semantic: intent.semantic.as_ref(),
            expanded_terms: &expanded,
            is_name_query: intent::is_name_query(query),
            now: Utc::now(),
        };

        let scored: Vec<ScoredFragment> = candidates
            .into_par_iter()
            .map(|(fragment, scope)| {
                let relevance = scoring::score(
                    &fragment,
                    query,
                    &ctx,
                    &self.config.scorer,
                    &self.config.expansion,
                );
                ScoredFragment::new(fragment, relevance, scope)
            })
            .collect();

        let mut results = threshold::select(scored, intent, &self.config.threshold);
        threshold::rank(&mut results, &self.config.threshold);
        results.retain(|r| has_all_tags(&r.fragment, tags));

        let k = if intent.is_list_query {
            self.config.threshold.k_list
        } else {
            self.config.threshold.k_default
        };
        let mut results = diversity::apply(results, k);
        results.truncate(self.result_cap(options));

        // Diagnostic escape hatch; never allowed to empty a nonempty set.
        if let Some(floor) = options.min_relevance {
            let filtered: Vec<ScoredFragment> = results
                .iter()
                .filter(|r| r.relevance.value() >= floor)
                .cloned()
                .collect();
            if !filtered.is_empty() {
                results = filtered;
            }
        }

        info!(
            query,
            project = project.unwrap_or("-"),
            count = results.len(),
            "scored retrieval"
        );
        Ok(results)
    }

    fn result_cap(&self, options: &RetrievalOptions) -> usize {
        let max = self.config.threshold.max_results;
        options.limit.map_or(max, |l| l.min(max))
    }
}

impl Retriever for RetrievalEngine<'_> {
    fn retrieve(
        &self,
        query: &str,
        options: &RetrievalOptions,
    ) -> RecallResult<Vec<ScoredFragment>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(RetrievalError::EmptyQuery.into());
        }

        let (tags, clean) = intent::extract_tags(trimmed);
        let query_lower = clean.to_lowercase();

        let intent = if options.force_specific {
            QueryIntent {
                semantic: domains::detect(&query_lower),
                ..QueryIntent::specific()
            }
        } else {
            intent::classify(&clean)
        };

        // Captured category nouns feed filename-adjacent logic; the same
        // character/length rules as project names apply.
        if let Some(category) = intent.category() {
            if !is_valid_category(category) {
                return Err(RetrievalError::InvalidCategory {
                    category: category.to_string(),
                }
                .into());
            }
        }

        let project = self.resolve_project(options, &query_lower, &intent);
        debug!(
            query = %clean,
            categorical = intent.is_categorical(),
            project = project.as_deref().unwrap_or("-"),
            tags = tags.len(),
            "retrieval dispatch"
        );

        match (intent.category(), project.as_deref()) {
            (Some(category), Some(project)) => {
                self.retrieve_categorical(category, project, &tags, options)
            }
            _ => self.retrieve_scored(&clean, &intent, project.as_deref(), &tags, options),
        }
    }

    fn classify_intent(&self, query: &str) -> QueryIntent {
        intent::classify(query.trim())
    }
}

/// Category match for general-scope fallback: the fragment's type or tags
/// name the category, modulo plural folding.
fn matches_category(fragment: &Fragment, category: &str) -> bool {
    let category = category.to_lowercase();
    let folded = domains::fold_plural(&category);

    if let Some(ftype) = fragment.effective_type() {
        let ftype = ftype.to_lowercase();
        if domains::fold_plural(&ftype) == folded {
            return true;
        }
        // A canonical subtype category ("cooking") covers the types its
        // vocabulary names ("recipes").
        if let Some(vocab) = domains::subtype_vocabulary(&category) {
            let fold = domains::fold_plural(&ftype);
            if vocab.iter().any(|t| domains::fold_plural(t) == fold) {
                return true;
            }
        }
    }

    fragment
        .normalized_tags()
        .iter()
        .any(|t| domains::fold_plural(t) == folded)
}

fn has_all_tags(fragment: &Fragment, required: &[String]) -> bool {
    if required.is_empty() {
        return true;
    }
    let tags = fragment.normalized_tags();
    required.iter().all(|r| tags.iter().any(|t| t == r))
}

/// A fragment recording an interaction that produced nothing useful.
/// Ingestion flags most of these; phrase matching catches older corpora.
fn is_failed_interaction(fragment: &Fragment) -> bool {
    if fragment.metadata.failure {
        return true;
    }
    let is_chat = matches!(
        fragment.effective_type(),
        Some("chat") | Some("conversation")
    );
    if !is_chat {
        return false;
    }
    let body = fragment.body().to_lowercase();
    FAILURE_PHRASES.iter().any(|p| body.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(id: &str, content: &str) -> Fragment {
        Fragment {
            id: id.into(),
            content: content.into(),
            ..Fragment::default()
        }
    }

    #[test]
    fn failed_interactions_are_filtered() {
        let mut flagged = fragment("a", "anything");
        flagged.metadata.failure = true;
        assert!(is_failed_interaction(&flagged));

        let mut apology = fragment("b", "I don't have no client data for that");
        apology.fragment_type = Some("conversation".into());
        assert!(is_failed_interaction(&apology));

        // The same phrase in a note is content, not a failed turn.
        let note = fragment("c", "I don't have the receipt anymore");
        assert!(!is_failed_interaction(&note));
    }

    #[test]
    fn category_matching_folds_plurals() {
        let mut f = fragment("a", "carbonara");
        f.fragment_type = Some("recipe".into());
        assert!(matches_category(&f, "recipes"));
        assert!(matches_category(&f, "recipe"));
        assert!(!matches_category(&f, "clients"));

        let mut tagged = fragment("b", "note");
        tagged.tags = vec!["#clients".into()];
        assert!(matches_category(&tagged, "client"));
    }

    #[test]
    fn tag_filter_requires_every_tag() {
        let mut f = fragment("a", "x");
        f.tags = vec!["#VIP".into(), "q3".into()];
        assert!(has_all_tags(&f, &["vip".into()]));
        assert!(has_all_tags(&f, &["vip".into(), "q3".into()]));
        assert!(!has_all_tags(&f, &["vip".into(), "q4".into()]));
    }
}
