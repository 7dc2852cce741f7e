use crate::errors::RecallResult;
use crate::models::{QueryIntent, RetrievalOptions, ScoredFragment};

/// The retrieval seam exposed to host collaborators (chat pipeline,
/// injection layers). In-process only; no wire protocol.
pub trait Retriever {
    /// Ranked, deduplicated, capped fragments relevant to `query`.
    /// No-match is `Ok(vec![])`, explicitly distinct from an error.
    fn retrieve(
        &self,
        query: &str,
        options: &RetrievalOptions,
    ) -> RecallResult<Vec<ScoredFragment>>;

    /// Classify a query without running the search.
    fn classify_intent(&self, query: &str) -> QueryIntent;
}
