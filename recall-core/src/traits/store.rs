use crate::errors::RecallResult;
use crate::fragment::Fragment;

/// Read-only access to the fragment corpus.
///
/// Implementations must treat a missing or unreadable scope as an empty
/// result (logged), never an error: one scope's failure must not prevent
/// other scopes from contributing. Every call re-reads durable storage —
/// fragments may be created by the ingestion collaborator between calls,
/// so no cached view is authoritative.
pub trait FragmentStore: Send + Sync {
    /// All valid fragments in the general (unscoped) store.
    fn load_general(&self) -> RecallResult<Vec<Fragment>>;

    /// All valid fragments in a project's store.
    /// Returns `StoreError::InvalidProjectName` for malformed names.
    fn load_project(&self, project: &str) -> RecallResult<Vec<Fragment>>;
}
