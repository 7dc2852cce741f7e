use serde::{Deserialize, Serialize};

/// Caller-supplied options for a single `retrieve` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalOptions {
    /// Explicit project scope. Overrides the engine's current-project
    /// context and query-based inference.
    pub project: Option<String>,
    /// Result count cap for this call. The engine's hard cap still applies.
    pub limit: Option<usize>,
    /// Diagnostic escape hatch: post-hoc relevance floor. Bypasses the
    /// adaptive threshold and must not be used as the primary mechanism.
    pub min_relevance: Option<f64>,
    /// Skip intent classification and treat the query as specific.
    pub force_specific: bool,
}

impl RetrievalOptions {
    pub fn with_project(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            ..Self::default()
        }
    }
}
