use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CHAOS_SCORE;

/// Typed metadata attached by ingestion, plus an open extension map for
/// ingestion-specific extras the scorer does not rely on.
///
/// Field names are camelCase on the wire because fragments are written by
/// the ingestion collaborator in that convention.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FragmentMetadata {
    /// Vault folder the source note lives in.
    pub folder: Option<String>,
    /// Source file name, without extension.
    pub file_name: Option<String>,
    /// Note author, when known.
    pub author: Option<String>,
    /// Heuristic informativeness in [0, 1].
    pub chaos_score: Option<f64>,
    /// Semantic domain assigned at ingestion time.
    pub domain: Option<String>,
    /// Semantic subtype assigned at ingestion time.
    pub subtype: Option<String>,
    /// Ingestion flagged this fragment as a failed interaction.
    pub failure: bool,
    /// Creation time recorded by ingestion.
    pub created: Option<DateTime<Utc>>,
    /// Anything else ingestion attached. Preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A stored unit of extracted content: the atomic retrievable item.
///
/// Immutable once written. Created by the ingestion collaborator, only ever
/// read by this subsystem, and logically replaced when ingestion rewrites
/// the same `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Fragment {
    /// Unique within the vault.
    pub id: String,
    /// Full text body. May be empty when only a summary exists.
    pub content: String,
    /// Condensed body. May be empty when the full content exists.
    pub summary: String,
    /// Classification tag, e.g. "recipe", "client", "conversation".
    #[serde(rename = "type")]
    pub fragment_type: Option<String>,
    /// Free-text labels, order preserved.
    pub tags: Vec<String>,
    pub metadata: FragmentMetadata,
    /// Creation/reference time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Last time another subsystem touched this fragment.
    pub last_referenced: Option<DateTime<Utc>>,
    /// Owning project namespace, when not derived from the storage path.
    pub project: Option<String>,
    /// Pinned by the user for injection priority.
    pub pinned: bool,
    /// Promoted by review tooling for injection priority.
    pub promoted: bool,
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            id: String::new(),
            content: String::new(),
            summary: String::new(),
            fragment_type: None,
            tags: Vec::new(),
            metadata: FragmentMetadata::default(),
            timestamp: None,
            last_referenced: None,
            project: None,
            pinned: false,
            promoted: false,
        }
    }
}

impl Fragment {
    /// The searchable text body: content, else summary.
    pub fn body(&self) -> &str {
        if self.content.is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }

    /// Structural invariant: an id and at least one non-empty body field.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && (!self.content.is_empty() || !self.summary.is_empty())
    }

    /// Declared type, falling back to a `type` key ingestion may have left
    /// in the open metadata map.
    pub fn effective_type(&self) -> Option<&str> {
        self.fragment_type
            .as_deref()
            .or_else(|| self.metadata.extra.get("type").and_then(|v| v.as_str()))
    }

    /// The most relevant timestamp: last-referenced, else creation.
    pub fn best_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_referenced
            .or(self.timestamp)
            .or(self.metadata.created)
    }

    /// Chaos score with the ingestion default applied.
    pub fn chaos_score(&self) -> f64 {
        self.metadata
            .chaos_score
            .unwrap_or(DEFAULT_CHAOS_SCORE)
            .clamp(0.0, 1.0)
    }

    /// Tags normalized for filtering: lowercased, leading `#` stripped.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim_start_matches('#').to_lowercase())
            .collect()
    }
}
