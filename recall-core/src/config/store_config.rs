use serde::{Deserialize, Serialize};

use super::defaults;

/// Fragment-store limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Fragment files larger than this are skipped with a warning.
    pub max_file_bytes: u64,
    /// Recursion bound for the corpus walk.
    pub max_walk_depth: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: defaults::MAX_FRAGMENT_FILE_BYTES,
            max_walk_depth: defaults::MAX_WALK_DEPTH,
        }
    }
}
