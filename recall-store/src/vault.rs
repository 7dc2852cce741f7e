use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use recall_core::config::StoreConfig;
use recall_core::constants::{GENERAL_CAPSULE_DIR, PROJECTS_DIR, PROJECT_CAPSULE_SUBDIR};
use recall_core::errors::{RecallResult, StoreError};
use recall_core::traits::FragmentStore;
use recall_core::validation::is_valid_project_name;
use recall_core::Fragment;

use crate::walk;

/// Read-only fragment store over a vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
    config: StoreConfig,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: StoreConfig::default(),
        }
    }

    pub fn with_config(root: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Path of the general (unscoped) store.
    pub fn general_path(&self) -> PathBuf {
        self.root.join(GENERAL_CAPSULE_DIR)
    }

    /// Path of a project's store. The name must already be validated.
    pub fn project_path(&self, project: &str) -> PathBuf {
        self.root
            .join(PROJECTS_DIR)
            .join(project)
            .join(PROJECT_CAPSULE_SUBDIR)
    }

    /// Load every valid fragment under `scope_path`, in parallel.
    ///
    /// A missing path is an empty scope. Oversized files, unparsable JSON,
    /// and structurally invalid fragments are skipped with a warning —
    /// partial corpus corruption must never take down a query.
    fn load_scope(&self, scope_path: &Path) -> Vec<Fragment> {
        if !scope_path.exists() {
            debug!(path = %scope_path.display(), "scope path not found, treating as empty");
            return Vec::new();
        }

        let files = walk::fragment_files(scope_path, self.config.max_walk_depth);
        debug!(
            path = %scope_path.display(),
            files = files.len(),
            "enumerating fragment scope"
        );

        files
            .par_iter()
            .filter_map(|file| self.read_fragment(file))
            .collect()
    }

    fn read_fragment(&self, file: &Path) -> Option<Fragment> {
        match std::fs::metadata(file) {
            Ok(meta) if meta.len() > self.config.max_file_bytes => {
                warn!(path = %file.display(), bytes = meta.len(), "fragment file too large, skipping");
                return None;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(path = %file.display(), error = %err, "cannot stat fragment file, skipping");
                return None;
            }
        }

        let raw = match std::fs::read_to_string(file) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "cannot read fragment file, skipping");
                return None;
            }
        };

        let fragment: Fragment = match serde_json::from_str(&raw) {
            Ok(f) => f,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "malformed fragment, skipping");
                return None;
            }
        };

        if !fragment.is_valid() {
            warn!(path = %file.display(), id = %fragment.id, "fragment missing id or body, skipping");
            return None;
        }

        Some(fragment)
    }
}

impl FragmentStore for VaultStore {
    fn load_general(&self) -> RecallResult<Vec<Fragment>> {
        Ok(self.load_scope(&self.general_path()))
    }

    fn load_project(&self, project: &str) -> RecallResult<Vec<Fragment>> {
        if !is_valid_project_name(project) {
            return Err(StoreError::InvalidProjectName {
                name: project.to_string(),
            }
            .into());
        }
        Ok(self.load_scope(&self.project_path(project)))
    }
}
