use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Enumerate fragment files (`*.json`) under `root`, depth-bounded.
///
/// Unreadable entries are skipped with a warning; a missing root yields an
/// empty list. Results are sorted so corpus order is stable across runs.
pub(crate) fn fragment_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}
