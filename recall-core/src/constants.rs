/// General (unscoped) fragment store, relative to the vault root.
pub const GENERAL_CAPSULE_DIR: &str = ".recall/capsules";

/// Per-project fragment stores live under this directory, relative to the
/// vault root: `<PROJECTS_DIR>/<project>/capsules`.
pub const PROJECTS_DIR: &str = ".recall/projects";

/// Subdirectory of a project that holds its fragments.
pub const PROJECT_CAPSULE_SUBDIR: &str = "capsules";

/// Maximum length accepted for a project name.
pub const MAX_PROJECT_NAME_LEN: usize = 100;

/// Maximum length accepted for a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Chaos score assumed when ingestion did not provide one.
pub const DEFAULT_CHAOS_SCORE: f64 = 0.5;
