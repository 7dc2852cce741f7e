//! Shared test fixtures: a fluent fragment builder and an on-disk vault
//! writer, so integration tests across crates build corpora the same way.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use recall_core::constants::{GENERAL_CAPSULE_DIR, PROJECT_CAPSULE_SUBDIR, PROJECTS_DIR};
use recall_core::Fragment;

/// Fluent builder for test fragments. Defaults to a freshly-timestamped
/// note with a random id and a one-line body.
pub struct FragmentBuilder {
    fragment: Fragment,
}

impl Default for FragmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentBuilder {
    pub fn new() -> Self {
        let mut fragment = Fragment {
            id: Uuid::new_v4().to_string(),
            content: "fixture fragment".to_string(),
            timestamp: Some(Utc::now()),
            ..Fragment::default()
        };
        fragment.fragment_type = Some("note".to_string());
        Self { fragment }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.fragment.id = id.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.fragment.content = content.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.fragment.summary = summary.into();
        self
    }

    pub fn fragment_type(mut self, kind: impl Into<String>) -> Self {
        self.fragment.fragment_type = Some(kind.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragment.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.fragment.metadata.file_name = Some(name.into());
        self
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.fragment.metadata.folder = Some(folder.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.fragment.metadata.domain = Some(domain.into());
        self
    }

    pub fn chaos_score(mut self, score: f64) -> Self {
        self.fragment.metadata.chaos_score = Some(score);
        self
    }

    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.fragment.timestamp = Some(ts);
        self
    }

    /// Timestamp the fragment `days` days in the past.
    pub fn aged_days(mut self, days: i64) -> Self {
        self.fragment.timestamp = Some(Utc::now() - Duration::days(days));
        self
    }

    pub fn pinned(mut self) -> Self {
        self.fragment.pinned = true;
        self
    }

    pub fn failure(mut self) -> Self {
        self.fragment.metadata.failure = true;
        self
    }

    pub fn build(self) -> Fragment {
        self.fragment
    }
}

/// Writes fragments into a vault directory tree the way ingestion lays it
/// out, for store/engine integration tests over real files.
pub struct VaultWriter {
    root: PathBuf,
}

impl VaultWriter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Write a fragment into the general scope.
    pub fn write_general(&self, fragment: &Fragment) -> io::Result<()> {
        self.write_at(&self.root.join(GENERAL_CAPSULE_DIR), fragment)
    }

    /// Write a fragment into a project scope.
    pub fn write_project(&self, project: &str, fragment: &Fragment) -> io::Result<()> {
        let dir = self
            .root
            .join(PROJECTS_DIR)
            .join(project)
            .join(PROJECT_CAPSULE_SUBDIR);
        self.write_at(&dir, fragment)
    }

    /// Write raw bytes as a capsule file, for corruption scenarios.
    pub fn write_raw(&self, name: &str, contents: &str) -> io::Result<()> {
        let dir = self.root.join(GENERAL_CAPSULE_DIR);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(name), contents)
    }

    fn write_at(&self, dir: &Path, fragment: &Fragment) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(fragment)?;
        fs::write(dir.join(format!("{}.json", fragment.id)), json)
    }
}
