//! # recall-store
//!
//! File-backed fragment store. Fragments are flat JSON files written by the
//! ingestion collaborator under the vault's `.recall` tree:
//!
//! ```text
//! <vault>/.recall/capsules/                      general scope
//! <vault>/.recall/projects/<name>/capsules/      project scope
//! ```
//!
//! The store is strictly read-only and re-reads the corpus on every call —
//! staleness is unacceptable for a memory feature, so no cache is kept.
//! Corrupt or oversized files are skipped with a warning, never fatal.

mod vault;
mod walk;

pub use vault::VaultStore;
