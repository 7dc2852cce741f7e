//! Per-subsystem error enums unified under [`RecallError`].

mod retrieval_error;
mod store_error;

pub use retrieval_error::RetrievalError;
pub use store_error::StoreError;

/// Top-level error for the Recall workspace.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type RecallResult<T> = Result<T, RecallError>;
