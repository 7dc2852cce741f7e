/// Fragment-store errors.
///
/// Missing scope paths, unreadable entries, and unparsable fragments are
/// degraded cases handled inside the store (logged, skipped), not errors;
/// only contract violations surface here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid project name: {name:?}")]
    InvalidProjectName { name: String },
}
