/// Retrieval subsystem errors.
///
/// A query with no matches is `Ok(vec![])`, never an error; only
/// programming-contract violations surface here.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("invalid category name: {category:?}")]
    InvalidCategory { category: String },
}
