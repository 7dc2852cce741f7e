//! Trait seams between the store and the retrieval engine.

mod retriever;
mod store;

pub use retriever::Retriever;
pub use store::FragmentStore;
