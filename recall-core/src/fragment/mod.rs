//! The fragment ("capsule") data model and its score newtype.

mod base;
mod score;

pub use base::{Fragment, FragmentMetadata};
pub use score::RelevanceScore;
