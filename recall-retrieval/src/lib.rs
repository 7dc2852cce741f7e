//! # recall-retrieval
//!
//! The adaptive relevance retrieval subsystem: given a free-text query and
//! a fragment corpus, returns a ranked, deduplicated, temporally-aware
//! subset under a bounded result budget.
//!
//! Pipeline: tag extraction → intent classification → project resolution →
//! scope chain → per-fragment scoring → adaptive percentile threshold →
//! diversity dedup → final ranked, capped list.

pub mod diversity;
pub mod domains;
pub mod engine;
pub mod epoch;
pub mod expansion;
pub mod injection;
pub mod intent;
pub mod scoring;
pub mod threshold;

pub use engine::RetrievalEngine;
