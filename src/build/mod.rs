//! Build definitions, candidate matching and scoring.
//!
//! # Key Types
//!
//! - [`BuildDefinition`]: eligible sets/main stats and substat weights for one build
//! - [`CandidatePool`]: artifacts indexed by set and slot; selects a build's candidates
//! - [`BuildScorer`]: normalized per-artifact score against one build

mod pool;
mod scorer;
mod types;

pub use pool::CandidatePool;
pub use scorer::{normalization_factor, round_score, BuildScorer};
pub use types::{BuildDefinition, BuildFilter};
