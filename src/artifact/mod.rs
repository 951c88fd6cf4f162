//! Artifact records and substat efficiency hydration.
//!
//! # Key Types
//!
//! - [`RawArtifact`]: a record as received from the artifact source (GOOD layout)
//! - [`EvaluatedArtifact`]: the per-run record carrying efficiencies and build scores
//! - [`MaxRollTable`]: `(substat, rarity) → max roll` constants
//! - [`Hydrator`]: turns raw records into evaluated ones
//!
//! # Submodules
//!
//! - [`validate`]: checks that flag misread source records before scoring

mod hydrate;
mod types;
pub mod validate;

pub use hydrate::{Hydrator, MaxRollTable, ROLLS_PER_LIFETIME};
pub use types::{
    BuildScore, EvaluatedArtifact, RawArtifact, RawSubStat, SlotKey, SubStat, LEVELS_PER_RANK,
    MAX_LEVEL, MAX_RANK,
};
pub use validate::{IssueKind, ValidationIssue};
