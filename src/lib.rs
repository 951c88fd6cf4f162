//! Artifact evaluation and curation engine.
//!
//! Takes an inventory of artifacts and a set of character builds, and
//! decides which artifacts are worth keeping:
//!
//! - **Hydration**: every substat roll is converted into an efficiency
//!   relative to its maximum possible roll ([`artifact`]).
//! - **Build scoring**: artifacts are matched against each build's eligible
//!   sets and main stats, then scored with the build's substat weights
//!   normalized to a 0–1 scale ([`build`], [`aggregate`]).
//! - **Curation rules**: filter rules partition the scored artifacts into
//!   kept and excluded, and sort rules order the result ([`rules`]).
//! - **Pipeline**: [`pipeline::CurationRunner`] runs all stages and
//!   reports a lock decision for every input record.
//!
//! # Features
//!
//! - `serde` (default): serde support for the GOOD artifact layout, build
//!   definitions and max-roll tables.
//! - `parallel`: scores builds concurrently with rayon.

pub mod aggregate;
pub mod artifact;
pub mod build;
pub mod catalog;
pub mod error;
pub mod pipeline;
pub mod rules;

pub use error::{CurationError, Result};
