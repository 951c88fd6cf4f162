//! The end-to-end curation pipeline.
//!
//! Wires the stages together in a fixed order: validate → hydrate →
//! index → match and score per build → aggregate → filter → sort. Every
//! input record comes back through [`CurationResult::locked_raw`]: evaluated
//! ones with their keep decision, skipped ones unchanged.

mod config;
mod runner;

pub use config::CurationConfig;
pub use runner::{CurationResult, CurationRunner};
