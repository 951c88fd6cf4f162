//! Normalized build scoring.
//!
//! The normalization factor models the idealized best artifact for a
//! build: a 5-roll artifact whose every upgrade went into the top-weighted
//! stat at max value (6 rolls on it) plus one max roll on each of the next
//! three stats, spread over [`ROLLS_PER_LIFETIME`]:
//!
//! ```text
//! factor = (6·w₁ + w₂ + w₃ + w₄) / 9        (w sorted descending)
//! score  = round(Σ efficiency·weight / factor, 2)
//! ```
//!
//! A score of 1.00 is a perfect artifact for the build.

use super::types::BuildDefinition;
use crate::artifact::{EvaluatedArtifact, ROLLS_PER_LIFETIME};
use crate::error::{CurationError, Result};

/// Rolls the idealized artifact puts into its top stat.
const TOP_STAT_ROLLS: f64 = 6.0;

/// Substat lines an artifact can carry.
const SUB_STAT_LINES: usize = 4;

/// Idealized maximum raw score for `build`.
///
/// Depends only on the multiset of weights, not on their order.
pub fn normalization_factor(build: &BuildDefinition) -> Result<f64> {
    let mut weights: Vec<f64> = build.sub_stats.values().copied().collect();
    weights.sort_by(|a, b| b.total_cmp(a));

    let ideal: f64 = weights
        .iter()
        .take(SUB_STAT_LINES)
        .enumerate()
        .map(|(i, &w)| if i == 0 { w * TOP_STAT_ROLLS } else { w })
        .sum();
    let factor = ideal / ROLLS_PER_LIFETIME;

    if factor <= 0.0 {
        return Err(CurationError::ZeroNormalization {
            character: build.character.clone(),
            build_name: build.build_name.clone(),
        });
    }
    Ok(factor)
}

/// Rounds to two decimal places.
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores artifacts against one build.
///
/// The normalization factor is computed once at construction.
#[derive(Debug, Clone)]
pub struct BuildScorer<'a> {
    build: &'a BuildDefinition,
    factor: f64,
}

impl<'a> BuildScorer<'a> {
    /// Validates `build` and computes its normalization factor.
    pub fn new(build: &'a BuildDefinition) -> Result<Self> {
        build.validate()?;
        let factor = normalization_factor(build)?;
        Ok(Self { build, factor })
    }

    pub fn build(&self) -> &'a BuildDefinition {
        self.build
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Σ efficiency × weight over the artifact's substats.
    pub fn raw_score(&self, artifact: &EvaluatedArtifact) -> f64 {
        artifact
            .sub_stats
            .iter()
            .map(|sub| match sub.key.as_deref() {
                Some(stat) => sub.efficiency * self.build.weight(stat),
                None => 0.0,
            })
            .sum()
    }

    /// Normalized score rounded to two decimals.
    pub fn score(&self, artifact: &EvaluatedArtifact) -> f64 {
        round_score(self.raw_score(artifact) / self.factor)
    }
}
