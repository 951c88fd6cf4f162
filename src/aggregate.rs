//! Per-run accumulation of build scores.
//!
//! [`ScoreAccumulator`] owns the canonical record of every artifact that
//! matched at least one build. The first score for an artifact clones it
//! into the accumulator; later scores append to that same record.

use std::collections::HashMap;

use crate::artifact::{BuildScore, EvaluatedArtifact};
use crate::build::{BuildDefinition, BuildScorer, CandidatePool};
use crate::error::Result;

/// Scores of one build: `(artifact index, score)` in match order.
#[derive(Debug, Clone)]
pub struct BuildScores<'a> {
    pub build: &'a BuildDefinition,
    pub scores: Vec<(usize, f64)>,
}

/// Matches and scores every candidate for `build`.
pub fn score_build<'a>(
    pool: &CandidatePool,
    artifacts: &[EvaluatedArtifact],
    build: &'a BuildDefinition,
) -> Result<BuildScores<'a>> {
    let scorer = BuildScorer::new(build)?;
    let scores: Vec<(usize, f64)> = pool
        .match_build(artifacts, build)
        .into_iter()
        .map(|i| (i, scorer.score(&artifacts[i])))
        .collect();

    tracing::debug!(
        build = %build.label(),
        factor = scorer.factor(),
        matched = scores.len(),
        "scored build"
    );
    Ok(BuildScores { build, scores })
}

/// Collects build scores onto one record per artifact id.
#[derive(Debug, Default)]
pub struct ScoreAccumulator {
    positions: HashMap<String, usize>,
    records: Vec<EvaluatedArtifact>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `score` to the record for `artifact`, creating it on first
    /// encounter.
    pub fn record(&mut self, artifact: &EvaluatedArtifact, score: BuildScore) {
        let pos = match self.positions.get(&artifact.id) {
            Some(&pos) => pos,
            None => {
                self.records.push(artifact.clone());
                self.positions
                    .insert(artifact.id.clone(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        self.records[pos].record_score(score);
    }

    /// Records every score of one build.
    pub fn absorb(&mut self, artifacts: &[EvaluatedArtifact], scored: &BuildScores<'_>) {
        for &(i, score) in &scored.scores {
            self.record(
                &artifacts[i],
                BuildScore {
                    character: scored.build.character.clone(),
                    build_name: scored.build.build_name.clone(),
                    score,
                },
            );
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Scored artifacts in first-encounter order.
    ///
    /// Every returned record has at least one build score.
    pub fn finish(self) -> Vec<EvaluatedArtifact> {
        self.records
    }
}

/// Number of artifacts scored per build label, most common first.
///
/// Ties keep first-seen order.
pub fn build_counts<'a, I>(artifacts: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a EvaluatedArtifact>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for entry in artifacts.into_iter().flat_map(|a| a.build_scores()) {
        let label = entry.label();
        match positions.get(&label) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
