//! End-to-end curation run.
//!
//! [`CurationRunner`] drives the whole pipeline:
//! pre-filter → hydrate → index → match & score per build → aggregate →
//! filter rules → sort.
//!
//! Any error aborts the run; no partial result is returned.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::CurationConfig;
use crate::aggregate::{self, BuildScores, ScoreAccumulator};
use crate::artifact::validate::validate_all;
use crate::artifact::{EvaluatedArtifact, Hydrator, MaxRollTable, RawArtifact, ValidationIssue};
use crate::build::{BuildDefinition, CandidatePool};
use crate::error::{CurationError, Result};
use crate::rules::{RuleFilter, Sorter};

/// Where an input record ended up.
#[derive(Debug, Clone)]
enum Origin {
    /// Hydrated under this id.
    Evaluated(String),
    /// Index into `skipped`.
    Skipped(usize),
}

/// Result of a curation run.
#[derive(Debug, Clone)]
pub struct CurationResult {
    /// Artifacts kept by the filter rules, sorted.
    pub kept: Vec<EvaluatedArtifact>,

    /// Scored artifacts excluded by the filter rules, sorted.
    pub excluded: Vec<EvaluatedArtifact>,

    /// Artifacts that matched no build, in input order.
    pub unmatched: Vec<EvaluatedArtifact>,

    /// Records never evaluated: below `min_rarity`, or flagged by the
    /// validators when validation is enabled. Their source `lock` is left
    /// untouched. In input order.
    pub skipped: Vec<RawArtifact>,

    /// Findings of the input validators.
    pub issues: Vec<ValidationIssue>,

    /// Number of builds processed.
    pub builds: usize,

    /// One entry per input record, in input order.
    order: Vec<Origin>,
}

impl CurationResult {
    /// Number of artifacts that received at least one build score.
    pub fn scored_count(&self) -> usize {
        self.kept.len() + self.excluded.len()
    }

    /// Every input record, in input order, with `lock` set to the keep
    /// decision.
    ///
    /// Kept artifacts are locked, excluded and unmatched ones are unlocked.
    /// Skipped records are returned exactly as received.
    pub fn locked_raw(&self) -> Vec<RawArtifact> {
        let evaluated: HashMap<&str, &EvaluatedArtifact> = self
            .kept
            .iter()
            .chain(&self.excluded)
            .chain(&self.unmatched)
            .map(|a| (a.id.as_str(), a))
            .collect();

        self.order
            .iter()
            .filter_map(|origin| match origin {
                Origin::Evaluated(id) => evaluated.get(id.as_str()).map(|a| a.to_locked_raw()),
                Origin::Skipped(i) => self.skipped.get(*i).cloned(),
            })
            .collect()
    }

    /// How many scored artifacts each build matched, most common first.
    pub fn build_counts(&self) -> Vec<(String, usize)> {
        aggregate::build_counts(self.kept.iter().chain(&self.excluded))
    }
}

/// Hands out run-unique artifact ids.
///
/// Source ids are kept as-is; records without one get
/// `<run prefix>-<sequence>`, skipping any value some source record
/// already uses.
struct IdAssigner {
    prefix: String,
    next: usize,
    reserved: HashSet<String>,
    issued: HashSet<String>,
}

fn source_id(raw: &RawArtifact) -> Option<&str> {
    raw.id.as_deref().filter(|id| !id.is_empty())
}

impl IdAssigner {
    /// `records` are the records that will be assigned ids.
    fn new<'a>(seed: Option<u64>, records: impl IntoIterator<Item = &'a RawArtifact>) -> Self {
        let tag: u32 = match seed {
            Some(seed) => StdRng::seed_from_u64(seed).random(),
            None => rand::random(),
        };
        Self {
            prefix: format!("{tag:08x}"),
            next: 0,
            reserved: records
                .into_iter()
                .filter_map(source_id)
                .map(str::to_string)
                .collect(),
            issued: HashSet::new(),
        }
    }

    fn assign(&mut self, raw: &RawArtifact) -> Result<String> {
        let id = match source_id(raw) {
            Some(id) => id.to_string(),
            None => loop {
                self.next += 1;
                let id = format!("{}-{}", self.prefix, self.next);
                if !self.reserved.contains(&id) && !self.issued.contains(&id) {
                    break id;
                }
            },
        };
        if !self.issued.insert(id.clone()) {
            return Err(CurationError::DuplicateArtifactId { artifact_id: id });
        }
        Ok(id)
    }
}

/// Executes curation runs.
///
/// # Usage
///
/// ```
/// use artifact_curator::artifact::{MaxRollTable, RawArtifact};
/// use artifact_curator::build::BuildDefinition;
/// use artifact_curator::pipeline::{CurationConfig, CurationRunner};
///
/// let artifacts = vec![RawArtifact::new("GladiatorsFinale", "flower", "hp", 5, 20)
///     .with_sub_stat("critRate_", 7.8)
///     .with_sub_stat("critDMG_", 14.0)
///     .with_sub_stat("atk_", 5.8)
///     .with_sub_stat("enerRech_", 6.5)];
/// let builds = vec![BuildDefinition::new("Diluc", "DPS")
///     .with_sets(["GladiatorsFinale"])
///     .with_weight("critRate_", 1.0)
///     .with_weight("critDMG_", 1.0)];
///
/// let config = CurationConfig::default().with_seed(1);
/// let result = CurationRunner::run(artifacts, &builds, &MaxRollTable::standard(), &config).unwrap();
/// assert_eq!(result.kept.len(), 1);
/// assert!(result.locked_raw()[0].lock);
/// ```
pub struct CurationRunner;

impl CurationRunner {
    /// Runs the full pipeline over `artifacts`.
    ///
    /// Builds are processed in the given order.
    pub fn run(
        artifacts: Vec<RawArtifact>,
        builds: &[BuildDefinition],
        table: &MaxRollTable,
        config: &CurationConfig,
    ) -> Result<CurationResult> {
        config.validate()?;
        table.validate()?;
        tracing::info!(
            artifacts = artifacts.len(),
            builds = builds.len(),
            filter_rules = config.filter_rules.len(),
            "starting curation run"
        );

        let issues = validate_all(&artifacts);
        for issue in &issues {
            tracing::warn!(
                index = issue.index,
                id = issue.artifact_id.as_deref().unwrap_or("-"),
                set = %issue.set_key,
                "{}",
                issue.kind
            );
        }
        let flagged: HashSet<usize> = if config.validate_input {
            issues.iter().map(|issue| issue.index).collect()
        } else {
            HashSet::new()
        };

        let evaluable = |i: usize, raw: &RawArtifact| {
            raw.rarity >= config.min_rarity && !flagged.contains(&i)
        };
        let hydrator = Hydrator::new(table);
        let mut ids = IdAssigner::new(
            config.seed,
            artifacts
                .iter()
                .enumerate()
                .filter(|&(i, raw)| evaluable(i, raw))
                .map(|(_, raw)| raw),
        );

        let mut order = Vec::with_capacity(artifacts.len());
        let mut skipped = Vec::new();
        let mut hydrated = Vec::new();
        for (i, raw) in artifacts.into_iter().enumerate() {
            if evaluable(i, &raw) {
                let id = ids.assign(&raw)?;
                order.push(Origin::Evaluated(id.clone()));
                hydrated.push(hydrator.hydrate(id, raw)?);
            } else {
                order.push(Origin::Skipped(skipped.len()));
                skipped.push(raw);
            }
        }

        let pool = CandidatePool::index(&hydrated);
        let mut accumulator = ScoreAccumulator::new();
        for scored in Self::score_builds(&pool, &hydrated, builds, config)? {
            accumulator.absorb(&hydrated, &scored);
        }

        let unmatched: Vec<EvaluatedArtifact> = hydrated
            .iter()
            .filter(|a| !accumulator.contains(&a.id))
            .cloned()
            .map(|mut a| {
                a.keep = false;
                a
            })
            .collect();

        let outcome = RuleFilter::apply(accumulator.finish(), &config.filter_rules);
        let mut kept = outcome.kept;
        let mut excluded = outcome.excluded;
        Sorter::sort(&mut kept, &config.sort_rules)?;
        Sorter::sort(&mut excluded, &config.sort_rules)?;

        tracing::info!(
            hydrated = hydrated.len(),
            kept = kept.len(),
            excluded = excluded.len(),
            unmatched = unmatched.len(),
            skipped = skipped.len(),
            "curation run finished"
        );

        Ok(CurationResult {
            kept,
            excluded,
            unmatched,
            skipped,
            issues,
            builds: builds.len(),
            order,
        })
    }

    /// Scores every build, in build order.
    fn score_builds<'a>(
        pool: &CandidatePool,
        artifacts: &[EvaluatedArtifact],
        builds: &'a [BuildDefinition],
        config: &CurationConfig,
    ) -> Result<Vec<BuildScores<'a>>> {
        if cfg!(feature = "parallel") && config.parallel {
            return Self::score_builds_parallel(pool, artifacts, builds);
        }
        builds
            .iter()
            .map(|build| aggregate::score_build(pool, artifacts, build))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_builds_parallel<'a>(
        pool: &CandidatePool,
        artifacts: &[EvaluatedArtifact],
        builds: &'a [BuildDefinition],
    ) -> Result<Vec<BuildScores<'a>>> {
        builds
            .par_iter()
            .map(|build| aggregate::score_build(pool, artifacts, build))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn score_builds_parallel<'a>(
        pool: &CandidatePool,
        artifacts: &[EvaluatedArtifact],
        builds: &'a [BuildDefinition],
    ) -> Result<Vec<BuildScores<'a>>> {
        builds
            .iter()
            .map(|build| aggregate::score_build(pool, artifacts, build))
            .collect()
    }
}
