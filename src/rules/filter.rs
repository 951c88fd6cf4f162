//! Rule-based keep/discard partition.
//!
//! Each [`FilterRule`] selects a subset of the working collection with its
//! selectors (ANDed), then its [`FilterAction`] decides which of the
//! selected artifacts to exclude. Rules run in order and exclusions are
//! final: an artifact removed by one rule is invisible to later rules.
//! Artifacts never selected by any rule are kept.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::field::ArtifactField;
use crate::artifact::EvaluatedArtifact;
use crate::error::CurationError;

/// Selects artifacts by one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Matches every artifact.
    Any,
    /// Matches artifacts whose stringified field value is in `values`.
    Field {
        field: ArtifactField,
        values: BTreeSet<String>,
    },
}

impl Selector {
    pub fn field<I, S>(field: ArtifactField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::Field {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, artifact: &EvaluatedArtifact) -> bool {
        match self {
            Selector::Any => true,
            Selector::Field { field, values } => field
                .stringify(artifact)
                .is_some_and(|v| values.contains(&v)),
        }
    }
}

/// What a rule does to the artifacts it selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterAction {
    /// Exclude artifacts whose best score is strictly below the cutoff.
    BelowThreshold(f64),
    /// Keep the N highest best scores, exclude the rest.
    ///
    /// Ties keep their order in the working collection.
    KeepTopN(usize),
}

fn score_of(artifact: &EvaluatedArtifact) -> f64 {
    artifact.best_score().unwrap_or(f64::NEG_INFINITY)
}

impl FilterAction {
    /// Indices, out of `selected`, that this action excludes.
    pub fn excluded(&self, artifacts: &[EvaluatedArtifact], selected: &[usize]) -> Vec<usize> {
        match *self {
            FilterAction::BelowThreshold(cutoff) => selected
                .iter()
                .copied()
                .filter(|&i| score_of(&artifacts[i]) < cutoff)
                .collect(),
            FilterAction::KeepTopN(n) => {
                let mut ranked = selected.to_vec();
                ranked.sort_by(|&a, &b| score_of(&artifacts[b]).total_cmp(&score_of(&artifacts[a])));
                ranked.into_iter().skip(n).collect()
            }
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterAction::BelowThreshold(cutoff) => write!(f, "below-threshold:{cutoff}"),
            FilterAction::KeepTopN(n) => write!(f, "keep-top-n:{n}"),
        }
    }
}

/// Selectors plus the action applied to what they select.
///
/// Parses from `selector:value[;value][,selector:...]=action:param`:
///
/// ```
/// use artifact_curator::rules::{FilterAction, FilterRule};
///
/// let rule: FilterRule = "rank:0;1,rarity:5=below-threshold:0.2".parse().unwrap();
/// assert_eq!(rule.selectors.len(), 2);
/// assert_eq!(rule.action, FilterAction::BelowThreshold(0.2));
///
/// let everything: FilterRule = "*=keep-top-n:50".parse().unwrap();
/// assert_eq!(everything.action, FilterAction::KeepTopN(50));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRule {
    pub selectors: Vec<Selector>,
    pub action: FilterAction,
}

impl FilterRule {
    pub fn new(selectors: Vec<Selector>, action: FilterAction) -> Self {
        Self { selectors, action }
    }

    /// A rule applying `action` to every artifact.
    pub fn everything(action: FilterAction) -> Self {
        Self::new(vec![Selector::Any], action)
    }

    /// Whether every selector matches.
    pub fn selects(&self, artifact: &EvaluatedArtifact) -> bool {
        self.selectors.iter().all(|s| s.matches(artifact))
    }
}

fn parse_selector(rule: &str, text: &str) -> Result<Selector, CurationError> {
    let (key, values) = match text.split_once(':') {
        Some((key, values)) => (key.trim(), values),
        None => (text.trim(), ""),
    };
    if key == "*" {
        return Ok(Selector::Any);
    }
    if key.is_empty() {
        return Err(CurationError::malformed(rule, "empty selector key"));
    }
    let field: ArtifactField = key.parse()?;
    let values: BTreeSet<String> = values
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        return Err(CurationError::malformed(
            rule,
            format!("selector '{key}' has no values"),
        ));
    }
    Ok(Selector::Field { field, values })
}

fn parse_action(rule: &str, text: &str) -> Result<FilterAction, CurationError> {
    let (name, param) = text
        .split_once(':')
        .ok_or_else(|| CurationError::malformed(rule, "action needs a parameter"))?;
    let param = param.trim();
    match name.trim().to_ascii_lowercase().as_str() {
        "below-threshold" => match param.parse::<f64>() {
            Ok(cutoff) if cutoff.is_finite() => Ok(FilterAction::BelowThreshold(cutoff)),
            _ => Err(CurationError::malformed(
                rule,
                format!("threshold '{param}' is not a number"),
            )),
        },
        "keep-top-n" => param.parse::<usize>().map(FilterAction::KeepTopN).map_err(|_| {
            CurationError::malformed(rule, format!("count '{param}' is not a non-negative integer"))
        }),
        other => Err(CurationError::malformed(
            rule,
            format!("unknown action '{other}'"),
        )),
    }
}

impl FromStr for FilterRule {
    type Err = CurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (selectors, action) = s
            .split_once('=')
            .ok_or_else(|| CurationError::malformed(s, "expected 'selectors=action'"))?;
        let selectors = selectors
            .split(',')
            .map(|sel| parse_selector(s, sel))
            .collect::<Result<Vec<_>, _>>()?;
        let action = parse_action(s, action)?;
        Ok(Self { selectors, action })
    }
}

/// Result of running the filter rules.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Survivors, in working-collection order, with `keep` set.
    pub kept: Vec<EvaluatedArtifact>,
    /// Excluded artifacts, in exclusion order, with `keep` cleared.
    pub excluded: Vec<EvaluatedArtifact>,
}

/// Applies filter rules to a scored collection.
pub struct RuleFilter;

impl RuleFilter {
    /// Partitions `artifacts` into kept and excluded.
    pub fn apply(artifacts: Vec<EvaluatedArtifact>, rules: &[FilterRule]) -> FilterOutcome {
        let mut working = artifacts;
        let mut excluded = Vec::new();

        for (n, rule) in rules.iter().enumerate() {
            let selected: Vec<usize> = working
                .iter()
                .enumerate()
                .filter(|(_, a)| rule.selects(a))
                .map(|(i, _)| i)
                .collect();

            let mut drop = vec![false; working.len()];
            for i in rule.action.excluded(&working, &selected) {
                drop[i] = true;
            }

            let before = working.len();
            let (removed, remaining): (Vec<_>, Vec<_>) =
                working.into_iter().zip(drop).partition(|(_, d)| *d);
            working = remaining.into_iter().map(|(a, _)| a).collect();

            tracing::trace!(
                rule = n,
                action = %rule.action,
                selected = selected.len(),
                excluded = removed.len(),
                remaining = working.len(),
                before,
                "applied filter rule"
            );
            excluded.extend(removed.into_iter().map(|(a, _)| a));
        }

        for a in &mut working {
            a.keep = true;
        }
        for a in &mut excluded {
            a.keep = false;
        }
        FilterOutcome {
            kept: working,
            excluded,
        }
    }
}
