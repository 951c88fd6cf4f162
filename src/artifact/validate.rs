//! Sanity checks over raw artifact records.
//!
//! Flags records that a scanner most likely misread. The pipeline uses
//! these findings as a pre-filter so malformed records never reach scoring.
//! Only 5-star artifacts are inspected.

use std::fmt;

use super::types::RawArtifact;
use crate::catalog;

/// Substat lines an artifact always rolls with before any upgrade.
const GUARANTEED_SUB_STATS: usize = 3;

/// What is wrong with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A null key among the first three substats.
    MissingEarlySubStat,
    /// Rank above 1 but the fourth substat is still null.
    MissingFourthSubStat,
    /// Rarity higher than the set can drop at.
    RarityAboveSetMax,
    /// Set key not in the canonical set table.
    UnknownSet,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssueKind::MissingEarlySubStat => "null among the first three sub stats",
            IssueKind::MissingFourthSubStat => "null fourth sub stat on upgraded artifact",
            IssueKind::RarityAboveSetMax => "rarity above set maximum",
            IssueKind::UnknownSet => "invalid artifact set",
        };
        f.write_str(text)
    }
}

/// A finding against one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Position of the record in the input sequence.
    pub index: usize,
    pub artifact_id: Option<String>,
    pub set_key: String,
    pub kind: IssueKind,
}

fn sub_stat_missing(raw: &RawArtifact, line: usize) -> bool {
    raw.substats
        .get(line)
        .map_or(true, |sub| sub.stat_key().is_none())
}

/// Every issue found on one record.
pub fn check(raw: &RawArtifact) -> Vec<IssueKind> {
    if raw.rarity != 5 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    if (0..GUARANTEED_SUB_STATS).any(|line| sub_stat_missing(raw, line)) {
        issues.push(IssueKind::MissingEarlySubStat);
    }
    if raw.rank() > 1 && sub_stat_missing(raw, GUARANTEED_SUB_STATS) {
        issues.push(IssueKind::MissingFourthSubStat);
    }
    match catalog::max_rarity(&raw.set_key) {
        Some(max) if raw.rarity > max => issues.push(IssueKind::RarityAboveSetMax),
        Some(_) => {}
        None => issues.push(IssueKind::UnknownSet),
    }
    issues
}

/// Runs [`check`] over a collection, one issue per finding.
pub fn validate_all(artifacts: &[RawArtifact]) -> Vec<ValidationIssue> {
    artifacts
        .iter()
        .enumerate()
        .flat_map(|(index, raw)| {
            check(raw).into_iter().map(move |kind| ValidationIssue {
                index,
                artifact_id: raw.id.clone(),
                set_key: raw.set_key.clone(),
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(level: u8) -> RawArtifact {
        RawArtifact::new("EmblemOfSeveredFate", "sands", "enerRech_", 5, level)
            .with_sub_stat("critRate_", 3.5)
            .with_sub_stat("critDMG_", 7.0)
            .with_sub_stat("atk_", 5.2)
            .with_sub_stat("hp", 269.0)
    }

    #[test]
    fn test_clean_artifact_has_no_issues() {
        assert!(check(&clean(20)).is_empty());
    }

    #[test]
    fn test_null_in_first_three() {
        let mut raw = clean(0);
        raw.substats[1].key = None;
        assert_eq!(check(&raw), vec![IssueKind::MissingEarlySubStat]);
    }

    #[test]
    fn test_null_fourth_only_flagged_past_rank_one() {
        let mut raw = clean(4);
        raw.substats[3].key = None;
        assert!(check(&raw).is_empty());

        raw.level = 8;
        assert_eq!(check(&raw), vec![IssueKind::MissingFourthSubStat]);
    }

    #[test]
    fn test_short_substat_list_counts_as_null() {
        let mut raw = clean(12);
        raw.substats.truncate(3);
        assert_eq!(check(&raw), vec![IssueKind::MissingFourthSubStat]);
    }

    #[test]
    fn test_rarity_above_set_max() {
        let mut raw = clean(0);
        raw.set_key = "Gambler".into();
        assert_eq!(check(&raw), vec![IssueKind::RarityAboveSetMax]);
    }

    #[test]
    fn test_unknown_set() {
        let mut raw = clean(0);
        raw.set_key = "Unheard".into();
        assert_eq!(check(&raw), vec![IssueKind::UnknownSet]);
    }

    #[test]
    fn test_lower_rarity_is_not_inspected() {
        let mut raw = clean(20);
        raw.rarity = 4;
        raw.substats.clear();
        raw.set_key = "Unheard".into();
        assert!(check(&raw).is_empty());
    }

    #[test]
    fn test_validate_all_reports_index() {
        let mut bad = clean(0);
        bad.set_key = "Unheard".into();
        let issues = validate_all(&[clean(0), bad.with_id("b")]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 1);
        assert_eq!(issues[0].artifact_id.as_deref(), Some("b"));
        assert_eq!(issues[0].kind, IssueKind::UnknownSet);
    }
}
