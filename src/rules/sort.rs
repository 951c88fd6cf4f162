//! Multi-key sorting with the game's canonical set and slot orders.
//!
//! The sorter folds over the rules in reverse declared order, doing a full
//! stable sort per rule. The rule applied last decides the primary order;
//! every rule applied before it only survives as a tie-breaker. With
//! `best_score:desc,set_key:asc`, artifacts end up ordered by score with
//! equal scores grouped in canonical set order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::field::ArtifactField;
use crate::artifact::EvaluatedArtifact;
use crate::catalog;
use crate::error::{CurationError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// One `(key, direction)` sort term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRule {
    pub field: ArtifactField,
    pub direction: SortDirection,
}

impl SortRule {
    pub fn asc(field: ArtifactField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: ArtifactField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{dir}", self.field)
    }
}

impl FromStr for SortRule {
    type Err = CurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (key, dir) = match s.split_once(':') {
            Some((key, dir)) => (key, dir.trim()),
            None => (s, "asc"),
        };
        let field: ArtifactField = key.parse()?;
        let direction = match dir.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                return Err(CurationError::malformed(
                    s,
                    format!("unknown sort order '{other}'"),
                ))
            }
        };
        Ok(Self { field, direction })
    }
}

/// Parses comma-separated `key:order` terms, in declared order.
///
/// ```
/// use artifact_curator::rules::{parse_sort_rules, ArtifactField, SortRule};
///
/// let rules = parse_sort_rules("best_score:desc,set_key:asc").unwrap();
/// assert_eq!(rules, vec![
///     SortRule::desc(ArtifactField::BestScore),
///     SortRule::asc(ArtifactField::SetKey),
/// ]);
/// ```
pub fn parse_sort_rules(text: &str) -> Result<Vec<SortRule>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Applies sort rules.
pub struct Sorter;

impl Sorter {
    /// Sorts `artifacts` in place.
    ///
    /// Fails if a set key is missing from the canonical set table.
    pub fn sort(artifacts: &mut Vec<EvaluatedArtifact>, rules: &[SortRule]) -> Result<()> {
        // Apply from least to most significant: the last-declared rule sorts
        // first, the first-declared rule sorts last and is primary.
        for rule in rules.iter().rev() {
            match rule.field {
                ArtifactField::SetKey => Self::sort_by_set(artifacts, rule.direction)?,
                ArtifactField::SlotKey => artifacts
                    .sort_by(|a, b| rule.direction.apply(a.slot_key.index().cmp(&b.slot_key.index()))),
                field => artifacts.sort_by(|a, b| rule.direction.apply(field.natural_cmp(a, b))),
            }
        }
        Ok(())
    }

    /// Stable sort by canonical set position.
    fn sort_by_set(artifacts: &mut Vec<EvaluatedArtifact>, direction: SortDirection) -> Result<()> {
        let positions = artifacts
            .iter()
            .map(|a| {
                catalog::set_position(&a.set_key).ok_or_else(|| CurationError::UnknownSet {
                    artifact_id: a.id.clone(),
                    set_key: a.set_key.clone(),
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut keyed: Vec<(usize, EvaluatedArtifact)> =
            positions.into_iter().zip(artifacts.drain(..)).collect();
        keyed.sort_by(|a, b| direction.apply(a.0.cmp(&b.0)));
        artifacts.extend(keyed.into_iter().map(|(_, a)| a));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{BuildScore, RawArtifact};

    fn art(id: &str, set: &str, slot: &str, level: u8, score: f64) -> EvaluatedArtifact {
        let raw = RawArtifact::new(set, slot, "hp", 5, level);
        let mut a = EvaluatedArtifact::new(id.into(), raw, vec![]).unwrap();
        a.record_score(BuildScore {
            character: "Bennett".into(),
            build_name: "Support".into(),
            score,
        });
        a
    }

    fn ids(artifacts: &[EvaluatedArtifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_set_uses_canonical_order() {
        // Canonical: GildedDreams < NoblesseOblige < GladiatorsFinale < Adventurer
        let mut arts = vec![
            art("adv", "Adventurer", "flower", 0, 0.1),
            art("glad", "GladiatorsFinale", "flower", 0, 0.1),
            art("gild", "GildedDreams", "flower", 0, 0.1),
            art("no", "NoblesseOblige", "flower", 0, 0.1),
        ];
        Sorter::sort(&mut arts, &[SortRule::asc(ArtifactField::SetKey)]).unwrap();
        assert_eq!(ids(&arts), vec!["gild", "no", "glad", "adv"]);

        Sorter::sort(&mut arts, &[SortRule::desc(ArtifactField::SetKey)]).unwrap();
        assert_eq!(ids(&arts), vec!["adv", "glad", "no", "gild"]);
    }

    #[test]
    fn test_slot_uses_canonical_order() {
        let mut arts = vec![
            art("c", "PaleFlame", "circlet", 0, 0.1),
            art("p", "PaleFlame", "plume", 0, 0.1),
            art("s", "PaleFlame", "sands", 0, 0.1),
            art("f", "PaleFlame", "flower", 0, 0.1),
            art("g", "PaleFlame", "goblet", 0, 0.1),
        ];
        Sorter::sort(&mut arts, &[SortRule::asc(ArtifactField::SlotKey)]).unwrap();
        assert_eq!(ids(&arts), vec!["f", "p", "s", "g", "c"]);
    }

    #[test]
    fn test_unknown_set_is_an_error() {
        let mut arts = vec![art("x", "Unheard", "flower", 0, 0.1)];
        let err = Sorter::sort(&mut arts, &[SortRule::asc(ArtifactField::SetKey)]).unwrap_err();
        assert!(matches!(err, CurationError::UnknownSet { ref artifact_id, .. } if artifact_id == "x"));
        assert_eq!(arts.len(), 1);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut arts = vec![
            art("first", "PaleFlame", "flower", 0, 0.5),
            art("other", "PaleFlame", "flower", 0, 0.9),
            art("second", "PaleFlame", "flower", 0, 0.5),
        ];
        Sorter::sort(&mut arts, &[SortRule::asc(ArtifactField::BestScore)]).unwrap();
        assert_eq!(ids(&arts), vec!["first", "second", "other"]);

        let mut arts = vec![
            art("first", "PaleFlame", "flower", 0, 0.5),
            art("other", "PaleFlame", "flower", 0, 0.9),
            art("second", "PaleFlame", "flower", 0, 0.5),
        ];
        Sorter::sort(&mut arts, &[SortRule::desc(ArtifactField::BestScore)]).unwrap();
        assert_eq!(ids(&arts), vec!["other", "first", "second"]);
    }

    #[test]
    fn test_rules_fold_in_reverse_declared_order() {
        let make = || {
            vec![
                art("a", "PaleFlame", "sands", 20, 0.4),
                art("b", "PaleFlame", "flower", 0, 0.9),
                art("c", "PaleFlame", "flower", 20, 0.4),
                art("d", "PaleFlame", "sands", 0, 0.9),
            ]
        };

        // Score sorts last and is primary; slot breaks its ties.
        let mut arts = make();
        let rules = [
            SortRule::desc(ArtifactField::BestScore),
            SortRule::asc(ArtifactField::SlotKey),
        ];
        Sorter::sort(&mut arts, &rules).unwrap();
        assert_eq!(ids(&arts), vec!["b", "d", "c", "a"]);

        // Swapping the declaration makes slot primary.
        let mut arts = make();
        let rules = [
            SortRule::asc(ArtifactField::SlotKey),
            SortRule::desc(ArtifactField::BestScore),
        ];
        Sorter::sort(&mut arts, &rules).unwrap();
        assert_eq!(ids(&arts), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_numeric_fields_sort_numerically() {
        let mut arts = vec![
            art("l16", "PaleFlame", "flower", 16, 0.1),
            art("l4", "PaleFlame", "flower", 4, 0.1),
            art("l20", "PaleFlame", "flower", 20, 0.1),
        ];
        Sorter::sort(&mut arts, &[SortRule::asc(ArtifactField::Level)]).unwrap();
        assert_eq!(ids(&arts), vec!["l4", "l16", "l20"]);
    }

    #[test]
    fn test_parse_sort_rules() {
        let rules = parse_sort_rules("rank:desc, slot_key").unwrap();
        assert_eq!(
            rules,
            vec![SortRule::desc(ArtifactField::Rank), SortRule::asc(ArtifactField::SlotKey)]
        );
        assert!(matches!(
            parse_sort_rules("rank:sideways"),
            Err(CurationError::MalformedRule { .. })
        ));
        assert!(matches!(
            parse_sort_rules("weight:asc"),
            Err(CurationError::UnknownField { .. })
        ));
        assert!(parse_sort_rules("").unwrap().is_empty());
    }

    #[test]
    fn test_rule_display_round_trips() {
        let rule = SortRule::desc(ArtifactField::BestScore);
        assert_eq!(rule.to_string().parse::<SortRule>().unwrap(), rule);
    }
}
