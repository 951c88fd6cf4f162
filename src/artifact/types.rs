//! Raw and evaluated artifact records.

use std::fmt;

use crate::error::{CurationError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest rank an artifact can reach (level 20).
pub const MAX_RANK: u8 = 5;

/// Levels per rank step.
pub const LEVELS_PER_RANK: u8 = 4;

/// Highest artifact level.
pub const MAX_LEVEL: u8 = MAX_RANK * LEVELS_PER_RANK;

/// The five equip slots, in canonical in-game order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SlotKey {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

impl SlotKey {
    /// All slots in canonical order.
    pub const ALL: [SlotKey; 5] = [
        SlotKey::Flower,
        SlotKey::Plume,
        SlotKey::Sands,
        SlotKey::Goblet,
        SlotKey::Circlet,
    ];

    /// Parses a GOOD slot key.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "flower" => Some(SlotKey::Flower),
            "plume" => Some(SlotKey::Plume),
            "sands" => Some(SlotKey::Sands),
            "goblet" => Some(SlotKey::Goblet),
            "circlet" => Some(SlotKey::Circlet),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKey::Flower => "flower",
            SlotKey::Plume => "plume",
            SlotKey::Sands => "sands",
            SlotKey::Goblet => "goblet",
            SlotKey::Circlet => "circlet",
        }
    }

    /// Position in [`SlotKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One substat roll as received from the artifact source.
///
/// A missing or empty `key` marks an unused substat line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSubStat {
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: f64,
}

impl RawSubStat {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    /// An unused substat line.
    pub fn empty() -> Self {
        Self {
            key: None,
            value: 0.0,
        }
    }

    /// The stat key, treating an empty string as absent.
    pub fn stat_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// An artifact record in the GOOD interchange layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawArtifact {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,
    pub set_key: String,
    pub slot_key: String,
    pub main_stat_key: String,
    pub rarity: u8,
    pub level: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub substats: Vec<RawSubStat>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lock: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub location: Option<String>,
}

impl RawArtifact {
    pub fn new(
        set_key: impl Into<String>,
        slot_key: impl Into<String>,
        main_stat_key: impl Into<String>,
        rarity: u8,
        level: u8,
    ) -> Self {
        Self {
            id: None,
            set_key: set_key.into(),
            slot_key: slot_key.into(),
            main_stat_key: main_stat_key.into(),
            rarity,
            level,
            substats: Vec::new(),
            lock: false,
            location: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sub_stat(mut self, key: impl Into<String>, value: f64) -> Self {
        self.substats.push(RawSubStat::new(key, value));
        self
    }

    pub fn with_empty_sub_stat(mut self) -> Self {
        self.substats.push(RawSubStat::empty());
        self
    }

    /// Upgrade tier: `level / 4`.
    pub fn rank(&self) -> u8 {
        self.level / LEVELS_PER_RANK
    }
}

/// A substat line augmented with its roll efficiency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubStat {
    pub key: Option<String>,
    pub value: f64,
    /// Average per-roll quality; 1.0 is the theoretical maximum.
    pub efficiency: f64,
}

/// One build's score for an artifact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildScore {
    pub character: String,
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub build_name: String,
    pub score: f64,
}

impl BuildScore {
    /// `"<character> - <build>"`, the label used for build tallies.
    pub fn label(&self) -> String {
        format!("{} - {}", self.character, self.build_name)
    }
}

/// An artifact after hydration, carrying efficiencies and build scores.
///
/// `build_score` only grows, and `best_score` is maintained on every
/// append so it is never stale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EvaluatedArtifact {
    pub id: String,
    pub set_key: String,
    pub slot_key: SlotKey,
    pub main_stat_key: String,
    pub rarity: u8,
    pub level: u8,
    pub rank: u8,
    pub sub_stats: Vec<SubStat>,
    build_score: Vec<BuildScore>,
    best_score: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    best_index: Option<usize>,
    pub keep: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    raw: RawArtifact,
}

impl EvaluatedArtifact {
    /// Builds the evaluated record for `raw` under a run-unique `id`.
    ///
    /// Fails on an unknown slot key or on rarity/level outside 1–5 / 0–20.
    pub fn new(id: String, raw: RawArtifact, sub_stats: Vec<SubStat>) -> Result<Self> {
        let slot_key = SlotKey::parse(&raw.slot_key).ok_or_else(|| CurationError::UnknownSlot {
            artifact_id: id.clone(),
            slot_key: raw.slot_key.clone(),
        })?;
        if !(1..=5).contains(&raw.rarity) {
            return Err(CurationError::OutOfRange {
                artifact_id: id,
                field: "rarity",
                value: raw.rarity,
            });
        }
        if raw.level > MAX_LEVEL {
            return Err(CurationError::OutOfRange {
                artifact_id: id,
                field: "level",
                value: raw.level,
            });
        }

        Ok(Self {
            set_key: raw.set_key.clone(),
            slot_key,
            main_stat_key: raw.main_stat_key.clone(),
            rarity: raw.rarity,
            level: raw.level,
            rank: raw.rank(),
            sub_stats,
            build_score: Vec::new(),
            best_score: None,
            best_index: None,
            keep: raw.lock,
            raw,
            id,
        })
    }

    /// Scores recorded so far, in insertion order.
    pub fn build_scores(&self) -> &[BuildScore] {
        &self.build_score
    }

    /// Maximum recorded score; `None` until one score exists.
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// The entry holding the best score. Ties go to the earliest entry.
    pub fn best_build(&self) -> Option<&BuildScore> {
        self.best_index.map(|i| &self.build_score[i])
    }

    /// Appends a build score and refreshes the best score.
    pub fn record_score(&mut self, entry: BuildScore) {
        let improves = match self.best_score {
            Some(best) => entry.score > best,
            None => true,
        };
        if improves {
            self.best_score = Some(entry.score);
            self.best_index = Some(self.build_score.len());
        }
        self.build_score.push(entry);
    }

    /// The record as received from the source.
    pub fn raw(&self) -> &RawArtifact {
        &self.raw
    }

    /// The source record with its lock state set to the keep flag.
    pub fn to_locked_raw(&self) -> RawArtifact {
        RawArtifact {
            lock: self.keep,
            ..self.raw.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(level: u8) -> RawArtifact {
        RawArtifact::new("GladiatorsFinale", "sands", "atk_", 5, level)
    }

    fn entry(build: &str, score: f64) -> BuildScore {
        BuildScore {
            character: "Diluc".into(),
            build_name: build.into(),
            score,
        }
    }

    #[test]
    fn test_slot_parse_round_trip() {
        for slot in SlotKey::ALL {
            assert_eq!(SlotKey::parse(slot.as_str()), Some(slot));
        }
        assert_eq!(SlotKey::parse("feather"), None);
    }

    #[test]
    fn test_slot_index_matches_order() {
        for (i, slot) in SlotKey::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_rank_from_level() {
        assert_eq!(sample(0).rank(), 0);
        assert_eq!(sample(3).rank(), 0);
        assert_eq!(sample(4).rank(), 1);
        assert_eq!(sample(19).rank(), 4);
        assert_eq!(sample(20).rank(), 5);
    }

    #[test]
    fn test_empty_key_is_absent() {
        let sub = RawSubStat {
            key: Some(String::new()),
            value: 3.0,
        };
        assert!(sub.stat_key().is_none());
        assert!(RawSubStat::empty().stat_key().is_none());
        assert_eq!(RawSubStat::new("hp", 1.0).stat_key(), Some("hp"));
    }

    #[test]
    fn test_new_rejects_unknown_slot() {
        let raw = RawArtifact::new("GladiatorsFinale", "feather", "hp", 5, 0);
        let err = EvaluatedArtifact::new("x".into(), raw, vec![]).unwrap_err();
        assert!(matches!(err, CurationError::UnknownSlot { ref slot_key, .. } if slot_key == "feather"));
    }

    #[test]
    fn test_new_rejects_level_above_twenty() {
        let err = EvaluatedArtifact::new("x".into(), sample(24), vec![]).unwrap_err();
        assert!(matches!(err, CurationError::OutOfRange { field: "level", .. }));
    }

    #[test]
    fn test_level_bound_is_exact() {
        assert!(EvaluatedArtifact::new("x".into(), sample(MAX_LEVEL), vec![]).is_ok());
        for level in 21..=23 {
            let err = EvaluatedArtifact::new("x".into(), sample(level), vec![]).unwrap_err();
            assert!(matches!(err, CurationError::OutOfRange { field: "level", value, .. } if value == level));
        }
    }

    #[test]
    fn test_new_rejects_rarity_zero() {
        let raw = RawArtifact::new("GladiatorsFinale", "sands", "atk_", 0, 0);
        let err = EvaluatedArtifact::new("x".into(), raw, vec![]).unwrap_err();
        assert!(matches!(err, CurationError::OutOfRange { field: "rarity", .. }));
    }

    #[test]
    fn test_best_score_tracks_max() {
        let mut a = EvaluatedArtifact::new("x".into(), sample(20), vec![]).unwrap();
        assert!(a.best_score().is_none());
        assert!(a.best_build().is_none());

        a.record_score(entry("dps", 0.4));
        a.record_score(entry("burst", 0.7));
        a.record_score(entry("support", 0.2));

        assert_eq!(a.build_scores().len(), 3);
        assert_eq!(a.best_score(), Some(0.7));
        assert_eq!(a.best_build().unwrap().build_name, "burst");
    }

    #[test]
    fn test_best_score_tie_keeps_first_build() {
        let mut a = EvaluatedArtifact::new("x".into(), sample(20), vec![]).unwrap();
        a.record_score(entry("first", 0.5));
        a.record_score(entry("second", 0.5));
        assert_eq!(a.best_build().unwrap().build_name, "first");
    }

    #[test]
    fn test_locked_raw_mirrors_keep() {
        let mut a = EvaluatedArtifact::new("x".into(), sample(20), vec![]).unwrap();
        a.keep = true;
        assert!(a.to_locked_raw().lock);
        a.keep = false;
        assert!(!a.to_locked_raw().lock);
        assert_eq!(a.to_locked_raw().set_key, "GladiatorsFinale");
    }
}
