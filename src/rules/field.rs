//! Artifact fields addressable by filter selectors and sort rules.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::artifact::EvaluatedArtifact;
use crate::error::CurationError;

/// A field of [`EvaluatedArtifact`] that rules can select or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactField {
    Id,
    SetKey,
    SlotKey,
    MainStatKey,
    Rarity,
    Level,
    Rank,
    BestScore,
}

impl ArtifactField {
    pub const ALL: [ArtifactField; 8] = [
        ArtifactField::Id,
        ArtifactField::SetKey,
        ArtifactField::SlotKey,
        ArtifactField::MainStatKey,
        ArtifactField::Rarity,
        ArtifactField::Level,
        ArtifactField::Rank,
        ArtifactField::BestScore,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ArtifactField::Id => "id",
            ArtifactField::SetKey => "set_key",
            ArtifactField::SlotKey => "slot_key",
            ArtifactField::MainStatKey => "main_stat_key",
            ArtifactField::Rarity => "rarity",
            ArtifactField::Level => "level",
            ArtifactField::Rank => "rank",
            ArtifactField::BestScore => "best_score",
        }
    }

    /// The field's value rendered as text, as selectors compare it.
    ///
    /// Whole-valued scores render with one decimal (`1.0`), matching how
    /// rule files write them. `None` for an absent best score.
    pub fn stringify(self, artifact: &EvaluatedArtifact) -> Option<String> {
        match self {
            ArtifactField::Id => Some(artifact.id.clone()),
            ArtifactField::SetKey => Some(artifact.set_key.clone()),
            ArtifactField::SlotKey => Some(artifact.slot_key.as_str().to_string()),
            ArtifactField::MainStatKey => Some(artifact.main_stat_key.clone()),
            ArtifactField::Rarity => Some(artifact.rarity.to_string()),
            ArtifactField::Level => Some(artifact.level.to_string()),
            ArtifactField::Rank => Some(artifact.rank.to_string()),
            ArtifactField::BestScore => artifact.best_score().map(|s| {
                if s.fract() == 0.0 {
                    format!("{s:.1}")
                } else {
                    format!("{s}")
                }
            }),
        }
    }

    /// Natural ordering of the underlying value: lexical for text,
    /// numeric for numbers, absent scores first.
    pub fn natural_cmp(self, a: &EvaluatedArtifact, b: &EvaluatedArtifact) -> Ordering {
        match self {
            ArtifactField::Id => a.id.cmp(&b.id),
            ArtifactField::SetKey => a.set_key.cmp(&b.set_key),
            ArtifactField::SlotKey => a.slot_key.as_str().cmp(b.slot_key.as_str()),
            ArtifactField::MainStatKey => a.main_stat_key.cmp(&b.main_stat_key),
            ArtifactField::Rarity => a.rarity.cmp(&b.rarity),
            ArtifactField::Level => a.level.cmp(&b.level),
            ArtifactField::Rank => a.rank.cmp(&b.rank),
            ArtifactField::BestScore => match (a.best_score(), b.best_score()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
        }
    }
}

impl FromStr for ArtifactField {
    type Err = CurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ArtifactField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| CurationError::UnknownField {
                key: key.to_string(),
            })
    }
}

impl fmt::Display for ArtifactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
