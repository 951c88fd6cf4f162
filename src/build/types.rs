//! Build definitions.

use std::collections::BTreeMap;

use crate::artifact::SlotKey;
use crate::error::{CurationError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which artifacts a build accepts.
///
/// Flower and plume carry a fixed main stat and are constrained by set only.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildFilter {
    /// Allowed set keys.
    #[cfg_attr(feature = "serde", serde(rename = "set", default))]
    pub sets: Vec<String>,
    /// Allowed sands main stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sands: Vec<String>,
    /// Allowed goblet main stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub goblet: Vec<String>,
    /// Allowed circlet main stats.
    #[cfg_attr(feature = "serde", serde(default))]
    pub circlet: Vec<String>,
}

impl BuildFilter {
    /// Allowed main stats for `slot`, or `None` if the slot is unconstrained.
    pub fn main_stats(&self, slot: SlotKey) -> Option<&[String]> {
        match slot {
            SlotKey::Flower | SlotKey::Plume => None,
            SlotKey::Sands => Some(&self.sands),
            SlotKey::Goblet => Some(&self.goblet),
            SlotKey::Circlet => Some(&self.circlet),
        }
    }

    /// Whether `main_stat` is acceptable in `slot`.
    pub fn allows_main_stat(&self, slot: SlotKey, main_stat: &str) -> bool {
        self.main_stats(slot)
            .map_or(true, |allowed| allowed.iter().any(|s| s == main_stat))
    }
}

/// A named scoring profile for one character.
///
/// # Examples
///
/// ```
/// use artifact_curator::build::BuildDefinition;
///
/// let build = BuildDefinition::new("Diluc", "Vaporize DPS")
///     .with_sets(["CrimsonWitchOfFlames", "GladiatorsFinale"])
///     .with_sands(["atk_"])
///     .with_goblet(["pyro_dmg_"])
///     .with_circlet(["critRate_", "critDMG_"])
///     .with_weight("critRate_", 1.0)
///     .with_weight("critDMG_", 1.0)
///     .with_weight("atk_", 0.75);
/// assert!(build.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildDefinition {
    pub character: String,
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub build_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: BuildFilter,
    /// Substat weights, keyed by stat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_stats: BTreeMap<String, f64>,
}

impl BuildDefinition {
    pub fn new(character: impl Into<String>, build_name: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            build_name: build_name.into(),
            filter: BuildFilter::default(),
            sub_stats: BTreeMap::new(),
        }
    }

    /// Parses one build from JSON and validates it.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let build: Self = serde_json::from_str(json)?;
        build.validate()?;
        Ok(build)
    }

    pub fn with_sets<I, S>(mut self, sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.sets = sets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sands<I, S>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.sands = stats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_goblet<I, S>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.goblet = stats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_circlet<I, S>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.circlet = stats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weight(mut self, stat: impl Into<String>, weight: f64) -> Self {
        self.sub_stats.insert(stat.into(), weight);
        self
    }

    /// Weight of `stat`; stats absent from the build weigh 0.
    pub fn weight(&self, stat: &str) -> f64 {
        self.sub_stats.get(stat).copied().unwrap_or(0.0)
    }

    /// `"<character> - <build>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.character, self.build_name)
    }

    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        for (stat, &weight) in &self.sub_stats {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(CurationError::InvalidWeight {
                    character: self.character.clone(),
                    build_name: self.build_name.clone(),
                    stat_key: stat.clone(),
                    weight,
                });
            }
        }
        Ok(())
    }
}
