//! Substat efficiency hydration.
//!
//! Efficiency of one substat line is
//! `(value / max_roll(stat, rarity)) / ROLLS_PER_LIFETIME`, i.e. the
//! average quality per roll over an artifact's nine possible rolls.
//! Unused lines have efficiency 0.

use std::collections::BTreeMap;

use super::types::{EvaluatedArtifact, RawArtifact, SubStat};
use crate::error::{CurationError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of rolls an artifact receives over its lifetime.
pub const ROLLS_PER_LIFETIME: f64 = 9.0;

/// Maximum single-roll value per `(substat, rarity)`.
///
/// Serialized as `{"critRate_": {"5": 3.89, "4": 3.11}, ...}`.
///
/// # Examples
///
/// ```
/// use artifact_curator::artifact::MaxRollTable;
///
/// let table = MaxRollTable::new()
///     .with_value("critRate_", 5, 3.89)
///     .with_value("critDMG_", 5, 7.77);
/// assert_eq!(table.max_roll("critRate_", 5), Some(3.89));
/// assert_eq!(table.max_roll("critRate_", 4), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaxRollTable {
    values: BTreeMap<String, BTreeMap<u8, f64>>,
}

impl MaxRollTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published max-roll values for 3, 4 and 5 star artifacts, keyed by
    /// GOOD stat keys.
    pub fn standard() -> Self {
        // (stat, 3-star, 4-star, 5-star)
        const ROWS: [(&str, f64, f64, f64); 10] = [
            ("hp", 143.40, 239.00, 298.75),
            ("atk", 9.34, 15.56, 19.45),
            ("def", 11.11, 18.52, 23.15),
            ("hp_", 3.50, 4.66, 5.83),
            ("atk_", 3.50, 4.66, 5.83),
            ("def_", 4.37, 5.83, 7.29),
            ("eleMas", 13.99, 18.65, 23.31),
            ("enerRech_", 3.89, 5.18, 6.48),
            ("critRate_", 2.33, 3.11, 3.89),
            ("critDMG_", 4.66, 6.22, 7.77),
        ];

        ROWS.iter()
            .fold(Self::new(), |table, &(stat, three, four, five)| {
                table
                    .with_value(stat, 3, three)
                    .with_value(stat, 4, four)
                    .with_value(stat, 5, five)
            })
    }

    /// Parses a table from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Sets the max roll for `(stat, rarity)`.
    pub fn with_value(mut self, stat: impl Into<String>, rarity: u8, value: f64) -> Self {
        self.insert(stat, rarity, value);
        self
    }

    pub fn insert(&mut self, stat: impl Into<String>, rarity: u8, value: f64) {
        self.values.entry(stat.into()).or_default().insert(rarity, value);
    }

    pub fn max_roll(&self, stat: &str, rarity: u8) -> Option<f64> {
        self.values.get(stat)?.get(&rarity).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rejects non-positive or non-finite entries.
    pub fn validate(&self) -> Result<()> {
        for (stat, by_rarity) in &self.values {
            for (&rarity, &value) in by_rarity {
                if !(value.is_finite() && value > 0.0) {
                    return Err(CurationError::InvalidMaxRoll {
                        stat_key: stat.clone(),
                        rarity,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Converts raw artifacts into [`EvaluatedArtifact`]s with substat
/// efficiencies filled in.
pub struct Hydrator<'a> {
    table: &'a MaxRollTable,
}

impl<'a> Hydrator<'a> {
    pub fn new(table: &'a MaxRollTable) -> Self {
        Self { table }
    }

    /// Efficiency of a single substat value.
    ///
    /// Negative or non-finite values are rejected, so the result is never
    /// below zero.
    pub fn efficiency(&self, artifact_id: &str, stat: &str, value: f64, rarity: u8) -> Result<f64> {
        if !(value.is_finite() && value >= 0.0) {
            return Err(CurationError::InvalidSubStatValue {
                artifact_id: artifact_id.to_string(),
                stat_key: stat.to_string(),
                value,
            });
        }
        let max = self
            .table
            .max_roll(stat, rarity)
            .ok_or_else(|| CurationError::MissingMaxRoll {
                artifact_id: artifact_id.to_string(),
                stat_key: stat.to_string(),
                rarity,
            })?;
        if !(max.is_finite() && max > 0.0) {
            return Err(CurationError::InvalidMaxRoll {
                stat_key: stat.to_string(),
                rarity,
                value: max,
            });
        }
        Ok((value / max) / ROLLS_PER_LIFETIME)
    }

    /// Efficiencies for every substat line of `raw`, in order.
    pub fn sub_stats(&self, artifact_id: &str, raw: &RawArtifact) -> Result<Vec<SubStat>> {
        raw.substats
            .iter()
            .map(|sub| {
                let efficiency = match sub.stat_key() {
                    Some(stat) => self.efficiency(artifact_id, stat, sub.value, raw.rarity)?,
                    None => 0.0,
                };
                Ok(SubStat {
                    key: sub.stat_key().map(str::to_string),
                    value: sub.value,
                    efficiency,
                })
            })
            .collect()
    }

    /// Hydrates one artifact under the run-unique `id`.
    pub fn hydrate(&self, id: String, raw: RawArtifact) -> Result<EvaluatedArtifact> {
        let sub_stats = self.sub_stats(&id, &raw)?;
        EvaluatedArtifact::new(id, raw, sub_stats)
    }
}
