//! Error types for the curation pipeline.
//!
//! Every failure is fatal for the run: the pipeline never returns a
//! partially-scored collection.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CurationError>;

/// Errors raised while evaluating or curating artifacts.
#[derive(Debug, Error)]
pub enum CurationError {
    /// The max-roll table has no entry for a substat observed on an artifact.
    #[error("artifact {artifact_id}: no max roll value for substat '{stat_key}' at rarity {rarity}")]
    MissingMaxRoll {
        artifact_id: String,
        stat_key: String,
        rarity: u8,
    },

    /// The max-roll table holds a non-positive value.
    #[error("max roll value for substat '{stat_key}' at rarity {rarity} must be positive, got {value}")]
    InvalidMaxRoll {
        stat_key: String,
        rarity: u8,
        value: f64,
    },

    /// An artifact names a slot outside the five equip slots.
    #[error("artifact {artifact_id}: unrecognized slot key '{slot_key}'")]
    UnknownSlot {
        artifact_id: String,
        slot_key: String,
    },

    /// An artifact names a set missing from the canonical ordering table.
    #[error("artifact {artifact_id}: unrecognized set key '{set_key}'")]
    UnknownSet { artifact_id: String, set_key: String },

    /// A substat roll value that is negative or not finite.
    #[error("artifact {artifact_id}: invalid value {value} for substat '{stat_key}'")]
    InvalidSubStatValue {
        artifact_id: String,
        stat_key: String,
        value: f64,
    },

    /// Rarity or level outside the ranges the game allows.
    #[error("artifact {artifact_id}: {field} {value} is out of range")]
    OutOfRange {
        artifact_id: String,
        field: &'static str,
        value: u8,
    },

    /// Two artifacts share an identifier within one run.
    #[error("duplicate artifact id '{artifact_id}'")]
    DuplicateArtifactId { artifact_id: String },

    /// A build whose weights produce a zero normalization factor.
    #[error("build '{character} - {build_name}': all substat weights are zero")]
    ZeroNormalization {
        character: String,
        build_name: String,
    },

    /// A build weight that is negative or not finite.
    #[error("build '{character} - {build_name}': invalid weight {weight} for substat '{stat_key}'")]
    InvalidWeight {
        character: String,
        build_name: String,
        stat_key: String,
        weight: f64,
    },

    /// A rule refers to an artifact field that does not exist.
    #[error("unrecognized rule key '{key}'")]
    UnknownField { key: String },

    /// Rule text that cannot be parsed into a filter or sort rule.
    #[error("malformed rule '{rule}': {reason}")]
    MalformedRule { rule: String, reason: String },

    /// Engine configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Interchange data could not be decoded.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CurationError {
    pub(crate) fn malformed(rule: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}
