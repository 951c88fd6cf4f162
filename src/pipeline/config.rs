//! Curation run configuration.

use crate::error::{CurationError, Result};
use crate::rules::{FilterAction, FilterRule, SortRule};

/// Parameters of one curation run.
///
/// # Defaults
///
/// ```
/// use artifact_curator::pipeline::CurationConfig;
///
/// let config = CurationConfig::default();
/// assert!(config.filter_rules.is_empty());
/// assert_eq!(config.min_rarity, 1);
/// assert!(config.validate_input);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use artifact_curator::pipeline::CurationConfig;
/// use artifact_curator::rules::{ArtifactField, FilterAction, FilterRule, SortRule};
///
/// let config = CurationConfig::default()
///     .with_filter_rule("rank:0=below-threshold:0.2".parse().unwrap())
///     .with_filter_rule(FilterRule::everything(FilterAction::KeepTopN(500)))
///     .with_sort_rule(SortRule::desc(ArtifactField::BestScore))
///     .with_min_rarity(5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// Filter rules, applied in order.
    pub filter_rules: Vec<FilterRule>,

    /// Sort rules in declared order (see [`Sorter`](crate::rules::Sorter)).
    pub sort_rules: Vec<SortRule>,

    /// Artifacts below this rarity are skipped before hydration.
    pub min_rarity: u8,

    /// Whether to drop records flagged by the artifact validators before
    /// scoring.
    pub validate_input: bool,

    /// Whether to score builds in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Score aggregation is
    /// always serial.
    pub parallel: bool,

    /// Seed for the per-run id prefix given to artifacts without an id.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            filter_rules: Vec::new(),
            sort_rules: Vec::new(),
            min_rarity: 1,
            validate_input: true,
            parallel: true,
            seed: None,
        }
    }
}

impl CurationConfig {
    /// Appends a filter rule.
    pub fn with_filter_rule(mut self, rule: FilterRule) -> Self {
        self.filter_rules.push(rule);
        self
    }

    /// Replaces the filter rules.
    pub fn with_filter_rules(mut self, rules: Vec<FilterRule>) -> Self {
        self.filter_rules = rules;
        self
    }

    /// Appends a sort rule.
    pub fn with_sort_rule(mut self, rule: SortRule) -> Self {
        self.sort_rules.push(rule);
        self
    }

    /// Replaces the sort rules.
    pub fn with_sort_rules(mut self, rules: Vec<SortRule>) -> Self {
        self.sort_rules = rules;
        self
    }

    /// Sets the minimum rarity.
    pub fn with_min_rarity(mut self, rarity: u8) -> Self {
        self.min_rarity = rarity;
        self
    }

    /// Enables or disables the input validators.
    pub fn with_validate_input(mut self, validate: bool) -> Self {
        self.validate_input = validate;
        self
    }

    /// Enables or disables parallel build scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the id seed for reproducible ids.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.min_rarity) {
            return Err(CurationError::InvalidConfig(format!(
                "min_rarity must be between 1 and 5, got {}",
                self.min_rarity
            )));
        }
        for (i, rule) in self.filter_rules.iter().enumerate() {
            if rule.selectors.is_empty() {
                return Err(CurationError::InvalidConfig(format!(
                    "filter rule {i} has no selectors"
                )));
            }
            if let FilterAction::BelowThreshold(cutoff) = rule.action {
                if !cutoff.is_finite() {
                    return Err(CurationError::InvalidConfig(format!(
                        "filter rule {i} has a non-finite threshold"
                    )));
                }
            }
        }
        Ok(())
    }
}
