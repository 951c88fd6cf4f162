//! Curation rules: filtering and sorting of scored artifacts.
//!
//! - **Filtering**: an ordered list of [`FilterRule`]s, each a set of ANDed
//!   [`Selector`]s plus one [`FilterAction`], partitions artifacts into
//!   kept and excluded.
//! - **Sorting**: an ordered list of [`SortRule`]s applied as a stable
//!   multi-key sort. `set_key` and `slot_key` sort by the game's canonical
//!   order rather than lexically.
//!
//! Rule text (`rank:0=below-threshold:0.2`, `best_score:desc,set_key:asc`)
//! parses through `FromStr`; the pipeline itself only consumes the
//! structured forms.

mod field;
mod filter;
mod sort;

pub use field::ArtifactField;
pub use filter::{FilterAction, FilterOutcome, FilterRule, RuleFilter, Selector};
pub use sort::{parse_sort_rules, SortDirection, SortRule, Sorter};
