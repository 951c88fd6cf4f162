//! Candidate pool: artifacts grouped by set and slot.

use std::collections::HashMap;

use super::types::BuildDefinition;
use crate::artifact::{EvaluatedArtifact, SlotKey};

/// Indices into the hydrated artifact slice, grouped by set key and then
/// by slot.
///
/// Every artifact lands in exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    by_set: HashMap<String, [Vec<usize>; 5]>,
    len: usize,
}

impl CandidatePool {
    /// Groups `artifacts`, preserving input order within each bucket.
    pub fn index(artifacts: &[EvaluatedArtifact]) -> Self {
        let mut by_set: HashMap<String, [Vec<usize>; 5]> = HashMap::new();
        for (i, artifact) in artifacts.iter().enumerate() {
            by_set.entry(artifact.set_key.clone()).or_default()[artifact.slot_key.index()]
                .push(i);
        }
        Self {
            by_set,
            len: artifacts.len(),
        }
    }

    /// Artifacts of `set` in `slot`.
    pub fn slot(&self, set: &str, slot: SlotKey) -> &[usize] {
        self.by_set
            .get(set)
            .map(|slots| slots[slot.index()].as_slice())
            .unwrap_or(&[])
    }

    /// Number of indexed artifacts.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct sets present.
    pub fn set_count(&self) -> usize {
        self.by_set.len()
    }

    /// Indices of the artifacts eligible for `build`.
    ///
    /// Slots are concatenated flower, plume, sands, goblet, circlet; within a
    /// slot, sets follow the build's set order. Sands, goblet and circlet
    /// also require the main stat to be allowed. A set listed twice in the
    /// build is only matched once.
    pub fn match_build(&self, artifacts: &[EvaluatedArtifact], build: &BuildDefinition) -> Vec<usize> {
        let mut sets: Vec<&str> = Vec::with_capacity(build.filter.sets.len());
        for set in &build.filter.sets {
            if !sets.contains(&set.as_str()) {
                sets.push(set);
            }
        }

        SlotKey::ALL
            .iter()
            .flat_map(|&slot| {
                sets.iter().flat_map(move |set| {
                    self.slot(set, slot).iter().copied().filter(move |&i| {
                        build
                            .filter
                            .allows_main_stat(slot, &artifacts[i].main_stat_key)
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::RawArtifact;

    fn artifact(id: &str, set: &str, slot: &str, main: &str) -> EvaluatedArtifact {
        let raw = RawArtifact::new(set, slot, main, 5, 20);
        EvaluatedArtifact::new(id.into(), raw, vec![]).unwrap()
    }

    fn inventory() -> Vec<EvaluatedArtifact> {
        vec![
            artifact("c1", "GladiatorsFinale", "circlet", "critRate_"),
            artifact("f1", "GladiatorsFinale", "flower", "hp"),
            artifact("s1", "GladiatorsFinale", "sands", "atk_"),
            artifact("s2", "GladiatorsFinale", "sands", "def_"),
            artifact("p1", "WanderersTroupe", "plume", "atk"),
            artifact("g1", "WanderersTroupe", "goblet", "pyro_dmg_"),
            artifact("f2", "NoblesseOblige", "flower", "hp"),
        ]
    }

    fn ids(artifacts: &[EvaluatedArtifact], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| artifacts[i].id.clone()).collect()
    }

    #[test]
    fn test_index_keeps_every_artifact() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        assert_eq!(pool.len(), 7);
        assert_eq!(pool.set_count(), 3);

        let total: usize = ["GladiatorsFinale", "WanderersTroupe", "NoblesseOblige"]
            .iter()
            .flat_map(|set| { let pool = &pool; SlotKey::ALL.iter().map(move |&slot| pool.slot(set, slot).len()) })
            .sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_unknown_set_is_empty() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        assert!(pool.slot("Unheard", SlotKey::Flower).is_empty());
    }

    #[test]
    fn test_match_orders_by_slot_then_set() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        let build = BuildDefinition::new("Diluc", "DPS")
            .with_sets(["WanderersTroupe", "GladiatorsFinale"])
            .with_sands(["atk_"])
            .with_goblet(["pyro_dmg_"])
            .with_circlet(["critRate_", "critDMG_"]);

        let matched = pool.match_build(&arts, &build);
        assert_eq!(ids(&arts, &matched), vec!["f1", "p1", "s1", "g1", "c1"]);
    }

    #[test]
    fn test_main_stat_filter_excludes() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        let build = BuildDefinition::new("Noelle", "DEF")
            .with_sets(["GladiatorsFinale"])
            .with_sands(["def_"]);

        let matched = pool.match_build(&arts, &build);
        assert_eq!(ids(&arts, &matched), vec!["f1", "s2"]);
    }

    #[test]
    fn test_disjoint_sets_match_nothing() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        let build = BuildDefinition::new("Ayaka", "Freeze").with_sets(["BlizzardStrayer"]);
        assert!(pool.match_build(&arts, &build).is_empty());
    }

    #[test]
    fn test_duplicate_set_matched_once() {
        let arts = inventory();
        let pool = CandidatePool::index(&arts);
        let build =
            BuildDefinition::new("Razor", "Phys").with_sets(["NoblesseOblige", "NoblesseOblige"]);
        assert_eq!(ids(&arts, &pool.match_build(&arts, &build)), vec!["f2"]);
    }
}
