//! Static game tables: canonical set ordering and per-set rarity caps.
//!
//! The set ordering mirrors the game's own inventory order and is used
//! instead of lexical order whenever artifacts are sorted by set.

/// Set keys in canonical in-game order.
pub const SET_KEY_ORDER: [&str; 41] = [
    "GildedDreams",
    "DeepwoodMemories",
    "EchoesOfAnOffering",
    "VermillionHereafter",
    "OceanHuedClam",
    "HuskOfOpulentDreams",
    "EmblemOfSeveredFate",
    "ShimenawasReminiscence",
    "PaleFlame",
    "TenacityOfTheMillelith",
    "HeartOfDepth",
    "RetracingBolide",
    "ArchaicPetra",
    "PrayersToSpringtime",
    "PrayersForWisdom",
    "PrayersForDestiny",
    "PrayersForIllumination",
    "BloodstainedChivalry",
    "NoblesseOblige",
    "CrimsonWitchOfFlames",
    "ThunderingFury",
    "WanderersTroupe",
    "ViridescentVenerer",
    "GladiatorsFinale",
    "MaidenBeloved",
    "Lavawalker",
    "Thundersoother",
    "BlizzardStrayer",
    "Scholar",
    "TheExile",
    "Gambler",
    "Instructor",
    "MartialArtist",
    "Berserker",
    "TinyMiracle",
    "DefendersWill",
    "BraveHeart",
    "ResolutionOfSojourner",
    "TravelingDoctor",
    "LuckyDog",
    "Adventurer",
];

/// Sets that drop at most at 4 stars.
pub const FOUR_STAR_MAX_SETS: [&str; 14] = [
    "Berserker",
    "BraveHeart",
    "DefendersWill",
    "Gambler",
    "Instructor",
    "MartialArtist",
    "PrayersForDestiny",
    "PrayersForIllumination",
    "PrayersForWisdom",
    "PrayersToSpringtime",
    "ResolutionOfSojourner",
    "Scholar",
    "TheExile",
    "TinyMiracle",
];

/// Sets that drop at most at 3 stars.
pub const THREE_STAR_MAX_SETS: [&str; 3] = ["Adventurer", "LuckyDog", "TravelingDoctor"];

/// Position of a set in [`SET_KEY_ORDER`].
pub fn set_position(set_key: &str) -> Option<usize> {
    SET_KEY_ORDER.iter().position(|&s| s == set_key)
}

/// Highest rarity a set can drop at, or `None` for an unknown set.
pub fn max_rarity(set_key: &str) -> Option<u8> {
    if THREE_STAR_MAX_SETS.contains(&set_key) {
        Some(3)
    } else if FOUR_STAR_MAX_SETS.contains(&set_key) {
        Some(4)
    } else {
        set_position(set_key).map(|_| 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_set_order_has_no_duplicates() {
        let unique: HashSet<_> = SET_KEY_ORDER.iter().collect();
        assert_eq!(unique.len(), SET_KEY_ORDER.len());
    }

    #[test]
    fn test_capped_sets_are_known() {
        for set in FOUR_STAR_MAX_SETS.iter().chain(THREE_STAR_MAX_SETS.iter()) {
            assert!(set_position(set).is_some(), "{set} missing from order");
        }
    }

    #[test]
    fn test_max_rarity() {
        assert_eq!(max_rarity("GladiatorsFinale"), Some(5));
        assert_eq!(max_rarity("Gambler"), Some(4));
        assert_eq!(max_rarity("LuckyDog"), Some(3));
        assert_eq!(max_rarity("NotASet"), None);
    }

    #[test]
    fn test_set_position() {
        assert_eq!(set_position("GildedDreams"), Some(0));
        assert_eq!(set_position("Adventurer"), Some(40));
    }
}
