//! Word catalog used for the secret word of a round.

use super::random::RandomSource;

/// Category labels a round's secret word is drawn from.
///
/// Duplicated entries are intentional and raise their selection probability.
pub const WORD_CATALOG: [&str; 20] = [
    "liquid",
    "light source",
    "device",
    "furniture",
    "clothing",
    "food",
    "vehicle",
    "tool",
    "musical instrument",
    "building",
    "appliance",
    "toy",
    "utensil",
    "sport",
    "weapon",
    "jewelry",
    "furniture",
    "electronics",
    "clothing",
    "book",
];

/// Pick one word uniformly from the catalog.
pub fn pick_word(random: &dyn RandomSource) -> &'static str {
    WORD_CATALOG[random.index(WORD_CATALOG.len())]
}
