//! Unit normalization
//!
//! Converts ingredient quantities expressed in kitchen units to grams. Liquids
//! are approximated at 1 ml = 1 g and count units use average piece weights.

/// Grams per unit, in lookup order.
///
/// Substring matching walks this table front to back, so a short input such
/// as "c" resolves to the first key containing it ("cuillère"). The French
/// kitchen units come first, English synonyms after them.
const GRAM_FACTORS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", 1000.0),
    ("ml", 1.0),
    ("l", 1000.0),
    ("litre", 1000.0),
    ("tasse", 240.0),
    ("cuillère", 15.0),
    ("c. à soupe", 15.0),
    ("c. à café", 5.0),
    ("cuillère à soupe", 15.0),
    ("cuillère à café", 5.0),
    ("pincée", 2.0),
    ("poignée", 50.0),
    ("tranche", 30.0),
    ("unité", 100.0),
    ("pièce", 100.0),
    ("portion", 150.0),
    ("gramme", 1.0),
    ("gousse", 5.0),
    ("cup", 240.0),
    ("tablespoon", 15.0),
    ("tbsp", 15.0),
    ("teaspoon", 5.0),
    ("tsp", 5.0),
    ("pinch", 2.0),
    ("handful", 50.0),
    ("slice", 30.0),
    ("clove", 5.0),
    ("piece", 100.0),
];

/// Maps a quantity+unit pair to grams.
///
/// Unknown units are treated as grams. Quantities are passed through
/// unchanged, including zero and negative values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        UnitConverter
    }

    /// Convert `quantity` expressed in `unit` to grams
    pub fn to_grams(&self, quantity: f64, unit: &str) -> f64 {
        match self.factor_for(unit) {
            Some(factor) => quantity * factor,
            None => quantity,
        }
    }

    /// Gram multiplier for `unit`, or `None` when the unit is treated as grams.
    ///
    /// Exact match first, then the first table key containing the input.
    pub fn factor_for(&self, unit: &str) -> Option<f64> {
        let unit = unit.trim().to_lowercase();
        if unit.is_empty() {
            return None;
        }

        GRAM_FACTORS
            .iter()
            .find(|(key, _)| *key == unit)
            .or_else(|| GRAM_FACTORS.iter().find(|(key, _)| key.contains(&unit)))
            .map(|(_, factor)| *factor)
    }

    /// All supported unit names in lookup order
    pub fn known_units(&self) -> impl Iterator<Item = &'static str> {
        GRAM_FACTORS.iter().map(|(key, _)| *key)
    }
}
