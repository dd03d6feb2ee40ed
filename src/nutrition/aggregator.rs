use crate::catalog::NutritionCatalog;
use crate::model::{IngredientProfile, ItemNutrition, MacroPercentages, MealAnalysis, QuantitySpec};
use crate::units::UnitConverter;
use log::debug;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Resolves quantity specs against a catalog and sums their nutrition
#[derive(Debug, Clone, Copy)]
pub struct NutritionAggregator<'a> {
    catalog: &'a NutritionCatalog,
    converter: UnitConverter,
}

impl<'a> NutritionAggregator<'a> {
    pub fn new(catalog: &'a NutritionCatalog) -> Self {
        Self::with_converter(catalog, UnitConverter::new())
    }

    pub fn with_converter(catalog: &'a NutritionCatalog, converter: UnitConverter) -> Self {
        Self { catalog, converter }
    }

    /// Compute per-item and total nutrition.
    ///
    /// Items that match no catalog entry, neither exactly nor by substring,
    /// are left out of the result.
    pub fn compute_meal(&self, items: &[QuantitySpec]) -> MealAnalysis {
        let items: Vec<ItemNutrition> = items
            .iter()
            .filter_map(|spec| self.compute_item(spec))
            .collect();
        MealAnalysis::from_items(items)
    }

    /// Nutrition of a single spec, `None` if the ingredient is unknown
    pub fn compute_item(&self, spec: &QuantitySpec) -> Option<ItemNutrition> {
        let Some(profile) = self.resolve(&spec.name) else {
            debug!("No nutrition data for '{}', skipping", spec.name);
            return None;
        };

        let grams = self.converter.to_grams(spec.quantity, &spec.unit);
        let scale = grams / 100.0;

        Some(ItemNutrition {
            ingredient_name: profile.name,
            quantity: spec.quantity,
            unit: spec.unit.clone(),
            calories_per_100g: profile.calories_per_100g,
            total_calories: profile.calories_per_100g * scale,
            proteins: profile.proteins * scale,
            carbs: profile.carbs * scale,
            fats: profile.fats * scale,
            fiber: profile.fiber * scale,
        })
    }

    fn resolve(&self, name: &str) -> Option<IngredientProfile> {
        self.catalog
            .get(name)
            .or_else(|| self.catalog.search(name).into_iter().next())
    }
}

impl MealAnalysis {
    /// Build an analysis whose totals are the rounded sums of `items`
    pub fn from_items(items: Vec<ItemNutrition>) -> Self {
        let sum = |field: fn(&ItemNutrition) -> f64| round1(items.iter().map(field).sum());

        MealAnalysis {
            total_calories: sum(|item| item.total_calories),
            total_proteins: sum(|item| item.proteins),
            total_carbs: sum(|item| item.carbs),
            total_fats: sum(|item| item.fats),
            total_fiber: sum(|item| item.fiber),
            items,
        }
    }

    /// Share of proteins, carbs and fats in the total macro mass.
    ///
    /// All zero when the meal has no macronutrients.
    pub fn macro_percentages(&self) -> MacroPercentages {
        let total = self.total_proteins + self.total_carbs + self.total_fats;
        if total == 0.0 {
            return MacroPercentages::default();
        }

        let pct = |value: f64| round1(100.0 * value / total);
        MacroPercentages {
            proteins: pct(self.total_proteins),
            carbs: pct(self.total_carbs),
            fats: pct(self.total_fats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn catalog() -> NutritionCatalog {
        NutritionCatalog::from_reader(Cursor::new(
            "name,calories,protein,carbs,fat,fiber,category\n\
             tomate,18,0.9,3.9,0.2,1.2,Légume\n\
             riz,365,7.1,77.2,0.7,1.3,Céréale\n\
             huile d'olive,884,0,0,100,0,Matière grasse\n",
        ))
    }

    #[test]
    fn test_empty_meal() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog).compute_meal(&[]);
        assert!(meal.items.is_empty());
        assert_eq!(meal.total_calories, 0.0);
        assert_eq!(meal.total_fiber, 0.0);
        assert_eq!(meal.macro_percentages(), MacroPercentages::default());
    }

    #[test]
    fn test_single_item_scaling() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog)
            .compute_meal(&[QuantitySpec::new("tomate", 200.0, "g")]);

        assert_eq!(meal.total_calories, 36.0);
        assert_eq!(meal.items.len(), 1);
        assert_eq!(meal.items[0].calories_per_100g, 18.0);
        assert!((meal.items[0].proteins - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion_applies() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog)
            .compute_meal(&[QuantitySpec::new("huile d'olive", 1.0, "cuillère à soupe")]);
        // 15 g of oil
        assert_eq!(meal.total_calories, 132.6);
        assert_eq!(meal.total_fats, 15.0);
    }

    #[test]
    fn test_fuzzy_match_and_unknown_items() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog).compute_meal(&[
            QuantitySpec::new("Tomate", 100.0, "g"),
            QuantitySpec::new("ri", 100.0, "g"),
            QuantitySpec::new("licorne", 100.0, "g"),
        ]);

        let names: Vec<&str> = meal.items.iter().map(|i| i.ingredient_name.as_str()).collect();
        assert_eq!(names, vec!["tomate", "riz"]);
        assert_eq!(meal.total_calories, 383.0);
    }

    #[test]
    fn test_totals_are_rounded_sums() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog).compute_meal(&[
            QuantitySpec::new("tomate", 33.0, "g"),
            QuantitySpec::new("riz", 47.0, "g"),
        ]);

        let raw: f64 = meal.items.iter().map(|i| i.total_calories).sum();
        assert_eq!(meal.total_calories, round1(raw));
        let raw_carbs: f64 = meal.items.iter().map(|i| i.carbs).sum();
        assert_eq!(meal.total_carbs, round1(raw_carbs));
    }

    #[test]
    fn test_macro_percentages_sum_to_100() {
        let catalog = catalog();
        let meal = NutritionAggregator::new(&catalog).compute_meal(&[
            QuantitySpec::new("riz", 100.0, "g"),
            QuantitySpec::new("huile d'olive", 10.0, "g"),
        ]);

        let pct = meal.macro_percentages();
        let sum = pct.proteins + pct.carbs + pct.fats;
        assert!((sum - 100.0).abs() <= 0.2, "sum was {sum}");
    }

    #[test]
    fn test_compute_meal_is_deterministic() {
        let catalog = catalog();
        let aggregator = NutritionAggregator::new(&catalog);
        let items = vec![
            QuantitySpec::new("riz", 80.0, "g"),
            QuantitySpec::new("tomate", 2.0, "unité"),
        ];
        assert_eq!(aggregator.compute_meal(&items), aggregator.compute_meal(&items));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(36.04), 36.0);
        assert_eq!(round1(36.06), 36.1);
        assert_eq!(round1(0.0), 0.0);
    }
}
