use crate::error::AssistantError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Per-100g nutritional profile of one named food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientProfile {
    /// Lowercase lookup key
    pub name: String,
    pub calories_per_100g: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub category: String,
}

/// A caller-supplied (name, amount, unit) triple to resolve against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySpec {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl QuantitySpec {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Parses `name:quantity[:unit]`, the unit defaulting to grams
impl FromStr for QuantitySpec {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let quantity = parts.next().unwrap_or_default();
        let unit = parts.next().filter(|unit| !unit.is_empty()).unwrap_or("g");

        if name.is_empty() {
            return Err(AssistantError::InvalidInput(format!("missing food name in '{}'", s)));
        }
        let quantity: f64 = quantity.replace(',', ".").parse().map_err(|_| {
            AssistantError::InvalidInput(format!("invalid quantity in '{}'", s))
        })?;

        Ok(QuantitySpec::new(name, quantity, unit))
    }
}

/// Nutrition of one resolved ingredient, scaled to the requested quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemNutrition {
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories_per_100g: f64,
    pub total_calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// Aggregated nutrition over a set of resolved ingredients.
///
/// Totals are the sums of the item fields rounded to one decimal; the value is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MealAnalysis {
    pub items: Vec<ItemNutrition>,
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub total_fiber: f64,
}

/// Share of each macronutrient in the total macro mass, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MacroPercentages {
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Attached nutrition totals of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

impl From<&MealAnalysis> for NutritionTotals {
    fn from(meal: &MealAnalysis) -> Self {
        Self {
            calories: meal.total_calories,
            proteins: meal.total_proteins,
            carbs: meal.total_carbs,
            fats: meal.total_fats,
            fiber: meal.total_fiber,
        }
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

impl From<&RecipeIngredient> for QuantitySpec {
    fn from(ingredient: &RecipeIngredient) -> Self {
        QuantitySpec::new(
            ingredient.name.clone(),
            ingredient.quantity,
            ingredient.unit.clone(),
        )
    }
}

/// A structured recipe built from model output or from a template
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecipeRecord {
    pub title: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    pub prep_time: String,
    pub difficulty: String,
    pub tips: String,
    pub nutrition: Option<NutritionTotals>,
}

impl RecipeRecord {
    /// The ingredient list as quantity specs for the aggregator
    pub fn quantity_specs(&self) -> Vec<QuantitySpec> {
        self.ingredients.iter().map(QuantitySpec::from).collect()
    }

    /// Attach nutrition totals computed after construction
    pub fn with_nutrition(mut self, totals: NutritionTotals) -> Self {
        self.nutrition = Some(totals);
        self
    }
}

/// Nutrition analysis returned by the model (or rebuilt from the database)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NutritionAnalysisRecord {
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub health_tips: String,
}

/// Recommended daily intake
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyNeeds {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Optional constraints passed along with an ingredient selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Cuisine style, e.g. "provençale"
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    /// Maximum preparation time, free text
    pub max_prep_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_spec() {
        let spec: QuantitySpec = "riz:150".parse().unwrap();
        assert_eq!(spec, QuantitySpec::new("riz", 150.0, "g"));

        let spec: QuantitySpec = "huile d'olive : 1,5 : cuillère à soupe".parse().unwrap();
        assert_eq!(spec, QuantitySpec::new("huile d'olive", 1.5, "cuillère à soupe"));
    }

    #[test]
    fn test_parse_quantity_spec_errors() {
        assert!("riz".parse::<QuantitySpec>().is_err());
        assert!("riz:beaucoup".parse::<QuantitySpec>().is_err());
        assert!(":100:g".parse::<QuantitySpec>().is_err());
    }

    #[test]
    fn test_recipe_quantity_specs() {
        let recipe = RecipeRecord {
            ingredients: vec![RecipeIngredient::new("tomate", 2.0, "pièce")],
            ..RecipeRecord::default()
        };
        assert_eq!(
            recipe.quantity_specs(),
            vec![QuantitySpec::new("tomate", 2.0, "pièce")]
        );
        let recipe = recipe.with_nutrition(NutritionTotals::default());
        assert!(recipe.nutrition.is_some());
    }
}
