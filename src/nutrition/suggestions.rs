use crate::catalog::NutritionCatalog;
use crate::model::MealAnalysis;
use serde::Serialize;

const MAX_PER_GROUP: usize = 3;
const MAX_SUGGESTIONS: usize = 10;

/// A group of catalog categories with the calorie budget of one portion
struct FoodGroup {
    label: &'static str,
    categories: &'static [&'static str],
    portion_calories: f64,
}

const FOOD_GROUPS: [FoodGroup; 4] = [
    FoodGroup {
        label: "Protéines",
        categories: &["Viande", "Poisson"],
        portion_calories: 300.0,
    },
    FoodGroup {
        label: "Légumes",
        categories: &["Légume"],
        portion_calories: 100.0,
    },
    FoodGroup {
        label: "Féculents",
        categories: &["Céréale"],
        portion_calories: 400.0,
    },
    FoodGroup {
        label: "Fruits",
        categories: &["Fruit"],
        portion_calories: 150.0,
    },
];

/// An ingredient portion proposed to close a calorie gap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientSuggestion {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub group: String,
}

/// Propose portions that bring `meal` closer to `target_calories`.
///
/// Groups are visited in a fixed order (proteins, vegetables, starches,
/// fruits), each contributing at most three ingredients. Every portion is
/// capped by its group budget and by the calories still missing. Empty when
/// the meal already meets the target.
pub fn suggest_for_target(
    catalog: &NutritionCatalog,
    target_calories: f64,
    meal: &MealAnalysis,
) -> Vec<IngredientSuggestion> {
    let mut remaining = target_calories - meal.total_calories;
    let mut suggestions = Vec::new();

    for group in &FOOD_GROUPS {
        if remaining <= 0.0 {
            break;
        }

        let candidates = group
            .categories
            .iter()
            .flat_map(|category| catalog.by_category(category))
            .filter(|profile| profile.calories_per_100g > 0.0)
            .take(MAX_PER_GROUP);

        for profile in candidates {
            if remaining <= 0.0 {
                break;
            }

            let portion = group.portion_calories.min(remaining);
            suggestions.push(IngredientSuggestion {
                name: profile.name,
                quantity: (portion / profile.calories_per_100g * 100.0).round(),
                unit: "g".to_string(),
                calories: portion.round(),
                group: group.label.to_string(),
            });
            remaining -= portion;
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
