use super::aggregator::round1;
use crate::model::{DailyNeeds, MealAnalysis};
use serde::Serialize;

/// Reference body used by the basal metabolic rate formula
const MALE_WEIGHT_KG: f64 = 70.0;
const MALE_HEIGHT_CM: f64 = 175.0;
const FEMALE_WEIGHT_KG: f64 = 60.0;
const FEMALE_HEIGHT_CM: f64 = 165.0;

/// Macro split of total calories and kcal per gram
const PROTEIN_SHARE: f64 = 0.15;
const CARBS_SHARE: f64 = 0.55;
const FAT_SHARE: f64 = 0.30;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Physical activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Intense,
    VeryIntense,
}

impl ActivityLevel {
    /// Parse a French or English label; unrecognized labels are `Moderate`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "sédentaire" | "sedentaire" | "sedentary" => ActivityLevel::Sedentary,
            "léger" | "leger" | "light" => ActivityLevel::Light,
            "modéré" | "modere" | "moderate" => ActivityLevel::Moderate,
            "intense" | "active" => ActivityLevel::Intense,
            "très intense" | "tres intense" | "very intense" => ActivityLevel::VeryIntense,
            _ => ActivityLevel::Moderate,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::VeryIntense => 1.9,
        }
    }
}

/// Recommended daily intake for an average person of the given profile.
///
/// `gender` "M" (any case) selects the male formula, anything else the female
/// one. Calories are rounded to the unit, macros to one decimal.
pub fn daily_needs(age: u32, gender: &str, activity: ActivityLevel) -> DailyNeeds {
    let age = f64::from(age);
    let bmr = if gender.trim().eq_ignore_ascii_case("m") {
        88.362 + 13.397 * MALE_WEIGHT_KG + 4.799 * MALE_HEIGHT_CM - 5.677 * age
    } else {
        447.593 + 9.247 * FEMALE_WEIGHT_KG + 3.098 * FEMALE_HEIGHT_CM - 4.330 * age
    };
    let calories = bmr * activity.multiplier();

    DailyNeeds {
        calories: calories.round(),
        proteins: round1(calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN),
        carbs: round1(calories * CARBS_SHARE / KCAL_PER_G_CARBS),
        fats: round1(calories * FAT_SHARE / KCAL_PER_G_FAT),
    }
}

/// One nutrient compared with its recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientComparison {
    pub recommended: f64,
    pub current: f64,
    pub percentage: f64,
}

impl NutrientComparison {
    fn new(recommended: f64, current: f64) -> Self {
        Self {
            recommended,
            current,
            percentage: percentage_of(current, recommended),
        }
    }
}

/// A meal compared with the recommended daily intake
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeedsComparison {
    pub recommended_calories: f64,
    pub current_calories: f64,
    pub percentage_of_needs: f64,
    pub remaining_calories: f64,
    pub proteins: NutrientComparison,
    pub carbs: NutrientComparison,
    pub fats: NutrientComparison,
}

pub fn compare_with_needs(meal: &MealAnalysis, needs: &DailyNeeds) -> NeedsComparison {
    NeedsComparison {
        recommended_calories: needs.calories,
        current_calories: meal.total_calories,
        percentage_of_needs: percentage_of(meal.total_calories, needs.calories),
        remaining_calories: needs.calories - meal.total_calories,
        proteins: NutrientComparison::new(needs.proteins, meal.total_proteins),
        carbs: NutrientComparison::new(needs.carbs, meal.total_carbs),
        fats: NutrientComparison::new(needs.fats, meal.total_fats),
    }
}

fn percentage_of(current: f64, recommended: f64) -> f64 {
    if recommended == 0.0 {
        0.0
    } else {
        round1(current / recommended * 100.0)
    }
}
