use crate::model::{MealAnalysis, QuantitySpec, RecipeRequest};

/// Recipe request template.
///
/// Loaded from `recipe_prompt.txt` at compile time. Contains `{{INGREDIENTS}}`
/// and `{{CONSTRAINTS}}` placeholders, filled by [`inject_recipe_request`].
/// The answer format it asks for is the one the recipe extractor reads.
pub const RECIPE_PROMPT: &str = include_str!("recipe_prompt.txt");

/// System prompt sent with recipe requests
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("recipe_system.txt");

/// Meal analysis template with a `{{FOODS}}` placeholder
pub const ANALYSIS_PROMPT: &str = include_str!("analysis_prompt.txt");

/// System prompt sent with meal analysis requests
pub const ANALYSIS_SYSTEM_PROMPT: &str = include_str!("analysis_system.txt");

/// Short advisory template, used when the full analysis could not be read
pub const ADVICE_PROMPT: &str = include_str!("advice_prompt.txt");

/// Fill the recipe template with the selection and optional constraints
pub fn inject_recipe_request(ingredients: &[String], request: &RecipeRequest) -> String {
    let mut constraints = Vec::new();
    if let Some(cuisine) = non_blank(request.cuisine.as_deref()) {
        constraints.push(format!("Style de cuisine: {}", cuisine));
    }
    if let Some(difficulty) = non_blank(request.difficulty.as_deref()) {
        constraints.push(format!("Difficulté souhaitée: {}", difficulty));
    }
    if let Some(time) = non_blank(request.max_prep_time.as_deref()) {
        constraints.push(format!("Temps de préparation maximum: {}", time));
    }

    RECIPE_PROMPT
        .replace("{{INGREDIENTS}}", &ingredients.join(", "))
        .replace("{{CONSTRAINTS}}", &constraints.join("\n"))
}

/// Fill the analysis template with one "- name : quantity unit" line per food
pub fn inject_foods(items: &[QuantitySpec]) -> String {
    ANALYSIS_PROMPT.replace("{{FOODS}}", &food_lines(items))
}

/// Fill the advisory template with computed totals
pub fn inject_advice(meal: &MealAnalysis, items: &[QuantitySpec]) -> String {
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    ADVICE_PROMPT
        .replace("{{CALORIES}}", &format!("{:.0}", meal.total_calories))
        .replace("{{PROTEINS}}", &format!("{:.1}", meal.total_proteins))
        .replace("{{CARBS}}", &format!("{:.1}", meal.total_carbs))
        .replace("{{FATS}}", &format!("{:.1}", meal.total_fats))
        .replace("{{FOODS}}", &names.join(", "))
}

fn food_lines(items: &[QuantitySpec]) -> String {
    items
        .iter()
        .map(|item| format!("- {} : {} {}", item.name, item.quantity, item.unit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
