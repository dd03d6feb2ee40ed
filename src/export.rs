//! Text and CSV renderings of recipes and meal analyses

use crate::error::AssistantError;
use crate::model::{MealAnalysis, RecipeRecord};
use crate::pipelines::MealReport;
use std::io::Write;

const RULE_WIDTH: usize = 60;

const CSV_HEADER: [&str; 8] = [
    "Aliment",
    "Quantité",
    "Unité",
    "Calories",
    "Protéines",
    "Glucides",
    "Lipides",
    "Fibres",
];

pub fn format_recipe(recipe: &RecipeRecord) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", recipe.title, rule));
    out.push_str("INFORMATIONS:\n");
    out.push_str(&format!("Temps: {}\n", recipe.prep_time));
    out.push_str(&format!("Difficulté: {}\n", recipe.difficulty));
    if !recipe.tips.is_empty() {
        out.push_str(&format!("Conseil: {}\n", recipe.tips));
    }

    out.push_str("\nINGRÉDIENTS:\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!(
            "• {}: {} {}\n",
            ingredient.name, ingredient.quantity, ingredient.unit
        ));
    }

    out.push_str("\nPRÉPARATION:\n");
    for (i, step) in recipe.steps.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    if let Some(nutrition) = &recipe.nutrition {
        out.push_str("\nNUTRITION:\n");
        out.push_str(&format!("Calories: {:.0} kcal\n", nutrition.calories));
        out.push_str(&format!("Protéines: {:.1} g\n", nutrition.proteins));
        out.push_str(&format!("Glucides: {:.1} g\n", nutrition.carbs));
        out.push_str(&format!("Lipides: {:.1} g\n", nutrition.fats));
    }

    out.push_str(&rule);
    out
}

/// Totals, macro distribution and per-food detail
pub fn format_meal_analysis(meal: &MealAnalysis) -> String {
    let mut out = String::from("RÉSUMÉ NUTRITIONNEL\n");

    out.push_str(&format!("Calories totales: {:.0} kcal\n", meal.total_calories));
    out.push_str(&format!("Protéines: {:.1} g\n", meal.total_proteins));
    out.push_str(&format!("Glucides: {:.1} g\n", meal.total_carbs));
    out.push_str(&format!("Lipides: {:.1} g\n", meal.total_fats));
    out.push_str(&format!("Fibres: {:.1} g\n", meal.total_fiber));

    if meal.total_proteins + meal.total_carbs + meal.total_fats > 0.0 {
        let pct = meal.macro_percentages();
        out.push_str("\nRÉPARTITION DES MACRONUTRIMENTS\n");
        out.push_str(&format!("Protéines: {:.1}%\n", pct.proteins));
        out.push_str(&format!("Glucides: {:.1}%\n", pct.carbs));
        out.push_str(&format!("Lipides: {:.1}%\n", pct.fats));
    }

    if !meal.items.is_empty() {
        out.push_str(&format!("\nDÉTAIL PAR ALIMENT\n{}\n", "-".repeat(40)));
        for item in &meal.items {
            out.push_str(&format!("{}\n", item.ingredient_name.to_uppercase()));
            out.push_str(&format!("   Quantité: {} {}\n", item.quantity, item.unit));
            out.push_str(&format!("   Calories: {:.0} kcal\n", item.total_calories));
            out.push_str(&format!("   Protéines: {:.1} g\n", item.proteins));
            out.push_str(&format!("   Glucides: {:.1} g\n", item.carbs));
            out.push_str(&format!("   Lipides: {:.1} g\n", item.fats));
            if item.fiber > 0.0 {
                out.push_str(&format!("   Fibres: {:.1} g\n", item.fiber));
            }
        }
    }

    out
}

/// The analysis shown to the user followed by the catalog detail
pub fn format_meal_report(report: &MealReport) -> String {
    let analysis = &report.analysis;
    let mut out = format!(
        "ANALYSE NUTRITIONNELLE ({:?})\n{}\n",
        report.origin,
        "=".repeat(50)
    );

    out.push_str(&format!("Calories totales: {:.0} kcal\n", analysis.total_calories));
    out.push_str(&format!("Protéines: {:.1} g\n", analysis.total_proteins));
    out.push_str(&format!("Glucides: {:.1} g\n", analysis.total_carbs));
    out.push_str(&format!("Lipides: {:.1} g\n", analysis.total_fats));
    if !analysis.health_tips.is_empty() {
        out.push_str(&format!("\nCONSEILS NUTRITIONNELS\n{}\n", analysis.health_tips));
    }
    out.push('\n');
    out.push_str(&format_meal_analysis(&report.meal));
    out
}

/// Write one row per food and a final TOTAL row
pub fn write_meal_csv<W: Write>(meal: &MealAnalysis, writer: W) -> Result<(), AssistantError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for item in &meal.items {
        csv_writer.write_record([
            item.ingredient_name.clone(),
            item.quantity.to_string(),
            item.unit.clone(),
            format!("{:.1}", item.total_calories),
            format!("{:.1}", item.proteins),
            format!("{:.1}", item.carbs),
            format!("{:.1}", item.fats),
            format!("{:.1}", item.fiber),
        ])?;
    }

    csv_writer.write_record([
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        format!("{:.1}", meal.total_calories),
        format!("{:.1}", meal.total_proteins),
        format!("{:.1}", meal.total_carbs),
        format!("{:.1}", meal.total_fats),
        format!("{:.1}", meal.total_fiber),
    ])?;

    csv_writer.flush()?;
    Ok(())
}
