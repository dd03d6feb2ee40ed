use super::ingredient_line::{parse_ingredient_line, DEFAULT_QUANTITY, DEFAULT_UNIT};
use super::{header_value, starts_with_header};
use crate::model::{RecipeIngredient, RecipeRecord};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

const TITLE_HEADERS: &[&str] = &["TITRE:", "TITLE:"];
const INGREDIENTS_HEADERS: &[&str] = &["INGRÉDIENTS:", "INGREDIENTS:"];
const STEPS_HEADERS: &[&str] = &["PRÉPARATION:", "PREPARATION:"];
const TIME_HEADERS: &[&str] = &["TEMPS:"];
const DIFFICULTY_HEADERS: &[&str] = &["DIFFICULTÉ:", "DIFFICULTE:"];
const TIPS_HEADERS: &[&str] = &["CONSEILS:"];

/// Steps used when the model output has none
const GENERIC_STEPS: [&str; 4] = [
    "Préparer et nettoyer tous les ingrédients",
    "Faire revenir les ingrédients dans une poêle",
    "Assaisonner selon votre goût",
    "Cuire jusqu'à ce que ce soit tendre, puis servir chaud",
];

/// Leading ordinal marker of a step: "1.", "2)", "3 -", or a bare dash
static STEP_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\s*[.):\-]?|-)\s*").ok());

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Ingredients,
    Steps,
}

/// Parse model output in the TITRE / INGRÉDIENTS / PRÉPARATION format.
///
/// Returns `None` for empty text. Otherwise a record is always produced:
/// missing title, ingredients or steps are synthesized from
/// `original_ingredients`.
pub fn extract_recipe(text: &str, original_ingredients: &[String]) -> Option<RecipeRecord> {
    if text.trim().is_empty() {
        return None;
    }
    let step_marker = STEP_MARKER.as_ref()?;

    let mut recipe = RecipeRecord::default();
    let mut section = Section::None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if starts_with_header(line, TITLE_HEADERS) {
            recipe.title = header_value(line).to_string();
            section = Section::None;
        } else if starts_with_header(line, INGREDIENTS_HEADERS) {
            section = Section::Ingredients;
        } else if starts_with_header(line, STEPS_HEADERS) {
            section = Section::Steps;
        } else if starts_with_header(line, TIME_HEADERS) {
            recipe.prep_time = header_value(line).to_string();
            section = Section::None;
        } else if starts_with_header(line, DIFFICULTY_HEADERS) {
            recipe.difficulty = header_value(line).to_string();
            section = Section::None;
        } else if starts_with_header(line, TIPS_HEADERS) {
            recipe.tips = header_value(line).to_string();
            section = Section::None;
        } else if section == Section::Ingredients {
            if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
                recipe.ingredients.push(parse_ingredient_line(rest));
            }
        } else if section == Section::Steps && is_step_line(line) {
            let step = step_marker.replace(line, "");
            recipe.steps.push(step.trim().to_string());
        }
    }

    apply_fallbacks(&mut recipe, original_ingredients);
    Some(recipe)
}

fn is_step_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || c == '-')
}

fn apply_fallbacks(recipe: &mut RecipeRecord, original_ingredients: &[String]) {
    if recipe.title.is_empty() {
        debug!("No title in model output, synthesizing one");
        recipe.title = fallback_title(original_ingredients);
    }

    if recipe.ingredients.is_empty() {
        debug!("No ingredients in model output, using the selection");
        recipe.ingredients = original_ingredients
            .iter()
            .map(|name| RecipeIngredient::new(name.as_str(), DEFAULT_QUANTITY, DEFAULT_UNIT))
            .collect();
    }

    if recipe.steps.is_empty() {
        debug!("No steps in model output, using the generic procedure");
        recipe.steps = generic_steps();
    }
}

/// Title made from the first three selected ingredients
pub fn fallback_title(original_ingredients: &[String]) -> String {
    let names: Vec<&str> = original_ingredients
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();
    if names.is_empty() {
        "Recette maison".to_string()
    } else {
        format!("Plat aux {}", names.join(", "))
    }
}

pub fn generic_steps() -> Vec<String> {
    GENERIC_STEPS.iter().map(|step| step.to_string()).collect()
}
