use super::{contains_token, header_value};
use crate::model::NutritionAnalysisRecord;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

const CALORIES_TOKENS: &[&str] = &["CALORIES_TOTALES:", "CALORIES:"];
const PROTEINS_TOKENS: &[&str] = &["PROTEINES:", "PROTÉINES:"];
const CARBS_TOKENS: &[&str] = &["GLUCIDES:"];
const FATS_TOKENS: &[&str] = &["LIPIDES:"];
const TIPS_TOKENS: &[&str] = &["CONSEILS_NUTRITION:"];

static DECIMAL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").ok());

/// Parse a CALORIES_TOTALES / PROTEINES / GLUCIDES / LIPIDES /
/// CONSEILS_NUTRITION answer.
///
/// The record is only valid when a strictly positive calorie total was found;
/// anything else is `None`.
pub fn extract_nutrition_analysis(text: &str) -> Option<NutritionAnalysisRecord> {
    let decimal = DECIMAL.as_ref()?;
    let first_number = |line: &str| -> Option<f64> {
        decimal
            .find(line)
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };

    let mut record = NutritionAnalysisRecord::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if contains_token(line, CALORIES_TOKENS) {
            if let Some(value) = first_number(line) {
                record.total_calories = value;
            }
        } else if contains_token(line, PROTEINS_TOKENS) {
            if let Some(value) = first_number(line) {
                record.total_proteins = value;
            }
        } else if contains_token(line, CARBS_TOKENS) {
            if let Some(value) = first_number(line) {
                record.total_carbs = value;
            }
        } else if contains_token(line, FATS_TOKENS) {
            if let Some(value) = first_number(line) {
                record.total_fats = value;
            }
        } else if contains_token(line, TIPS_TOKENS) {
            record.health_tips = header_value(line).to_string();
        }
    }

    if record.total_calories > 0.0 {
        Some(record)
    } else {
        debug!("Nutrition analysis without a positive calorie total");
        None
    }
}
