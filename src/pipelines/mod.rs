//! Model-backed workflows with deterministic fallbacks

pub mod analysis;
pub mod recipe;

#[cfg(test)]
mod testing;

pub use analysis::{AnalysisOrigin, AnalysisPipeline, MealReport, DEFAULT_ADVICE};
pub use recipe::{template_recipe, GeneratedRecipe, RecipeOrigin, RecipePipeline};
