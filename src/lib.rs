//! Cooking and nutrition assistant
//!
//! Turns free-text answers of a local language model into structured recipes
//! and nutrition analyses, and computes meal nutrition from a per-100g
//! ingredient catalog.
//!
//! ```no_run
//! use cuisine_assistant::{NutritionAggregator, NutritionCatalog, QuantitySpec};
//!
//! let catalog = NutritionCatalog::builtin();
//! let meal = NutritionAggregator::new(&catalog)
//!     .compute_meal(&[QuantitySpec::new("tomate", 200.0, "g")]);
//! println!("{} kcal", meal.total_calories);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod extractors;
pub mod model;
pub mod nutrition;
pub mod pipelines;
pub mod providers;
pub mod units;

pub use catalog::{CatalogSource, NutritionCatalog};
pub use config::{AppConfig, DataConfig, OllamaConfig};
pub use error::AssistantError;
pub use extractors::{extract_nutrition_analysis, extract_recipe, parse_ingredient_line};
pub use model::{
    DailyNeeds, IngredientProfile, ItemNutrition, MacroPercentages, MealAnalysis,
    NutritionAnalysisRecord, NutritionTotals, QuantitySpec, RecipeIngredient, RecipeRecord,
    RecipeRequest,
};
pub use nutrition::{
    compare_with_needs, daily_needs, suggest_for_target, ActivityLevel, NeedsComparison,
    NutritionAggregator,
};
pub use pipelines::{
    AnalysisOrigin, AnalysisPipeline, GeneratedRecipe, MealReport, RecipeOrigin, RecipePipeline,
};
pub use providers::{ConnectionReport, OllamaProvider, ServiceStatus, TextGenerator};
pub use units::UnitConverter;
