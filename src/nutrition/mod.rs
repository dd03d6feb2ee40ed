//! Nutrition computations over a catalog: meal totals, daily needs and
//! portion suggestions

mod aggregator;
mod daily_needs;
mod suggestions;

pub use self::aggregator::{round1, NutritionAggregator};
pub use self::daily_needs::{
    compare_with_needs, daily_needs, ActivityLevel, NeedsComparison, NutrientComparison,
};
pub use self::suggestions::{suggest_for_target, IngredientSuggestion};
