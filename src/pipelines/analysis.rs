use crate::catalog::NutritionCatalog;
use crate::error::AssistantError;
use crate::extractors::extract_nutrition_analysis;
use crate::model::{MealAnalysis, NutritionAnalysisRecord, QuantitySpec};
use crate::nutrition::NutritionAggregator;
use crate::providers::{inject_advice, inject_foods, TextGenerator, ANALYSIS_SYSTEM_PROMPT};
use log::{info, warn};
use serde::Serialize;

/// Advice used when the model could not provide any
pub const DEFAULT_ADVICE: &str =
    "Équilibrez votre assiette avec des légumes à chaque repas et adaptez les portions à votre activité.";

/// Where the analysis record of a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisOrigin {
    /// Parsed from the model's answer
    Model,
    /// Rebuilt from the catalog totals
    Database,
}

/// Catalog computation of a meal together with the analysis shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealReport {
    pub meal: MealAnalysis,
    pub analysis: NutritionAnalysisRecord,
    pub origin: AnalysisOrigin,
}

/// Meal analysis by the model, with the catalog as a fallback
pub struct AnalysisPipeline<'a> {
    generator: &'a dyn TextGenerator,
    catalog: &'a NutritionCatalog,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(generator: &'a dyn TextGenerator, catalog: &'a NutritionCatalog) -> Self {
        Self { generator, catalog }
    }

    pub async fn analyze(&self, items: &[QuantitySpec]) -> Result<MealReport, AssistantError> {
        if items.is_empty() {
            return Err(AssistantError::InvalidInput(
                "at least one food is needed for an analysis".to_string(),
            ));
        }

        let meal = NutritionAggregator::new(self.catalog).compute_meal(items);

        let status = self.generator.status().await;
        if !status.is_ready() {
            info!("{} is {}, analysis from the database only", self.generator.name(), status);
            return Ok(database_report(meal, DEFAULT_ADVICE.to_string()));
        }

        match self
            .generator
            .generate(&inject_foods(items), Some(ANALYSIS_SYSTEM_PROMPT))
            .await
        {
            Ok(text) => {
                if let Some(analysis) = extract_nutrition_analysis(&text) {
                    info!("Meal analysis read from the model answer");
                    return Ok(MealReport {
                        meal,
                        analysis,
                        origin: AnalysisOrigin::Model,
                    });
                }
                warn!("Model answer had no usable calorie total");
            }
            Err(e) => warn!("Meal analysis request failed: {}", e),
        }

        let advice = self.ask_advice(&meal, items).await;
        Ok(database_report(meal, advice))
    }

    async fn ask_advice(&self, meal: &MealAnalysis, items: &[QuantitySpec]) -> String {
        match self
            .generator
            .generate(&inject_advice(meal, items), Some(ANALYSIS_SYSTEM_PROMPT))
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => DEFAULT_ADVICE.to_string(),
            Err(e) => {
                warn!("Advice request failed: {}", e);
                DEFAULT_ADVICE.to_string()
            }
        }
    }
}

fn database_report(meal: MealAnalysis, health_tips: String) -> MealReport {
    let analysis = NutritionAnalysisRecord {
        total_calories: meal.total_calories,
        total_proteins: meal.total_proteins,
        total_carbs: meal.total_carbs,
        total_fats: meal.total_fats,
        health_tips,
    };
    MealReport {
        meal,
        analysis,
        origin: AnalysisOrigin::Database,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::testing::StubGenerator;
    use crate::providers::ServiceStatus;

    fn meal_items() -> Vec<QuantitySpec> {
        vec![
            QuantitySpec::new("poulet", 150.0, "g"),
            QuantitySpec::new("riz", 100.0, "g"),
        ]
    }

    #[tokio::test]
    async fn test_model_analysis() {
        let generator = StubGenerator::ready(vec![Some(
            "CALORIES_TOTALES: 720 kcal\nPROTEINES: 48 g\nGLUCIDES: 77 g\nLIPIDES: 21 g\nCONSEILS_NUTRITION: Ajoutez des légumes."
                .to_string(),
        )]);
        let catalog = NutritionCatalog::builtin();
        let report = AnalysisPipeline::new(&generator, &catalog)
            .analyze(&meal_items())
            .await
            .unwrap();

        assert_eq!(report.origin, AnalysisOrigin::Model);
        assert_eq!(report.analysis.total_calories, 720.0);
        assert_eq!(report.analysis.health_tips, "Ajoutez des légumes.");
        // 239 * 1.5 + 365
        assert_eq!(report.meal.total_calories, 723.5);
        assert_eq!(generator.calls(), 1);
        assert!(generator.prompts()[0].contains("- poulet : 150 g"));
    }

    #[tokio::test]
    async fn test_unreadable_answer_falls_back_with_advice() {
        let generator = StubGenerator::ready(vec![
            Some("Ce repas semble équilibré.".to_string()),
            Some("Ajoutez une portion de légumes verts.".to_string()),
        ]);
        let catalog = NutritionCatalog::builtin();
        let report = AnalysisPipeline::new(&generator, &catalog)
            .analyze(&meal_items())
            .await
            .unwrap();

        assert_eq!(report.origin, AnalysisOrigin::Database);
        assert_eq!(report.analysis.total_calories, report.meal.total_calories);
        assert_eq!(report.analysis.total_fats, report.meal.total_fats);
        assert_eq!(report.analysis.health_tips, "Ajoutez une portion de légumes verts.");
        assert_eq!(generator.calls(), 2);
        assert!(generator.prompts()[1].contains("724 kcal"));
    }

    #[tokio::test]
    async fn test_failures_use_default_advice() {
        let generator = StubGenerator::ready(vec![None, None]);
        let catalog = NutritionCatalog::builtin();
        let report = AnalysisPipeline::new(&generator, &catalog)
            .analyze(&meal_items())
            .await
            .unwrap();

        assert_eq!(report.origin, AnalysisOrigin::Database);
        assert_eq!(report.analysis.health_tips, DEFAULT_ADVICE);
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_service_skips_requests() {
        let generator = StubGenerator::new(ServiceStatus::Failed("HTTP 500".to_string()), vec![]);
        let catalog = NutritionCatalog::builtin();
        let report = AnalysisPipeline::new(&generator, &catalog)
            .analyze(&meal_items())
            .await
            .unwrap();

        assert_eq!(report.origin, AnalysisOrigin::Database);
        assert_eq!(report.analysis.health_tips, DEFAULT_ADVICE);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_meal_is_rejected() {
        let generator = StubGenerator::ready(vec![]);
        let catalog = NutritionCatalog::builtin();
        let result = AnalysisPipeline::new(&generator, &catalog).analyze(&[]).await;
        assert!(matches!(result, Err(AssistantError::InvalidInput(_))));
    }
}
