use crate::catalog::NutritionCatalog;
use crate::error::AssistantError;
use crate::extractors::{extract_recipe, fallback_title};
use crate::model::{NutritionTotals, RecipeIngredient, RecipeRecord, RecipeRequest};
use crate::nutrition::NutritionAggregator;
use crate::providers::{inject_recipe_request, TextGenerator, RECIPE_SYSTEM_PROMPT};
use log::{info, warn};
use serde::Serialize;

/// Where a generated recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecipeOrigin {
    /// Parsed from the model's answer
    Model,
    /// Built from a predefined template
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedRecipe {
    pub recipe: RecipeRecord,
    pub origin: RecipeOrigin,
}

struct RecipeTemplate {
    title: &'static str,
    ingredients_needed: &'static [&'static str],
    steps: &'static [&'static str],
    prep_time: &'static str,
    difficulty: &'static str,
}

const TEMPLATES: [RecipeTemplate; 4] = [
    RecipeTemplate {
        title: "Sauté de légumes",
        ingredients_needed: &["carotte", "oignon", "tomate", "courgette"],
        steps: &[
            "Couper tous les légumes en dés",
            "Faire chauffer l'huile dans une poêle",
            "Faire revenir l'oignon jusqu'à transparence",
            "Ajouter les autres légumes et cuire 15 minutes",
            "Assaisonner et servir",
        ],
        prep_time: "25 minutes",
        difficulty: "Facile",
    },
    RecipeTemplate {
        title: "Omelette aux légumes",
        ingredients_needed: &["œuf", "tomate", "oignon", "fromage"],
        steps: &[
            "Battre les œufs dans un bol",
            "Faire revenir les légumes dans une poêle",
            "Verser les œufs battus sur les légumes",
            "Ajouter le fromage et plier l'omelette",
            "Servir immédiatement",
        ],
        prep_time: "15 minutes",
        difficulty: "Facile",
    },
    RecipeTemplate {
        title: "Riz sauté",
        ingredients_needed: &["riz", "œuf", "carotte", "oignon"],
        steps: &[
            "Cuire le riz à l'eau bouillante",
            "Faire revenir les légumes dans une poêle",
            "Ajouter le riz cuit et mélanger",
            "Incorporer les œufs battus",
            "Cuire en remuant jusqu'à ce que les œufs soient pris",
        ],
        prep_time: "30 minutes",
        difficulty: "Moyen",
    },
    RecipeTemplate {
        title: "Salade complète",
        ingredients_needed: &["tomate", "carotte", "œuf", "fromage"],
        steps: &[
            "Laver et couper les légumes",
            "Cuire les œufs durs",
            "Disposer tous les ingrédients dans un saladier",
            "Assaisonner avec huile et vinaigre",
            "Mélanger et servir frais",
        ],
        prep_time: "20 minutes",
        difficulty: "Facile",
    },
];

const GENERIC_TEMPLATE_STEPS: [&str; 5] = [
    "Préparer et nettoyer tous les ingrédients",
    "Faire revenir les ingrédients dans une poêle",
    "Assaisonner selon votre goût",
    "Cuire jusqu'à ce que ce soit tendre",
    "Servir chaud",
];

/// Template recipes list every selected ingredient as one portion
const TEMPLATE_QUANTITY: f64 = 1.0;
const TEMPLATE_UNIT: &str = "portion";

/// Recipe generation with a template fallback.
///
/// The model is only asked when it reports ready; a failed request or an
/// unreadable answer falls back to the templates. Every returned recipe has
/// its nutrition totals computed from the catalog.
pub struct RecipePipeline<'a> {
    generator: &'a dyn TextGenerator,
    catalog: &'a NutritionCatalog,
}

impl<'a> RecipePipeline<'a> {
    pub fn new(generator: &'a dyn TextGenerator, catalog: &'a NutritionCatalog) -> Self {
        Self { generator, catalog }
    }

    pub async fn generate(
        &self,
        selected: &[String],
        request: &RecipeRequest,
    ) -> Result<GeneratedRecipe, AssistantError> {
        let selected: Vec<String> = selected
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if selected.is_empty() {
            return Err(AssistantError::NoIngredients);
        }

        let (recipe, origin) = match self.ask_model(&selected, request).await {
            Some(recipe) => (recipe, RecipeOrigin::Model),
            None => (template_recipe(&selected), RecipeOrigin::Template),
        };
        info!("Recipe '{}' built from {:?}", recipe.title, origin);

        let meal = NutritionAggregator::new(self.catalog).compute_meal(&recipe.quantity_specs());
        Ok(GeneratedRecipe {
            recipe: recipe.with_nutrition(NutritionTotals::from(&meal)),
            origin,
        })
    }

    async fn ask_model(
        &self,
        selected: &[String],
        request: &RecipeRequest,
    ) -> Option<RecipeRecord> {
        let status = self.generator.status().await;
        if !status.is_ready() {
            info!("{} is {}, using a template recipe", self.generator.name(), status);
            return None;
        }

        let prompt = inject_recipe_request(selected, request);
        match self.generator.generate(&prompt, Some(RECIPE_SYSTEM_PROMPT)).await {
            Ok(text) => {
                let recipe = extract_recipe(&text, selected);
                if recipe.is_none() {
                    warn!("Model answer could not be read as a recipe");
                }
                recipe
            }
            Err(e) => {
                warn!("Recipe generation failed: {}", e);
                None
            }
        }
    }
}

/// Best matching predefined recipe for the selection.
///
/// The template sharing the most ingredients with the selection wins, the
/// first one on ties. Without any shared ingredient a generic recipe titled
/// after the selection is returned.
pub fn template_recipe(selected: &[String]) -> RecipeRecord {
    let ingredients: Vec<RecipeIngredient> = selected
        .iter()
        .map(|name| RecipeIngredient::new(name.as_str(), TEMPLATE_QUANTITY, TEMPLATE_UNIT))
        .collect();

    let mut best: Option<&RecipeTemplate> = None;
    let mut best_matches = 0;
    for template in &TEMPLATES {
        let matches = selected
            .iter()
            .filter(|name| template.ingredients_needed.contains(&name.to_lowercase().as_str()))
            .count();
        if matches > best_matches {
            best_matches = matches;
            best = Some(template);
        }
    }

    match best {
        Some(template) => RecipeRecord {
            title: template.title.to_string(),
            ingredients,
            steps: template.steps.iter().map(|s| s.to_string()).collect(),
            prep_time: template.prep_time.to_string(),
            difficulty: template.difficulty.to_string(),
            ..RecipeRecord::default()
        },
        None => RecipeRecord {
            title: fallback_title(selected),
            ingredients,
            steps: GENERIC_TEMPLATE_STEPS.iter().map(|s| s.to_string()).collect(),
            prep_time: "30 minutes".to_string(),
            difficulty: "Facile".to_string(),
            ..RecipeRecord::default()
        },
    }
}
