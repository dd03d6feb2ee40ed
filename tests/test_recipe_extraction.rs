use cuisine_assistant::{
    extract_nutrition_analysis, extract_recipe, parse_ingredient_line, NutritionAggregator,
    NutritionCatalog, QuantitySpec, RecipeIngredient,
};

fn selection(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_reference_recipe_text() {
    let text = "TITRE: Soupe\nINGRÉDIENTS:\n- Carotte : 200 g\nPRÉPARATION:\n1. Couper\n2. Cuire\nTEMPS: 20 minutes\nDIFFICULTÉ: Facile";
    let recipe = extract_recipe(text, &selection(&["carotte"])).unwrap();

    assert_eq!(recipe.title, "Soupe");
    assert_eq!(recipe.ingredients, vec![RecipeIngredient::new("Carotte", 200.0, "g")]);
    assert_eq!(recipe.steps, vec!["Couper", "Cuire"]);
    assert_eq!(recipe.prep_time, "20 minutes");
    assert_eq!(recipe.difficulty, "Facile");
}

#[test]
fn test_typical_model_answer() {
    let text = r#"Voici une recette simple pour vous :

TITRE: Poêlée de poulet aux légumes

INGRÉDIENTS:
- Poulet : 300 g
- Courgette : 2 pièce
- 1 tasse de lait
- Ail - 2 gousse
- Sel et poivre

PRÉPARATION:
1. Couper le poulet en morceaux.
2. Faire dorer le poulet dans l'huile.
3) Ajouter la courgette et l'ail.
Laisser mijoter doucement.
4. Servir chaud.

TEMPS: 35 minutes
DIFFICULTÉ: Facile
CONSEILS: Ajoutez du thym frais à la fin."#;

    let recipe = extract_recipe(text, &selection(&["poulet", "courgette"])).unwrap();

    assert_eq!(recipe.title, "Poêlée de poulet aux légumes");
    assert_eq!(
        recipe.ingredients,
        vec![
            RecipeIngredient::new("Poulet", 300.0, "g"),
            RecipeIngredient::new("Courgette", 2.0, "pièce"),
            RecipeIngredient::new("de lait", 1.0, "tasse"),
            RecipeIngredient::new("Ail", 2.0, "gousse"),
            RecipeIngredient::new("Sel et poivre", 200.0, "g"),
        ]
    );
    assert_eq!(recipe.steps.len(), 4);
    assert_eq!(recipe.steps[2], "Ajouter la courgette et l'ail.");
    assert_eq!(recipe.tips, "Ajoutez du thym frais à la fin.");
}

#[test]
fn test_garbage_answer_still_yields_a_recipe() {
    let recipe = extract_recipe("Désolé, je ne peux pas.", &selection(&["riz", "œuf"])).unwrap();
    assert_eq!(recipe.title, "Plat aux riz, œuf");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.steps.len(), 4);
}

#[test]
fn test_empty_answer_is_no_result() {
    assert!(extract_recipe("", &selection(&["riz"])).is_none());
}

#[test]
fn test_ingredient_line_shapes() {
    assert_eq!(
        parse_ingredient_line("Farine : 250 g"),
        RecipeIngredient::new("Farine", 250.0, "g")
    );
    assert_eq!(
        parse_ingredient_line("3 œufs"),
        RecipeIngredient::new("œufs", 3.0, "g")
    );
    assert_eq!(
        parse_ingredient_line("Lait - 0,5 l"),
        RecipeIngredient::new("Lait", 0.5, "l")
    );
}

#[test]
fn test_spoon_quantities_through_meal_nutrition() {
    let text = "TITRE: Vinaigrette\nINGRÉDIENTS:\n- Huile d'olive : 2 c. à soupe\nPRÉPARATION:\n1. Mélanger";
    let recipe = extract_recipe(text, &selection(&["huile d'olive"])).unwrap();
    assert_eq!(
        recipe.ingredients,
        vec![RecipeIngredient::new("Huile d'olive", 2.0, "c. à soupe")]
    );

    let catalog = NutritionCatalog::builtin();
    let meal = NutritionAggregator::new(&catalog).compute_meal(&recipe.quantity_specs());
    // 30 g at 884 kcal per 100 g
    assert_eq!(meal.total_calories, 265.2);
    assert_eq!(meal.total_fats, 30.0);
}

#[test]
fn test_teaspoon_quantity_through_meal_nutrition() {
    let ingredient = parse_ingredient_line("Huile d'olive : 1 c. à café");
    assert_eq!(ingredient.unit, "c. à café");

    let catalog = NutritionCatalog::builtin();
    let spec = QuantitySpec::from(&ingredient);
    let meal = NutritionAggregator::new(&catalog).compute_meal(&[spec]);
    // 5 g at 884 kcal per 100 g
    assert_eq!(meal.total_calories, 44.2);
    assert_eq!(meal.total_fats, 5.0);
}

#[test]
fn test_nutrition_analysis_answer() {
    let text = "Voici l'analyse :\nCALORIES_TOTALES: 650 kcal\nPROTÉINES: 35,5 g\nGLUCIDES: 70 g\nLIPIDES: 22 g\nCONSEILS_NUTRITION: Ajoutez des fibres.";
    let record = extract_nutrition_analysis(text).unwrap();

    assert_eq!(record.total_calories, 650.0);
    // decimal commas are not decimal separators here
    assert_eq!(record.total_proteins, 35.0);
    assert_eq!(record.total_carbs, 70.0);
    assert_eq!(record.total_fats, 22.0);
    assert_eq!(record.health_tips, "Ajoutez des fibres.");

    assert!(extract_nutrition_analysis("CALORIES: inconnues").is_none());
}
