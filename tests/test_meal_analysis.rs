use cuisine_assistant::export::write_meal_csv;
use cuisine_assistant::nutrition::{compare_with_needs, daily_needs, suggest_for_target};
use cuisine_assistant::{
    ActivityLevel, CatalogSource, NutritionAggregator, NutritionCatalog, QuantitySpec,
};
use std::path::PathBuf;

fn fixture_catalog() -> NutritionCatalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("calories.csv");
    NutritionCatalog::load(&CatalogSource::Csv(path))
}

#[test]
fn test_fixture_catalog_with_alternate_headers() {
    let catalog = fixture_catalog();

    // zero-calorie and unnamed rows are skipped
    assert_eq!(catalog.len(), 6);
    assert!(catalog.get("eau").is_none());

    let poulet = catalog.get("POULET").unwrap();
    assert_eq!(poulet.name, "poulet");
    assert_eq!(poulet.category, "Viande");
    assert_eq!(
        catalog.categories(),
        vec!["Céréale", "Fruit", "Légume", "Matière grasse", "Viande"]
    );
}

#[test]
fn test_missing_file_uses_builtin_catalog() {
    let catalog = NutritionCatalog::load(&CatalogSource::Csv(PathBuf::from(
        "/nonexistent/calories.csv",
    )));
    assert!(catalog.get("saumon").is_some());
    assert!(catalog.len() >= 20);
}

#[test]
fn test_compute_meal_from_fixture() {
    let catalog = fixture_catalog();
    let aggregator = NutritionAggregator::new(&catalog);
    let meal = aggregator.compute_meal(&[
        QuantitySpec::new("tomate", 200.0, "g"),
        QuantitySpec::new("poulet", 0.15, "kg"),
        QuantitySpec::new("huile d'olive", 1.0, "c. à soupe"),
        QuantitySpec::new("dragon", 100.0, "g"),
    ]);

    assert_eq!(meal.items.len(), 3);
    // 36 + 358.5 + 132.6
    assert_eq!(meal.total_calories, 527.1);

    let pct = meal.macro_percentages();
    assert!((pct.proteins + pct.carbs + pct.fats - 100.0).abs() <= 0.2);
}

#[test]
fn test_fuzzy_lookup_takes_first_catalog_match() {
    let catalog = fixture_catalog();
    let meal = NutritionAggregator::new(&catalog)
        .compute_meal(&[QuantitySpec::new("pomme", 100.0, "g")]);
    // exact match wins over "pomme de terre"
    assert_eq!(meal.items[0].ingredient_name, "pomme");

    let meal = NutritionAggregator::new(&catalog)
        .compute_meal(&[QuantitySpec::new("pom", 100.0, "g")]);
    assert_eq!(meal.items[0].ingredient_name, "pomme de terre");
}

#[test]
fn test_needs_comparison_and_suggestions() {
    let catalog = fixture_catalog();
    let meal = NutritionAggregator::new(&catalog)
        .compute_meal(&[QuantitySpec::new("riz", 100.0, "g")]);
    let needs = daily_needs(30, "F", ActivityLevel::from_label("sédentaire"));
    assert_eq!(needs.calories, 1660.0);

    let comparison = compare_with_needs(&meal, &needs);
    assert_eq!(comparison.current_calories, 365.0);
    assert_eq!(comparison.remaining_calories, 1295.0);
    assert_eq!(comparison.percentage_of_needs, 22.0);

    let suggestions = suggest_for_target(&catalog, needs.calories, &meal);
    let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["poulet", "tomate", "pomme de terre", "riz", "pomme"]);

    let total: f64 = suggestions.iter().map(|s| s.calories).sum();
    // every group is visited before the gap is closed
    assert_eq!(total, 1050.0);
}

#[test]
fn test_csv_export() {
    let catalog = fixture_catalog();
    let meal = NutritionAggregator::new(&catalog).compute_meal(&[
        QuantitySpec::new("riz", 100.0, "g"),
        QuantitySpec::new("pomme", 1.0, "pièce"),
    ]);

    let mut out = Vec::new();
    write_meal_csv(&meal, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("riz,100,g,365.0,7.1,77.2,0.7,1.3"));
    assert!(text.contains("pomme,1,pièce,52.0,0.3,13.8,0.2,2.4"));
    assert!(text.trim_end().ends_with("TOTAL,,,417.0,7.4,91.0,0.9,3.7"));
}
