use cuisine_assistant::export::{format_meal_report, format_recipe, write_meal_csv};
use cuisine_assistant::nutrition::{
    compare_with_needs, daily_needs, suggest_for_target, ActivityLevel,
};
use cuisine_assistant::{
    AnalysisPipeline, AppConfig, CatalogSource, NutritionAggregator, NutritionCatalog,
    OllamaProvider, QuantitySpec, RecipePipeline, RecipeRequest,
};
use log::info;
use std::env;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

const USAGE: &str = "Usage:
  cuisine-assistant status
  cuisine-assistant recipe <ingredient,...> [--cuisine <style>] [--difficulty <level>] [--time <max>]
  cuisine-assistant calories <name:qty[:unit]>... [--csv <file>]
  cuisine-assistant needs <age> <M|F> <activity> [name:qty[:unit]...]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = AppConfig::load()?;
    let catalog = NutritionCatalog::load(&CatalogSource::Csv(config.data.calories_csv.clone()));
    info!("Catalog ready with {} ingredients", catalog.len());
    let provider = OllamaProvider::new(&config.ollama)?;

    match command.as_str() {
        "status" => status(&provider, &catalog).await,
        "recipe" => recipe(&provider, &catalog, &args[1..]).await?,
        "calories" => calories(&provider, &catalog, &args[1..]).await?,
        "needs" => needs(&catalog, &args[1..])?,
        other => {
            eprintln!("Unknown command '{}'\n{}", other, USAGE);
        }
    }

    Ok(())
}

async fn status(provider: &OllamaProvider, catalog: &NutritionCatalog) {
    let report = provider.test_connection().await;
    println!("Ollama server: {}", yes_no(report.server_available));
    println!("Model {}: {}", provider.model(), yes_no(report.model_available));
    if let Some(response) = &report.test_response {
        println!("Test answer: {}", response);
    }
    if let Some(error) = &report.error {
        println!("Error: {}", error);
    }
    println!(
        "Catalog: {} ingredients in {} categories",
        catalog.len(),
        catalog.categories().len()
    );
}

async fn recipe(
    provider: &OllamaProvider,
    catalog: &NutritionCatalog,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    let (positional, options) = split_options(args)?;
    let selected: Vec<String> = positional
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::to_string)
        .collect();

    let request = RecipeRequest {
        cuisine: option_value(&options, "--cuisine"),
        difficulty: option_value(&options, "--difficulty"),
        max_prep_time: option_value(&options, "--time"),
    };

    let generated = RecipePipeline::new(provider, catalog)
        .generate(&selected, &request)
        .await?;
    println!("{}", format_recipe(&generated.recipe));
    println!("({:?})", generated.origin);
    Ok(())
}

async fn calories(
    provider: &OllamaProvider,
    catalog: &NutritionCatalog,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    let (positional, options) = split_options(args)?;
    let items = parse_foods(&positional)?;

    let report = AnalysisPipeline::new(provider, catalog).analyze(&items).await?;
    println!("{}", format_meal_report(&report));

    if let Some(path) = option_value(&options, "--csv") {
        let path = PathBuf::from(path);
        write_meal_csv(&report.meal, File::create(&path)?)?;
        println!("Analysis exported to {}", path.display());
    }
    Ok(())
}

fn needs(catalog: &NutritionCatalog, args: &[String]) -> Result<(), Box<dyn Error>> {
    let [age, gender, activity, foods @ ..] = args else {
        return Err(USAGE.into());
    };
    let age: u32 = age.parse()?;
    let needs = daily_needs(age, gender, ActivityLevel::from_label(activity));

    println!("Calories: {:.0} kcal", needs.calories);
    println!("Protéines: {:.1} g", needs.proteins);
    println!("Glucides: {:.1} g", needs.carbs);
    println!("Lipides: {:.1} g", needs.fats);

    if foods.is_empty() {
        return Ok(());
    }

    let meal = NutritionAggregator::new(catalog).compute_meal(&parse_foods(foods)?);
    let comparison = compare_with_needs(&meal, &needs);
    println!();
    println!(
        "Repas: {:.0} kcal, {:.1}% des besoins, reste {:.0} kcal",
        comparison.current_calories, comparison.percentage_of_needs, comparison.remaining_calories
    );

    let suggestions = suggest_for_target(catalog, needs.calories, &meal);
    if !suggestions.is_empty() {
        println!();
        println!("Suggestions:");
        for suggestion in suggestions {
            println!(
                "• {} {} {} ({:.0} kcal, {})",
                suggestion.name,
                suggestion.quantity,
                suggestion.unit,
                suggestion.calories,
                suggestion.group
            );
        }
    }
    Ok(())
}

fn parse_foods(args: &[String]) -> Result<Vec<QuantitySpec>, Box<dyn Error>> {
    let mut items = Vec::with_capacity(args.len());
    for arg in args {
        items.push(arg.parse::<QuantitySpec>()?);
    }
    Ok(items)
}

/// Separate `--flag value` pairs from positional arguments
fn split_options(args: &[String]) -> Result<(Vec<String>, Vec<(String, String)>), Box<dyn Error>> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            let value = iter
                .next()
                .ok_or_else(|| format!("Missing value for {}", arg))?;
            options.push((arg.clone(), value.clone()));
        } else {
            positional.push(arg.clone());
        }
    }

    Ok((positional, options))
}

fn option_value(options: &[(String, String)], name: &str) -> Option<String> {
    options
        .iter()
        .find(|(flag, _)| flag == name)
        .map(|(_, value)| value.clone())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
