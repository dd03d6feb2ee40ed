//! In-memory nutrition database
//!
//! Profiles are loaded once from a CSV file (or the built-in defaults) and
//! looked up by exact name, name substring or category. Loading never fails:
//! unreadable or empty sources fall back to the built-in set.

use crate::model::IngredientProfile;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Where the catalog takes its profiles from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// CSV file on disk; a missing file means built-in data
    Csv(PathBuf),
    /// Built-in ingredient set
    Builtin,
}

/// (name, kcal, proteins, carbs, fats, fiber, category), per 100 g
const BUILTIN_INGREDIENTS: &[(&str, f64, f64, f64, f64, f64, &str)] = &[
    ("tomate", 18.0, 0.9, 3.9, 0.2, 1.2, "Légume"),
    ("poulet", 239.0, 27.3, 0.0, 13.6, 0.0, "Viande"),
    ("riz", 365.0, 7.1, 77.2, 0.7, 1.3, "Céréale"),
    ("carotte", 41.0, 0.9, 9.6, 0.2, 2.8, "Légume"),
    ("oignon", 40.0, 1.1, 9.3, 0.1, 1.7, "Légume"),
    ("pomme de terre", 77.0, 2.1, 17.6, 0.1, 2.1, "Légume"),
    ("bœuf", 250.0, 26.1, 0.0, 15.4, 0.0, "Viande"),
    ("saumon", 208.0, 25.4, 0.0, 10.4, 0.0, "Poisson"),
    ("œuf", 155.0, 13.0, 1.1, 11.0, 0.0, "Produit laitier"),
    ("lait", 42.0, 3.4, 5.0, 1.0, 0.0, "Produit laitier"),
    ("fromage", 402.0, 25.0, 1.3, 33.1, 0.0, "Produit laitier"),
    ("pain", 265.0, 9.0, 49.4, 3.2, 2.7, "Céréale"),
    ("pâtes", 371.0, 13.0, 74.7, 1.5, 3.2, "Céréale"),
    ("huile d'olive", 884.0, 0.0, 0.0, 100.0, 0.0, "Matière grasse"),
    ("beurre", 717.0, 0.9, 0.1, 81.1, 0.0, "Matière grasse"),
    ("banane", 89.0, 1.1, 22.8, 0.3, 2.6, "Fruit"),
    ("pomme", 52.0, 0.3, 13.8, 0.2, 2.4, "Fruit"),
    ("épinard", 23.0, 2.9, 3.6, 0.4, 2.2, "Légume"),
    ("champignon", 22.0, 3.1, 3.3, 0.3, 1.0, "Légume"),
    ("ail", 149.0, 6.4, 33.1, 0.5, 2.1, "Aromate"),
    ("courgette", 17.0, 1.2, 3.1, 0.3, 1.0, "Légume"),
    ("lentilles", 116.0, 9.0, 20.1, 0.4, 7.9, "Légumineuse"),
    ("thon", 132.0, 28.0, 0.0, 1.3, 0.0, "Poisson"),
    ("yaourt nature", 61.0, 3.5, 4.7, 3.3, 0.0, "Produit laitier"),
];

/// Default category for rows without one
const DEFAULT_CATEGORY: &str = "Autre";

#[derive(Debug, Default)]
struct Entries {
    profiles: Vec<IngredientProfile>,
    index: HashMap<String, usize>,
}

impl Entries {
    fn from_profiles(profiles: Vec<IngredientProfile>) -> Self {
        let mut entries = Entries::default();
        for profile in profiles {
            entries.insert(profile);
        }
        entries
    }

    /// Later rows with the same name replace earlier ones in place
    fn insert(&mut self, profile: IngredientProfile) {
        match self.index.get(&profile.name) {
            Some(&position) => self.profiles[position] = profile,
            None => {
                self.index.insert(profile.name.clone(), self.profiles.len());
                self.profiles.push(profile);
            }
        }
    }
}

/// Ingredient name → nutrition profile lookup.
///
/// Reads share a lock with [`NutritionCatalog::reload`], so a lookup never
/// observes a half-loaded catalog.
#[derive(Debug)]
pub struct NutritionCatalog {
    entries: RwLock<Entries>,
}

impl Default for NutritionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NutritionCatalog {
    /// Catalog holding the built-in ingredient set
    pub fn builtin() -> Self {
        Self {
            entries: RwLock::new(Entries::from_profiles(builtin_profiles())),
        }
    }

    /// Load a catalog from `source`, degrading to the built-in set
    pub fn load(source: &CatalogSource) -> Self {
        Self {
            entries: RwLock::new(Entries::from_profiles(load_profiles(source))),
        }
    }

    /// Load a catalog from CSV content, degrading to the built-in set
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let profiles = match parse_csv(reader) {
            Ok(profiles) if !profiles.is_empty() => profiles,
            Ok(_) => {
                warn!("Nutrition data contained no usable rows, using built-in ingredients");
                builtin_profiles()
            }
            Err(e) => {
                warn!("Failed to read nutrition data: {}, using built-in ingredients", e);
                builtin_profiles()
            }
        };
        Self {
            entries: RwLock::new(Entries::from_profiles(profiles)),
        }
    }

    /// Replace every profile with the content of `source`
    pub fn reload(&self, source: &CatalogSource) {
        let fresh = Entries::from_profiles(load_profiles(source));
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *entries = fresh;
    }

    /// Exact, case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<IngredientProfile> {
        let key = name.trim().to_lowercase();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .index
            .get(&key)
            .map(|&position| entries.profiles[position].clone())
    }

    /// Profiles whose name contains `query`, in catalog order
    pub fn search(&self, query: &str) -> Vec<IngredientProfile> {
        let query = query.trim().to_lowercase();
        self.filtered(|profile| profile.name.contains(&query))
    }

    /// Profiles of the given category, in catalog order
    pub fn by_category(&self, category: &str) -> Vec<IngredientProfile> {
        self.filtered(|profile| profile.category == category)
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut categories: Vec<String> = entries
            .profiles
            .iter()
            .map(|profile| profile.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Every profile, in catalog order
    pub fn all(&self) -> Vec<IngredientProfile> {
        self.filtered(|_| true)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .profiles
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filtered<F>(&self, predicate: F) -> Vec<IngredientProfile>
    where
        F: Fn(&IngredientProfile) -> bool,
    {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .profiles
            .iter()
            .filter(|profile| predicate(profile))
            .cloned()
            .collect()
    }
}

fn builtin_profiles() -> Vec<IngredientProfile> {
    BUILTIN_INGREDIENTS
        .iter()
        .map(
            |&(name, calories, proteins, carbs, fats, fiber, category)| IngredientProfile {
                name: name.to_string(),
                calories_per_100g: calories,
                proteins,
                carbs,
                fats,
                fiber,
                category: category.to_string(),
            },
        )
        .collect()
}

fn load_profiles(source: &CatalogSource) -> Vec<IngredientProfile> {
    let path = match source {
        CatalogSource::Builtin => {
            debug!("Using built-in ingredients");
            return builtin_profiles();
        }
        CatalogSource::Csv(path) => path,
    };

    match read_csv_file(path) {
        Ok(profiles) if !profiles.is_empty() => {
            info!(
                "Loaded {} ingredients from {}",
                profiles.len(),
                path.display()
            );
            profiles
        }
        Ok(_) => {
            warn!(
                "No usable rows in {}, using built-in ingredients",
                path.display()
            );
            builtin_profiles()
        }
        Err(e) => {
            warn!(
                "Could not load {}: {}, using built-in ingredients",
                path.display(),
                e
            );
            builtin_profiles()
        }
    }
}

fn read_csv_file(path: &Path) -> Result<Vec<IngredientProfile>, csv::Error> {
    let file = File::open(path)?;
    parse_csv(file)
}

/// Column positions resolved from the header row, accepting alternate names
struct Columns {
    name: Option<usize>,
    calories: Option<usize>,
    proteins: Option<usize>,
    carbs: Option<usize>,
    fats: Option<usize>,
    fiber: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            aliases.iter().find_map(|alias| {
                headers
                    .iter()
                    .position(|header| header.trim().eq_ignore_ascii_case(alias))
            })
        };

        Columns {
            name: find(&["name", "food"]),
            calories: find(&["calories", "energy"]),
            proteins: find(&["protein", "proteins"]),
            carbs: find(&["carbs", "carbohydrates"]),
            fats: find(&["fat", "fats"]),
            fiber: find(&["fiber"]),
            category: find(&["category", "food_group"]),
        }
    }
}

fn parse_csv<R: Read>(reader: R) -> Result<Vec<IngredientProfile>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(reader.headers()?);

    let mut profiles = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping malformed row: {}", e);
                continue;
            }
        };
        if let Some(profile) = parse_row(&record, &columns) {
            profiles.push(profile);
        }
    }
    Ok(profiles)
}

/// Build one profile; `None` skips the row (missing name, non-positive or
/// unparseable calories, unparseable nutrient values)
fn parse_row(record: &StringRecord, columns: &Columns) -> Option<IngredientProfile> {
    let text = |column: Option<usize>| column.and_then(|i| record.get(i)).unwrap_or("");
    let number = |column: Option<usize>| -> Option<f64> {
        let raw = text(column);
        if raw.is_empty() {
            Some(0.0)
        } else {
            raw.replace(',', ".").parse::<f64>().ok()
        }
    };

    let name = text(columns.name).to_lowercase();
    let calories = number(columns.calories)?;
    if name.is_empty() || calories <= 0.0 {
        return None;
    }

    let category = match text(columns.category) {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    };

    Some(IngredientProfile {
        name,
        calories_per_100g: calories,
        proteins: number(columns.proteins)?,
        carbs: number(columns.carbs)?,
        fats: number(columns.fats)?,
        fiber: number(columns.fiber)?,
        category,
    })
}
