use crate::model::RecipeIngredient;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Quantity used when a line carries no recognizable amount
pub const DEFAULT_QUANTITY: f64 = 200.0;
/// Unit used when a line carries no recognizable unit
pub const DEFAULT_UNIT: &str = "g";

const NUMBER: &str = r"\d+(?:[.,]\d+)?";
/// A unit word, optionally followed by "à soupe" / "à café" ("c. à soupe")
const UNIT: &str = r"[a-zA-Zàâäéèêëïîôöùûüÿçœ.]*(?:\s+à\s+(?:soupe|café))?";

/// `name : quantity unit`
static NAME_COLON_QUANTITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(r"^([^:]+):\s*({NUMBER})\s*({UNIT})")).ok()
});

/// `quantity unit name`
static QUANTITY_FIRST: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(r"^({NUMBER})\s*({UNIT})\s+(.+)$")).ok()
});

/// `name - quantity unit`
static NAME_DASH_QUANTITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(r"^([^-]+)-\s*({NUMBER})\s*({UNIT})")).ok()
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    NameColonQuantity,
    QuantityFirst,
    NameDashQuantity,
}

impl Shape {
    const CASCADE: [Shape; 3] = [
        Shape::NameColonQuantity,
        Shape::QuantityFirst,
        Shape::NameDashQuantity,
    ];

    fn regex(self) -> Option<&'static Regex> {
        match self {
            Shape::NameColonQuantity => NAME_COLON_QUANTITY.as_ref(),
            Shape::QuantityFirst => QUANTITY_FIRST.as_ref(),
            Shape::NameDashQuantity => NAME_DASH_QUANTITY.as_ref(),
        }
    }
}

/// Parse the text of one ingredient bullet.
///
/// The shapes are tried in order and the first match wins. Whenever the first
/// captured group is a bare number the line is read quantity-first, whichever
/// shape fired. Lines matching no shape keep their whole text as the name with
/// [`DEFAULT_QUANTITY`] [`DEFAULT_UNIT`].
pub fn parse_ingredient_line(text: &str) -> RecipeIngredient {
    let text = text.trim();

    for shape in Shape::CASCADE {
        let Some(regex) = shape.regex() else {
            continue;
        };
        if let Some(caps) = regex.captures(text) {
            if let Some(ingredient) = interpret(shape, &caps, text) {
                return ingredient;
            }
        }
    }

    RecipeIngredient::new(text, DEFAULT_QUANTITY, DEFAULT_UNIT)
}

fn interpret(shape: Shape, caps: &Captures, text: &str) -> Option<RecipeIngredient> {
    let first = caps.get(1)?;

    if let Some(quantity) = parse_number(first.as_str()) {
        return Some(quantity_first(shape, caps, text, first.end(), quantity));
    }

    let name = first.as_str().trim();
    let quantity = parse_number(caps.get(2)?.as_str())?;
    let unit = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    Some(RecipeIngredient::new(name, quantity, unit_or_default(unit)))
}

/// Quantity-first reading of a match whose first group is a number
fn quantity_first(
    shape: Shape,
    caps: &Captures,
    text: &str,
    number_end: usize,
    quantity: f64,
) -> RecipeIngredient {
    if shape == Shape::QuantityFirst {
        let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let name = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
        return RecipeIngredient::new(name, quantity, unit_or_default(unit));
    }

    // Separator shapes: the name is what follows the leading number, the unit
    // is the one captured after the second number
    let unit = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let rest = text[number_end..]
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim();
    let name = if rest.is_empty() { text } else { rest };
    RecipeIngredient::new(name, quantity, unit_or_default(unit))
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    raw.replace(',', ".").parse().ok()
}

fn unit_or_default(unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        DEFAULT_UNIT.to_string()
    } else {
        unit.to_string()
    }
}
