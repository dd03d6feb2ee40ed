//! Extraction of structured records from free-text model output
//!
//! Both formats are line oriented with French `LABEL:` headers. Parsing never
//! errors: a missing result is `None` and callers pick their own fallback.

mod ingredient_line;
mod nutrition;
mod recipe;

pub use self::ingredient_line::{parse_ingredient_line, DEFAULT_QUANTITY, DEFAULT_UNIT};
pub use self::nutrition::extract_nutrition_analysis;
pub use self::recipe::{extract_recipe, fallback_title, generic_steps};

/// Whether `line` starts with one of `headers`, ignoring case
fn starts_with_header(line: &str, headers: &[&str]) -> bool {
    let upper = line.to_uppercase();
    headers.iter().any(|header| upper.starts_with(header))
}

/// Whether `line` contains one of `tokens`, ignoring case
fn contains_token(line: &str, tokens: &[&str]) -> bool {
    let upper = line.to_uppercase();
    tokens.iter().any(|token| upper.contains(token))
}

/// Text after the first colon, trimmed
fn header_value(line: &str) -> &str {
    line.split_once(':')
        .map(|(_, value)| value.trim())
        .unwrap_or("")
}
