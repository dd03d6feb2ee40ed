use thiserror::Error;

/// Errors that can occur while talking to the inference server or loading data
#[derive(Error, Debug)]
pub enum AssistantError {
    /// HTTP request to the inference server failed
    #[error("Request to inference server failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The inference server answered but reported a failure
    #[error("Generation failed: {0}")]
    GenerationError(String),

    /// A recipe was requested without any ingredient
    #[error("At least one ingredient must be selected")]
    NoIngredients,

    /// Caller supplied input the operation cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Reading or writing tabular data failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
