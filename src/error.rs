use thiserror::Error;

#[derive(Error, Debug)]
pub enum DicelistError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid word pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("No words found")]
    NoCandidates,

    #[error("Expected at least {needed} words, found {found}")]
    InsufficientCandidates { needed: usize, found: usize },

    #[error("Value {value} out of range for {num_dice} dice")]
    DiceRange { value: usize, num_dice: u32 },

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type DlResult<T> = Result<T, DicelistError>;
