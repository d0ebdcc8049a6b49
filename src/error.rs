use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Meal period not found: {0}")]
    MealPeriodNotFound(String),

    #[error("No menu data for this meal period")]
    NoMenuData,
}

pub type Result<T> = std::result::Result<T, DiningError>;
