use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown commodity '{commodity}' (known: {known})")]
    UnknownCommodity { commodity: String, known: String },

    #[error("Insufficient data for {commodity}: {rows} rows, need more than {features}")]
    InsufficientData {
        commodity: String,
        rows: usize,
        features: usize,
    },

    #[error("Estimation error: {0}")]
    Estimation(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
