use thiserror::Error;

/// Main error type for the journal
#[derive(Error, Debug)]
pub enum TradebookError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // Storage errors
    #[error("Stored data under '{key}' is corrupted: {reason}")]
    StorageCorrupted { key: String, reason: String },

    // Option errors
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    // Report errors
    #[error("No observation data available. Please save your observations first.")]
    NoObservation,

    #[error("PDF generation error: {0}")]
    Pdf(String),

    // Form errors
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for TradebookError
pub type Result<T> = std::result::Result<T, TradebookError>;

impl From<printpdf::Error> for TradebookError {
    fn from(err: printpdf::Error) -> Self {
        TradebookError::Pdf(err.to_string())
    }
}
