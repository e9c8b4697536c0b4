#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown {kind}: '{key}'")]
    NotFound { kind: &'static str, key: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
