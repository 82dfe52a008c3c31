use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Storage operation failed: {0}")]
    StorageError(#[from] object_store::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FetchError {
    /// True for failures an operator fixes by changing environment
    /// configuration rather than by retrying the request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FetchError::ConfigError { .. }
                | FetchError::MissingConfigError { .. }
                | FetchError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
