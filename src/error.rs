use thiserror::Error;

/// Errors raised while building or using a spelling model.
#[derive(Error, Debug)]
pub enum SpellfixError {
    /// The model cannot be used as configured: no training data, an empty
    /// state space, or an out-of-range floor probability.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize model: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to persist model file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl SpellfixError {
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SpellfixError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SpellfixError>;
