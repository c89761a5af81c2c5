use evcharge_core::{ConfigError, InputError, ModelError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl AppError {
    /// Process exit status for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) | Self::Config(_) => 2,
            Self::Model(ModelError::ArtifactNotFound { .. }) => 3,
            Self::Model(
                ModelError::ArtifactCorrupt { .. } | ModelError::EncodingMismatch { .. },
            ) => 4,
            _ => 1,
        }
    }

    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
