//! Error types for dhwani-nmt organized by lifecycle stage.

use ndarray::ShapeError;
use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Translation core error variants organized by lifecycle stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup stage error (vocabulary or checkpoint loading)
    #[error(transparent)]
    Startup(#[from] StartupError),

    /// Model inference stage error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failure inside an external translation backend
    #[error("translation backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Startup errors: missing or corrupt vocabulary and checkpoint artifacts.
///
/// These are fatal; a model that fails to start can never serve translations.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No checkpoint subdirectory found under the checkpoint root
    #[error("no checkpoint found under {0}")]
    NoCheckpoint(String),

    /// A checkpoint tensor is present but has the wrong shape
    #[error("checkpoint tensor {name}: expected shape {expected:?}, got {got:?}")]
    TensorShape {
        name: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// IO error while reading an artifact
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON artifact
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Model inference errors (ndarray operations).
#[derive(Debug, Error)]
pub enum ModelError {
    /// ndarray-stats argmax error
    #[error(transparent)]
    MinMax(#[from] MinMaxError),

    /// ndarray shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Result type alias for dhwani-nmt operations.
pub type Result<T> = std::result::Result<T, Error>;

// Nested From implementations for automatic error conversion chains

// std::io::Error → StartupError → Error
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Startup(StartupError::Io(e))
    }
}

// serde_json::Error → StartupError → Error
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Startup(StartupError::Json(e))
    }
}

// MinMaxError → ModelError → Error
impl From<MinMaxError> for Error {
    fn from(e: MinMaxError) -> Self {
        Error::Model(ModelError::MinMax(e))
    }
}

// ShapeError → ModelError → Error
impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Model(ModelError::Shape(e))
    }
}
