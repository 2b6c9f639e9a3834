//! Error types for the recommendation engine

use thiserror::Error;

/// Result type alias for recommendation engine operations
pub type Result<T> = std::result::Result<T, RecError>;

/// Error types that can occur in recommendation engine operations
#[derive(Error, Debug)]
pub enum RecError {
    #[error("Failed to load model artifact: {0}")]
    Load(String),

    #[error("Recommendation engine is not ready: models not loaded")]
    NotReady,

    #[error("Restaurant '{name}' not found")]
    RestaurantNotFound { name: String },

    #[error("No similar restaurants found")]
    NoSimilarRestaurants,

    #[error("Index {index} out of range (len={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
