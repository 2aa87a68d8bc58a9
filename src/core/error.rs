//! Error types for the k-NN implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnnError {
    #[error("Shape mismatch: {samples} data points but {labels} labels")]
    ShapeMismatch { samples: usize, labels: usize },

    #[error("Model has to be trained in order to make predictions")]
    NotTrained,

    #[error("Dimension mismatch at index {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, KnnError>;
