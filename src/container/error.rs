use std::path::PathBuf;

use crate::axis::AxisError;

/// Errors that can occur while writing a container
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Destination exists and overwriting was not permitted
    #[error("Destination already exists: {} (enable overwrite to replace it)", .0.display())]
    DestinationConflict(PathBuf),

    /// Destination exists but cannot hold a container
    #[error("Destination {} is incompatible: {reason}", path.display())]
    IncompatibleDestination {
        /// Offending path
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Grid, counts and spectroscopic values disagree
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension
        what: &'static str,
        /// Value implied by the other inputs
        expected: usize,
        /// Value supplied
        actual: usize,
    },

    /// A required request field was never set
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Axis construction failed
    #[error("Axis error: {0}")]
    Axis(#[from] AxisError),

    /// Writing the container failed
    #[error("Write failure: {0}")]
    WriteFailure(#[from] WriteFailure),
}

/// Underlying cause of a [`ContainerError::WriteFailure`]
#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error building Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error encoding Parquet
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error serializing JSON
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for ContainerError {
    fn from(err: std::io::Error) -> Self {
        ContainerError::WriteFailure(err.into())
    }
}

impl From<arrow::error::ArrowError> for ContainerError {
    fn from(err: arrow::error::ArrowError) -> Self {
        ContainerError::WriteFailure(err.into())
    }
}

impl From<parquet::errors::ParquetError> for ContainerError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        ContainerError::WriteFailure(err.into())
    }
}

impl From<zip::result::ZipError> for ContainerError {
    fn from(err: zip::result::ZipError) -> Self {
        ContainerError::WriteFailure(err.into())
    }
}

impl From<serde_json::Error> for ContainerError {
    fn from(err: serde_json::Error) -> Self {
        ContainerError::WriteFailure(err.into())
    }
}
