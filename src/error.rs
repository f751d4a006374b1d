//! Crate-level error for the translation pipeline.
//!
//! Every stage has its own error enum; [`TranslateError`] wraps them all and
//! [`TranslateError::kind`] folds them into a four-way taxonomy for callers
//! that only care about the broad category.

use std::fmt;
use std::path::PathBuf;

use crate::axis::AxisError;
use crate::container::{ContainerError, WriteFailure};
use crate::grid::GridError;
use crate::header::HeaderError;
use crate::reader::ReaderError;
use crate::validator::ValidationError;

/// Broad failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source text or unusable parameter values
    Parse,
    /// Declared dimensions disagree with the data
    DimensionMismatch,
    /// Filesystem or archive I/O failure
    Io,
    /// The destination or container does not have the expected layout
    Schema,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "parse",
            ErrorKind::DimensionMismatch => "dimension mismatch",
            ErrorKind::Io => "io",
            ErrorKind::Schema => "schema",
        };
        f.write_str(name)
    }
}

/// Any error raised while translating a source file
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Could not read the source file
    #[error("Failed to read {}: {source}", path.display())]
    Source {
        /// Source file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Parameter block error
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// Data block error
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Axis construction error
    #[error(transparent)]
    Axis(#[from] AxisError),

    /// Container write error
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Container read-back error
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// The written container failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TranslateError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::Source { .. } => ErrorKind::Io,
            TranslateError::Header(e) => match e {
                HeaderError::TruncatedHeader { .. } => ErrorKind::DimensionMismatch,
                _ => ErrorKind::Parse,
            },
            TranslateError::Grid(e) => match e {
                GridError::NumericParse { .. } | GridError::DimensionOverflow { .. } => {
                    ErrorKind::Parse
                }
                _ => ErrorKind::DimensionMismatch,
            },
            TranslateError::Axis(_) => ErrorKind::Parse,
            TranslateError::Container(e) => match e {
                ContainerError::DestinationConflict(_) => ErrorKind::Io,
                ContainerError::IncompatibleDestination { .. } | ContainerError::MissingField(_) => {
                    ErrorKind::Schema
                }
                ContainerError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
                ContainerError::Axis(_) => ErrorKind::Parse,
                ContainerError::WriteFailure(WriteFailure::Io(_) | WriteFailure::Zip(_)) => {
                    ErrorKind::Io
                }
                ContainerError::WriteFailure(_) => ErrorKind::Schema,
            },
            TranslateError::Reader(e) => match e {
                ReaderError::IoError(_) | ReaderError::ZipError(_) => ErrorKind::Io,
                _ => ErrorKind::Schema,
            },
            TranslateError::Validation(e) => match e {
                ValidationError::IoError(_) | ValidationError::ZipError(_) => ErrorKind::Io,
                _ => ErrorKind::Schema,
            },
        }
    }
}
