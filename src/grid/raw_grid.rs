use std::slice::ChunksExact;

use crate::header::{HeaderError, ParameterMap, KEY_X_PIXELS, KEY_Y_PIXELS, KEY_Z_POINTS};

use super::GridError;

/// Dimensions of a spectroscopy grid scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of scan rows (`y-pixels`)
    pub num_rows: usize,
    /// Number of scan columns (`x-pixels`)
    pub num_cols: usize,
    /// Points per spectrum (`z-points`)
    pub spectral_length: usize,
}

impl GridShape {
    /// Construct a shape; every dimension must be positive
    pub fn new(num_rows: usize, num_cols: usize, spectral_length: usize) -> Result<Self, GridError> {
        for (name, value) in [
            ("num_rows", num_rows),
            ("num_cols", num_cols),
            ("spectral_length", spectral_length),
        ] {
            if value == 0 {
                return Err(GridError::EmptyDimension { name });
            }
        }
        let shape = Self {
            num_rows,
            num_cols,
            spectral_length,
        };
        shape.value_count()?;
        Ok(shape)
    }

    /// Read `y-pixels`, `x-pixels` and `z-points` from parsed parameters
    pub fn from_parameters(parameters: &ParameterMap) -> Result<Self, HeaderError> {
        let shape = Self {
            num_rows: parameters.require_count(KEY_Y_PIXELS)?,
            num_cols: parameters.require_count(KEY_X_PIXELS)?,
            spectral_length: parameters.require_count(KEY_Z_POINTS)?,
        };
        if shape.value_count().is_err() {
            return Err(HeaderError::InvalidParameter {
                key: format!("{} * {} * {}", KEY_X_PIXELS, KEY_Y_PIXELS, KEY_Z_POINTS),
                value: format!(
                    "{} * {} * {}",
                    shape.num_cols, shape.num_rows, shape.spectral_length
                ),
                reason: "grid size overflows the address space".to_string(),
            });
        }
        Ok(shape)
    }

    /// Number of scan positions (`num_rows * num_cols`), saturating
    pub fn num_positions(&self) -> usize {
        self.num_rows.saturating_mul(self.num_cols)
    }

    /// Total number of values in the grid
    pub fn value_count(&self) -> Result<usize, GridError> {
        self.num_rows
            .checked_mul(self.num_cols)
            .and_then(|positions| positions.checked_mul(self.spectral_length))
            .ok_or(GridError::DimensionOverflow {
                num_rows: self.num_rows,
                num_cols: self.num_cols,
                spectral_length: self.spectral_length,
            })
    }
}

/// Measured values, one spectrum per scan position.
///
/// Shape is `[num_positions][spectral_length]`, stored row-major in one
/// contiguous buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    num_positions: usize,
    spectral_length: usize,
    values: Vec<f32>,
}

impl RawGrid {
    /// Wrap a row-major buffer
    pub fn from_vec(
        num_positions: usize,
        spectral_length: usize,
        values: Vec<f32>,
    ) -> Result<Self, GridError> {
        if spectral_length == 0 {
            return Err(GridError::EmptyDimension {
                name: "spectral_length",
            });
        }
        let expected = num_positions.saturating_mul(spectral_length);
        if values.len() != expected {
            return Err(GridError::ShapeMismatch {
                num_positions,
                spectral_length,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            num_positions,
            spectral_length,
            values,
        })
    }

    /// `(num_positions, spectral_length)`
    pub fn shape(&self) -> (usize, usize) {
        (self.num_positions, self.spectral_length)
    }

    /// Number of rows
    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    /// Length of each row
    pub fn spectral_length(&self) -> usize {
        self.spectral_length
    }

    /// Spectrum at `position`
    pub fn row(&self, position: usize) -> Option<&[f32]> {
        if position >= self.num_positions {
            return None;
        }
        let start = position * self.spectral_length;
        Some(&self.values[start..start + self.spectral_length])
    }

    /// Iterate over spectra in position order
    pub fn rows(&self) -> ChunksExact<'_, f32> {
        self.values.chunks_exact(self.spectral_length.max(1))
    }

    /// Value at `(position, index)`
    pub fn get(&self, position: usize, index: usize) -> Option<f32> {
        if index >= self.spectral_length {
            return None;
        }
        self.row(position).map(|row| row[index])
    }

    /// Row-major view of all values
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Consume the grid and return its buffer
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}
