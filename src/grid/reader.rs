use log::debug;

use crate::layout::{AscLayout, AscSource};

use super::error::GridError;
use super::raw_grid::{GridShape, RawGrid};

/// Field delimiter of the data block
pub const DATA_DELIMITER: char = '\t';

/// Reads the tab-delimited data block into a [`RawGrid`]
#[derive(Debug, Clone)]
pub struct GridReader {
    shape: GridShape,
}

impl GridReader {
    /// Reader for a grid of the given shape
    pub fn new(shape: GridShape) -> Self {
        Self { shape }
    }

    /// Shape this reader expects
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Read the data block that follows the header of `source`
    pub fn read_source(&self, source: &AscSource, layout: &AscLayout) -> Result<RawGrid, GridError> {
        let data = source
            .data_section(layout.header_length)
            .ok_or(GridError::TruncatedData {
                expected: self.shape.num_positions(),
                available: 0,
            })?;
        self.read(data, layout.header_length as u64)
    }

    /// Read exactly `num_positions` rows from `data`.
    ///
    /// Every line counts as a row, so a blank line inside the block is a row
    /// with no values. Blank lines after the last row are allowed; any other
    /// trailing line is [`GridError::ExtraData`]. `line_offset` is the number
    /// of source lines preceding `data` and is added to reported line numbers.
    pub fn read(&self, data: &str, line_offset: u64) -> Result<RawGrid, GridError> {
        let shape = self.shape;
        let num_positions = shape.num_positions();
        let spectral_length = shape.spectral_length;
        let value_count = shape.value_count()?;

        // Each value takes at least one digit and one delimiter
        let mut values = Vec::with_capacity(value_count.min(data.len() / 2 + 1));
        let mut lines = data.lines();

        for row in 0..num_positions {
            let text = lines.next().ok_or(GridError::TruncatedData {
                expected: num_positions,
                available: row,
            })?;
            let line = line_offset + row as u64 + 1;
            parse_row(text, row, line, spectral_length, &mut values)?;
        }

        let extra = lines.filter(|text| !text.trim().is_empty()).count();
        if extra > 0 {
            return Err(GridError::ExtraData {
                expected: num_positions,
                found: num_positions + extra,
            });
        }

        debug!("Read grid of {} x {}", num_positions, spectral_length);
        RawGrid::from_vec(num_positions, spectral_length, values)
    }
}

/// Parse one line onto `out`, dropping the empty token left by a trailing
/// delimiter.
fn parse_row(
    text: &str,
    row: usize,
    line: u64,
    spectral_length: usize,
    out: &mut Vec<f32>,
) -> Result<(), GridError> {
    let mut tokens: Vec<&str> = text.split(DATA_DELIMITER).collect();
    if tokens.last().is_some_and(|t| t.trim().is_empty()) {
        tokens.pop();
    }

    if tokens.len() != spectral_length {
        return Err(GridError::RowLengthMismatch {
            row,
            line,
            expected: spectral_length,
            actual: tokens.len(),
        });
    }

    for (column, token) in tokens.iter().enumerate() {
        let value = token.trim().parse::<f32>().map_err(|_| GridError::NumericParse {
            row,
            column,
            line,
            token: token.to_string(),
        })?;
        out.push(value);
    }
    Ok(())
}
