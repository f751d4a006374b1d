/// Errors raised while extracting the numeric grid
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Fewer data rows than scan positions
    #[error("Truncated data: expected {expected} rows, found {available}")]
    TruncatedData {
        /// Number of rows required (`num_rows * num_cols`)
        expected: usize,
        /// Number of rows present
        available: usize,
    },

    /// Non-blank lines remain after the last expected row
    #[error("Extra data: expected {expected} rows, found {found}")]
    ExtraData {
        /// Number of rows required (`num_rows * num_cols`)
        expected: usize,
        /// Number of non-blank rows present
        found: usize,
    },

    /// A data row with the wrong number of values
    #[error("Row {row} (line {line}) has {actual} values, expected {expected}")]
    RowLengthMismatch {
        /// Zero-based row index
        row: usize,
        /// 1-based line number in the source file
        line: u64,
        /// Spectral length
        expected: usize,
        /// Number of values found
        actual: usize,
    },

    /// A token that is not a number
    #[error("Row {row}, column {column} (line {line}): cannot parse {token:?} as a number")]
    NumericParse {
        /// Zero-based row index
        row: usize,
        /// Zero-based column index within the row
        column: usize,
        /// 1-based line number in the source file
        line: u64,
        /// Offending text
        token: String,
    },

    /// Buffer length does not match the declared shape
    #[error("Grid shape mismatch: {num_positions} x {spectral_length} needs {expected} values, got {actual}")]
    ShapeMismatch {
        /// Number of rows
        num_positions: usize,
        /// Row length
        spectral_length: usize,
        /// `num_positions * spectral_length`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Zero-sized grid dimension
    #[error("Grid dimension {name} must be positive")]
    EmptyDimension {
        /// Which dimension was zero
        name: &'static str,
    },

    /// `num_rows * num_cols * spectral_length` does not fit in `usize`
    #[error("Grid of {num_rows} x {num_cols} x {spectral_length} values is too large")]
    DimensionOverflow {
        /// Number of scan rows
        num_rows: usize,
        /// Number of scan columns
        num_cols: usize,
        /// Points per spectrum
        spectral_length: usize,
    },
}
