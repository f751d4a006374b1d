//! # Grid Reader
//!
//! Extracts the measured spectra from the data block of an `.asc` file.
//!
//! The block holds one scan position per line, each a tab-delimited list of
//! `spectral_length` values followed by a trailing tab:
//!
//! ```text
//! 0.0123\t0.0119\t...\t0.0101\t\n
//! ```
//!
//! The trailing empty token is dropped and every remaining token is parsed as
//! `f32`. Reading is a single pass over exactly `num_rows * num_cols` lines.
//! A blank line is a row with no values, and non-blank lines after the last
//! row are rejected. Buffer growth is bounded by the input length, never by
//! the header counts alone.
//!
//! ```
//! use probegrid::grid::{GridReader, GridShape};
//!
//! let shape = GridShape::new(1, 2, 3)?;
//! let grid = GridReader::new(shape).read("1\t2\t3\t\n4\t5\t6\t\n", 0)?;
//!
//! assert_eq!(grid.shape(), (2, 3));
//! assert_eq!(grid.row(1), Some(&[4.0, 5.0, 6.0][..]));
//! # Ok::<(), probegrid::grid::GridError>(())
//! ```

mod error;
mod raw_grid;
mod reader;


pub use error::GridError;
pub use raw_grid::{GridShape, RawGrid};
pub use reader::{GridReader, DATA_DELIMITER};
