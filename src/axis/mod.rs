//! # Axis Builder
//!
//! Coordinate axes attached to the main dataset.
//!
//! - [`PositionAxis`]: raster `(row, col)` indices and physical `(x, y)`
//!   coordinates for every scan position, in raster order.
//! - [`SpectroscopicAxis`]: the bias sweep, `num_points` values evenly spaced
//!   from `-max_v` to `+max_v`.
//!
//! Both implement [`AncillaryAxis`], which flattens an axis into the labelled
//! index/value columns stored next to the main dataset.
//!
//! ```
//! use probegrid::axis::{AncillaryAxis, PositionAxis, SpectroscopicAxis};
//!
//! let positions = PositionAxis::build(2, 3, 200.0, 100.0, "nm")?;
//! assert_eq!(positions.coordinate_of(5), Some((200.0, 100.0)));
//!
//! let bias = SpectroscopicAxis::linear("Bias", "V", 1.0, 5)?;
//! assert_eq!(bias.values(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
//! assert_eq!(bias.dimensions()[0].label, "Bias");
//! # Ok::<(), probegrid::axis::AxisError>(())
//! ```

mod error;
mod position;
mod spectroscopic;

pub use error::AxisError;
pub use position::{PositionAxis, POSITION_X, POSITION_Y};
pub use spectroscopic::{SpectroscopicAxis, DEFAULT_SPEC_NAME, DEFAULT_SPEC_UNIT};

/// One labelled column of an ancillary axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDimension<'a> {
    /// Column label, e.g. `"X"` or `"Bias"`
    pub label: &'a str,
    /// Physical unit of `values`
    pub unit: &'a str,
    /// Integer index of each entry along this dimension
    pub indices: Vec<u32>,
    /// Physical value of each entry
    pub values: &'a [f64],
}

/// An axis that can be stored as paired index/value tables
pub trait AncillaryAxis {
    /// Number of entries (rows of the index/value tables)
    fn len(&self) -> usize;

    /// Whether the axis has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The axis split into its labelled dimensions, in column order
    fn dimensions(&self) -> Vec<AxisDimension<'_>>;

    /// Column labels
    fn labels(&self) -> Vec<String> {
        self.dimensions().iter().map(|d| d.label.to_string()).collect()
    }

    /// Column units
    fn units(&self) -> Vec<String> {
        self.dimensions().iter().map(|d| d.unit.to_string()).collect()
    }
}
