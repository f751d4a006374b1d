/// Errors raised while building coordinate axes
#[derive(Debug, thiserror::Error)]
pub enum AxisError {
    /// Row, column or point count outside `1..=u32::MAX`
    #[error("Invalid {name}: {value} (must be between 1 and {max})", max = u32::MAX)]
    InvalidCount {
        /// Which count
        name: &'static str,
        /// Value supplied
        value: usize,
    },

    /// Scan extent that is negative or not finite
    #[error("Invalid {name}: {value} (must be finite and non-negative)")]
    InvalidExtent {
        /// Which extent
        name: &'static str,
        /// Value supplied
        value: f64,
    },

    /// Bias sweep amplitude that is not a finite positive number
    #[error("Invalid bias range max_v = {0} (must be finite and positive)")]
    InvalidBiasRange(f64),

    /// Spectroscopic values with no entries
    #[error("Spectroscopic axis {0:?} has no values")]
    EmptyAxis(String),

    /// Spectroscopic value that is NaN or infinite
    #[error("Spectroscopic value at index {index} is not finite: {value}")]
    NonFiniteValue {
        /// Position in the value sequence
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Spectroscopic values that do not strictly increase
    #[error("Spectroscopic values must strictly increase: index {index} ({value}) follows {previous}")]
    NotIncreasing {
        /// Position of the first out-of-order value
        index: usize,
        /// Value before it
        previous: f64,
        /// Offending value
        value: f64,
    },
}
