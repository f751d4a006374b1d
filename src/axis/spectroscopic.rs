use super::{AncillaryAxis, AxisDimension, AxisError};

/// Default name of the bias sweep dimension
pub const DEFAULT_SPEC_NAME: &str = "Bias";

/// Default unit of the bias sweep dimension
pub const DEFAULT_SPEC_UNIT: &str = "V";

/// Ordered values of the spectroscopic (sweep) dimension
#[derive(Debug, Clone, PartialEq)]
pub struct SpectroscopicAxis {
    name: String,
    unit: String,
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SpectroscopicAxis {
    /// Evenly spaced sweep from `-max_v` to `+max_v` over `num_points`
    /// samples. Both endpoints are exact. A single point sits at `-max_v`.
    pub fn linear(
        name: impl Into<String>,
        unit: impl Into<String>,
        max_v: f64,
        num_points: usize,
    ) -> Result<Self, AxisError> {
        if !max_v.is_finite() || max_v <= 0.0 {
            return Err(AxisError::InvalidBiasRange(max_v));
        }
        if num_points == 0 || num_points > u32::MAX as usize {
            return Err(AxisError::InvalidCount {
                name: "spectral_length",
                value: num_points,
            });
        }

        let values = if num_points == 1 {
            vec![-max_v]
        } else {
            let step = 2.0 * max_v / (num_points - 1) as f64;
            let mut values: Vec<f64> = (0..num_points).map(|i| -max_v + i as f64 * step).collect();
            values[num_points - 1] = max_v;
            values
        };

        Self::from_values(name, unit, values)
    }

    /// Axis over explicit `values`, which must be finite and strictly
    /// increasing.
    pub fn from_values(
        name: impl Into<String>,
        unit: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, AxisError> {
        let name = name.into();
        if values.is_empty() {
            return Err(AxisError::EmptyAxis(name));
        }
        if values.len() > u32::MAX as usize {
            return Err(AxisError::InvalidCount {
                name: "spectral_length",
                value: values.len(),
            });
        }

        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(AxisError::NonFiniteValue { index, value });
            }
            if index > 0 && value <= values[index - 1] {
                return Err(AxisError::NotIncreasing {
                    index,
                    previous: values[index - 1],
                    value,
                });
            }
        }

        let indices = (0..values.len() as u32).collect();
        Ok(Self {
            name,
            unit: unit.into(),
            indices,
            values,
        })
    }

    /// Dimension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Sweep indices, `0..len`
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Sweep values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First sweep value
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Last sweep value
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

impl AncillaryAxis for SpectroscopicAxis {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn dimensions(&self) -> Vec<AxisDimension<'_>> {
        vec![AxisDimension {
            label: &self.name,
            unit: &self.unit,
            indices: self.indices.clone(),
            values: &self.values,
        }]
    }
}
