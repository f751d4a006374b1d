use super::{AncillaryAxis, AxisDimension, AxisError};

/// Label of the fast (column) scan dimension
pub const POSITION_X: &str = "X";

/// Label of the slow (row) scan dimension
pub const POSITION_Y: &str = "Y";

/// Maps each linear scan index to its raster `(row, col)` and physical
/// `(x, y)` coordinate.
///
/// Index `i` lies at `row = i / num_cols`, `col = i % num_cols`. Physical
/// coordinates interpolate linearly from zero to the scan width (columns) and
/// height (rows); a dimension with a single sample sits at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAxis {
    num_rows: usize,
    num_cols: usize,
    scan_width: f64,
    scan_height: f64,
    unit: String,
    rows: Vec<u32>,
    cols: Vec<u32>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PositionAxis {
    /// Build the axis for a `num_rows` x `num_cols` raster spanning
    /// `scan_width` x `scan_height` in `unit`.
    pub fn build(
        num_rows: usize,
        num_cols: usize,
        scan_width: f64,
        scan_height: f64,
        unit: impl Into<String>,
    ) -> Result<Self, AxisError> {
        check_count("num_rows", num_rows)?;
        check_count("num_cols", num_cols)?;
        check_extent("scan_width", scan_width)?;
        check_extent("scan_height", scan_height)?;

        let x_step = step(scan_width, num_cols);
        let y_step = step(scan_height, num_rows);

        let num_positions = num_rows * num_cols;
        let mut rows = Vec::with_capacity(num_positions);
        let mut cols = Vec::with_capacity(num_positions);
        let mut x = Vec::with_capacity(num_positions);
        let mut y = Vec::with_capacity(num_positions);

        for index in 0..num_positions {
            let row = index / num_cols;
            let col = index % num_cols;
            // Both fit in u32: check_count bounds them.
            rows.push(row as u32);
            cols.push(col as u32);
            x.push(col as f64 * x_step);
            y.push(row as f64 * y_step);
        }

        Ok(Self {
            num_rows,
            num_cols,
            scan_width,
            scan_height,
            unit: unit.into(),
            rows,
            cols,
            x,
            y,
        })
    }

    /// Number of raster rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of raster columns
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Physical extent along X
    pub fn scan_width(&self) -> f64 {
        self.scan_width
    }

    /// Physical extent along Y
    pub fn scan_height(&self) -> f64 {
        self.scan_height
    }

    /// Spatial unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Row index of every position
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Column index of every position
    pub fn cols(&self) -> &[u32] {
        &self.cols
    }

    /// X coordinate of every position
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinate of every position
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// `(row, col)` of linear index `index`
    pub fn index_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.len()).then(|| (self.rows[index] as usize, self.cols[index] as usize))
    }

    /// `(x, y)` of linear index `index`
    pub fn coordinate_of(&self, index: usize) -> Option<(f64, f64)> {
        (index < self.len()).then(|| (self.x[index], self.y[index]))
    }
}

impl AncillaryAxis for PositionAxis {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn dimensions(&self) -> Vec<AxisDimension<'_>> {
        vec![
            AxisDimension {
                label: POSITION_X,
                unit: &self.unit,
                indices: self.cols.clone(),
                values: &self.x,
            },
            AxisDimension {
                label: POSITION_Y,
                unit: &self.unit,
                indices: self.rows.clone(),
                values: &self.y,
            },
        ]
    }
}

fn step(extent: f64, count: usize) -> f64 {
    if count > 1 {
        extent / (count - 1) as f64
    } else {
        0.0
    }
}

fn check_count(name: &'static str, value: usize) -> Result<(), AxisError> {
    if value == 0 || value > u32::MAX as usize {
        return Err(AxisError::InvalidCount { name, value });
    }
    Ok(())
}

fn check_extent(name: &'static str, value: f64) -> Result<(), AxisError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AxisError::InvalidExtent { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_raster_order() {
        let axis = PositionAxis::build(2, 3, 200.0, 100.0, "nm").unwrap();
        assert_eq!(axis.len(), 6);
        assert_eq!(axis.rows(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(axis.cols(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(axis.x(), &[0.0, 100.0, 200.0, 0.0, 100.0, 200.0]);
        assert_eq!(axis.y(), &[0.0, 0.0, 0.0, 100.0, 100.0, 100.0]);
        assert_eq!(axis.index_of(4), Some((1, 1)));
        assert_eq!(axis.coordinate_of(5), Some((200.0, 100.0)));
        assert_eq!(axis.coordinate_of(6), None);
    }

    #[test]
    fn test_single_row_degenerates_to_zero() {
        let axis = PositionAxis::build(1, 4, 30.0, 50.0, "nm").unwrap();
        assert!(axis.y().iter().all(|&y| y == 0.0));
        assert_eq!(axis.x(), &[0.0, 10.0, 20.0, 30.0]);

        let axis = PositionAxis::build(1, 1, 30.0, 50.0, "nm").unwrap();
        assert_eq!(axis.coordinate_of(0), Some((0.0, 0.0)));
    }

    #[test]
    fn test_rejects_invalid_counts() {
        assert!(matches!(
            PositionAxis::build(0, 4, 1.0, 1.0, "nm"),
            Err(AxisError::InvalidCount {
                name: "num_rows",
                value: 0
            })
        ));
        assert!(matches!(
            PositionAxis::build(4, 0, 1.0, 1.0, "nm"),
            Err(AxisError::InvalidCount { name: "num_cols", .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_extents() {
        assert!(matches!(
            PositionAxis::build(2, 2, -1.0, 1.0, "nm"),
            Err(AxisError::InvalidExtent { name: "scan_width", .. })
        ));
        assert!(matches!(
            PositionAxis::build(2, 2, 1.0, f64::NAN, "nm"),
            Err(AxisError::InvalidExtent { name: "scan_height", .. })
        ));
    }

    #[test]
    fn test_dimensions() {
        let axis = PositionAxis::build(2, 2, 1.0, 1.0, "um").unwrap();
        let dims = axis.dimensions();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].label, "X");
        assert_eq!(dims[1].label, "Y");
        assert_eq!(dims[0].unit, "um");
        assert_eq!(dims[0].indices, vec![0, 1, 0, 1]);
        assert_eq!(dims[1].indices, vec![0, 0, 1, 1]);
    }

    proptest! {
        #[test]
        fn prop_position_monotonic(rows in 1usize..30, cols in 1usize..30, w in 0.0f64..1e4, h in 0.0f64..1e4) {
            let axis = PositionAxis::build(rows, cols, w, h, "nm").unwrap();
            prop_assert_eq!(axis.len(), rows * cols);
            for i in 1..axis.len() {
                let (r0, c0) = axis.index_of(i - 1).unwrap();
                let (r1, c1) = axis.index_of(i).unwrap();
                prop_assert_eq!(r0 * cols + c0 + 1, r1 * cols + c1);
                if r0 == r1 {
                    prop_assert!(axis.x()[i] >= axis.x()[i - 1]);
                } else {
                    prop_assert!(axis.y()[i] >= axis.y()[i - 1]);
                }
            }
            let last = axis.len() - 1;
            if cols > 1 {
                prop_assert!((axis.x()[last] - w).abs() <= 1e-9 * w.max(1.0));
            }
            if rows > 1 {
                prop_assert!((axis.y()[last] - h).abs() <= 1e-9 * h.max(1.0));
            }
        }
    }
}
