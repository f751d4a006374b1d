use anyhow::Result;
use arrow::datatypes::DataType;

use crate::reader::{ContainerReader, DatasetMetadata};
use crate::schema::{
    POSITION_INDICES, POSITION_VALUES, RAW_DATA, RAW_DATA_COLUMN, SPECTROSCOPIC_INDICES,
    SPECTROSCOPIC_VALUES,
};

use super::{ValidationCheck, ValidationReport};

/// Step 3: dataset shapes agree with the channel attributes, and the
/// ancillary values are sane.
pub(crate) fn check_shapes(reader: &ContainerReader, report: &mut ValidationReport) -> Result<()> {
    let channel = reader.channel();
    let num_positions = channel.num_positions();
    let spectral_length = channel.spectral_length;

    let expected = [
        (RAW_DATA, [num_positions, spectral_length]),
        (POSITION_INDICES, [num_positions, 2]),
        (POSITION_VALUES, [num_positions, 2]),
        (SPECTROSCOPIC_INDICES, [spectral_length, 1]),
        (SPECTROSCOPIC_VALUES, [spectral_length, 1]),
    ];

    for (name, shape) in expected {
        match reader.dataset_metadata(name) {
            Ok(metadata) => check_dataset_shape(name, &metadata, shape, report),
            Err(e) => {
                report.add_check(ValidationCheck::failed(format!("{} shape", name), e.to_string()));
            }
        }
    }

    check_position_bounds(reader, report);
    check_spectroscopic_values(reader, report);
    Ok(())
}

fn check_dataset_shape(
    name: &str,
    metadata: &DatasetMetadata,
    expected: [u64; 2],
    report: &mut ValidationReport,
) {
    report.add_check(ValidationCheck::expect(
        format!("{} shape", name),
        metadata.shape == expected,
        || format!("Footer declares {:?}, expected {:?}", metadata.shape, expected),
    ));

    report.add_check(ValidationCheck::expect(
        format!("{} rows", name),
        metadata.total_rows as u64 == expected[0],
        || format!("Found {} rows, expected {}", metadata.total_rows, expected[0]),
    ));

    let columns = if name == RAW_DATA {
        match metadata
            .schema
            .field_with_name(RAW_DATA_COLUMN)
            .map(|field| field.data_type().clone())
        {
            Ok(DataType::FixedSizeList(_, length)) => length as u64,
            _ => {
                report.add_check(ValidationCheck::failed(
                    format!("{} columns", name),
                    format!("Column '{}' is not a fixed-size list", RAW_DATA_COLUMN),
                ));
                return;
            }
        }
    } else {
        metadata.schema.fields().len() as u64
    };
    report.add_check(ValidationCheck::expect(
        format!("{} columns", name),
        columns == expected[1],
        || format!("Found {} columns, expected {}", columns, expected[1]),
    ));
}

fn check_position_bounds(reader: &ContainerReader, report: &mut ValidationReport) {
    let channel = reader.channel();
    let check = match reader.position_indices() {
        Ok(indices) => {
            let in_bounds = |label: &str, limit: u64| {
                indices
                    .column(label)
                    .is_some_and(|column| column.iter().all(|&i| (i as u64) < limit))
            };
            ValidationCheck::expect(
                "Position indices in bounds",
                in_bounds("X", channel.num_cols) && in_bounds("Y", channel.num_rows),
                || {
                    format!(
                        "Indices exceed the {} x {} raster",
                        channel.num_rows, channel.num_cols
                    )
                },
            )
        }
        Err(e) => ValidationCheck::failed("Position indices in bounds", e.to_string()),
    };
    report.add_check(check);
}

fn check_spectroscopic_values(reader: &ContainerReader, report: &mut ValidationReport) {
    let name = "Spectroscopic values increasing";
    let values = match reader.spectroscopic_values() {
        Ok(values) => values,
        Err(e) => {
            report.add_check(ValidationCheck::failed(name, e.to_string()));
            return;
        }
    };

    let Some(column) = values.columns.first() else {
        report.add_check(ValidationCheck::failed(name, "No spectroscopic dimension"));
        return;
    };

    let check = if let Some(index) = column.iter().position(|v| !v.is_finite()) {
        ValidationCheck::failed(name, format!("Non-finite value at index {}", index))
    } else if let Some(index) = column.windows(2).position(|w| w[1] <= w[0]) {
        ValidationCheck::failed(
            name,
            format!("Value at index {} does not increase", index + 1),
        )
    } else {
        ValidationCheck::ok(name)
    };
    report.add_check(check);
}
