//! Integration tests for probegrid
//!
//! These tests run the full pipeline from an `.asc` source on disk to a
//! container and read the result back.

use probegrid::container::{ContainerConfig, ContainerError, ContainerWriter};
use probegrid::error::{ErrorKind, TranslateError};
use probegrid::grid::GridError;
use probegrid::header::{HeaderError, ParameterValue};
use probegrid::layout::{AscLayout, DuplicateKeyPolicy};
use probegrid::pipeline::{AcquisitionSettings, AscTranslator};
use probegrid::reader::ContainerReader;
use probegrid::schema::{
    dataset_path, ANCILLARY_DATASETS, CHANNEL_DATASETS, POSITION_VALUES, RAW_DATA,
    SPECTROSCOPIC_VALUES,
};
use probegrid::validator::validate_container;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Build an Omicron-layout source: 3 preamble lines, `parameters` on lines
/// 4-17 (padded), filler up to line 403, then `data_rows` spectra of
/// `points` values each with a trailing tab.
fn asc_text(parameters: &[(&str, &str)], points: usize, data_rows: usize) -> String {
    let mut text = String::from("# Omicron Spectroscopy Grid\n# exported\n#\n");
    let mut header_lines = 3;
    for (key, value) in parameters {
        text.push_str(&format!("# {} = {}\n", key, value));
        header_lines += 1;
    }
    while header_lines < 17 {
        text.push_str(&format!("# pad-{} = 0\n", header_lines));
        header_lines += 1;
    }
    while header_lines < 403 {
        text.push_str("# reserved\n");
        header_lines += 1;
    }
    for row in 0..data_rows {
        for point in 0..points {
            text.push_str(&format!("{:.3}\t", row as f32 + point as f32 * 0.125));
        }
        text.push('\n');
    }
    text
}

fn grid_parameters() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x-pixels", "10"),
        ("y-pixels", "10"),
        ("z-points", "5"),
        ("setpoint", "3.0"),
        ("gain", "3.5"),
        ("tip", "abc"),
    ]
}

fn write_source(dir: &Path, name: &str, data_rows: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, asc_text(&grid_parameters(), 5, data_rows)).unwrap();
    path
}

/// Full translation of a 10 x 10 grid with 5 bias points
#[test]
fn test_end_to_end() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let output = dir.path().join("grid.pgrid");

    let summary = AscTranslator::default()
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap();
    assert_eq!(summary.stats.num_positions, 100);
    assert_eq!(summary.stats.spectral_length, 5);
    assert_eq!(summary.spec_range, (-1.0, 1.0));

    let reader = ContainerReader::open(&output).unwrap();

    let grid = reader.raw_data().unwrap();
    assert_eq!(grid.shape(), (100, 5));
    assert_eq!(grid.get(0, 0), Some(0.0));
    assert_eq!(grid.get(99, 4), Some(99.5));

    let raw = reader.dataset_metadata(RAW_DATA).unwrap();
    assert_eq!(raw.shape, [100, 5]);

    let positions = reader.position_values().unwrap();
    assert_eq!(positions.len(), 100);
    assert!((positions.column("X").unwrap()[9] - 200.0).abs() < 1e-9);
    assert!((positions.column("Y").unwrap()[99] - 100.0).abs() < 1e-9);

    let indices = reader.position_indices().unwrap();
    assert_eq!(indices.len(), 100);
    assert_eq!(indices.column("X").unwrap()[13], 3);
    assert_eq!(indices.column("Y").unwrap()[13], 1);

    let bias = reader.spectroscopic_values().unwrap();
    let values = bias.column("Bias").unwrap();
    assert_eq!(values.len(), 5);
    assert_eq!(values[0], -1.0);
    assert_eq!(values[4], 1.0);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(reader.spectroscopic_indices().unwrap().len(), 5);
}

/// Header values keep the type inferred at parse time
#[test]
fn test_parameter_types_survive() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let output = dir.path().join("grid.pgrid");
    AscTranslator::default()
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap();

    let reader = ContainerReader::open(&output).unwrap();
    let parameters = &reader.channel().parameters;
    assert_eq!(parameters.get("setpoint"), Some(&ParameterValue::Integer(3)));
    assert_eq!(parameters.get("gain"), Some(&ParameterValue::Float(3.5)));
    assert_eq!(parameters.get("tip"), Some(&ParameterValue::from("abc")));
    assert_eq!(parameters.get("x-pixels"), Some(&ParameterValue::Integer(10)));
    assert_eq!(parameters.len(), 14);
}

/// Every ancillary dataset is referenced from Raw_Data and resolves
#[test]
fn test_references() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let output = dir.path().join("grid.pgrid");
    AscTranslator::default()
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap();

    let reader = ContainerReader::open(&output).unwrap();
    let references = reader.references().unwrap();
    for name in ANCILLARY_DATASETS {
        let target = references.get(name).unwrap();
        assert_eq!(target, &dataset_path(name));
        assert!(reader.entry_bytes(target).is_ok());
    }
}

/// Translating the same source twice yields identical dataset bytes
#[test]
fn test_idempotent_datasets() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let first = dir.path().join("first.pgrid");
    let second = dir.path().join("second.pgrid");

    let translator = AscTranslator::default();
    let settings = AcquisitionSettings::new(1.0);
    translator.translate_file(&input, &first, &settings).unwrap();
    translator.translate_file(&input, &second, &settings).unwrap();

    let first = ContainerReader::open(&first).unwrap();
    let second = ContainerReader::open(&second).unwrap();
    for name in CHANNEL_DATASETS {
        assert_eq!(
            first.dataset_bytes(name).unwrap(),
            second.dataset_bytes(name).unwrap(),
            "{} differs",
            name
        );
    }
    assert_ne!(first.manifest().id, second.manifest().id);
}

/// An existing destination is never silently replaced
#[test]
fn test_destination_conflict() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let output = dir.path().join("grid.pgrid");
    let settings = AcquisitionSettings::new(1.0);

    AscTranslator::default()
        .translate_file(&input, &output, &settings)
        .unwrap();
    let before = fs::read(&output).unwrap();

    let err = AscTranslator::default()
        .translate_file(&input, &output, &settings)
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Container(ContainerError::DestinationConflict(_))
    ));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(fs::read(&output).unwrap(), before);

    let overwriting = AscTranslator::new(
        AscLayout::default(),
        ContainerWriter::new(ContainerConfig::default().with_overwrite(true)),
    );
    overwriting
        .translate_file(&input, &output, &AcquisitionSettings::new(2.0))
        .unwrap();
    let reader = ContainerReader::open(&output).unwrap();
    assert_eq!(
        reader.spectroscopic_values().unwrap().column("Bias").unwrap()[0],
        -2.0
    );
}

/// Fewer data rows than scan positions
#[test]
fn test_truncated_data() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "short.asc", 50);
    let output = dir.path().join("short.pgrid");

    let err = AscTranslator::default()
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Grid(GridError::TruncatedData {
            expected: 100,
            available: 50
        })
    ));
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    assert!(!output.exists());
}

/// More data rows than scan positions
#[test]
fn test_extra_data_rows() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "long.asc", 101);
    let output = dir.path().join("long.pgrid");

    let err = AscTranslator::default()
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Grid(GridError::ExtraData {
            expected: 100,
            found: 101
        })
    ));
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    assert!(!output.exists());
}

/// A blank line inside the data block is an empty row, not skipped
#[test]
fn test_blank_line_in_data_block() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("gap.asc");
    let text = asc_text(&grid_parameters(), 5, 99).replacen("\n3.000\t", "\n\n3.000\t", 1);
    fs::write(&input, text).unwrap();

    let err = AscTranslator::default()
        .translate_file(&input, dir.path().join("gap.pgrid"), &AcquisitionSettings::new(1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Grid(GridError::RowLengthMismatch {
            row: 3,
            line: 407,
            actual: 0,
            ..
        })
    ));
}

/// A data row with the wrong number of values
#[test]
fn test_row_length_mismatch() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ragged.asc");
    let text = asc_text(&grid_parameters(), 5, 100).replacen("2.000\t2.125\t2.250\t2.375\t2.500\t", "2.000\t2.125\t", 1);
    fs::write(&input, text).unwrap();

    let err = AscTranslator::default()
        .translate_file(&input, dir.path().join("ragged.pgrid"), &AcquisitionSettings::new(1.0))
        .unwrap_err();
    match err {
        TranslateError::Grid(GridError::RowLengthMismatch {
            row,
            line,
            expected,
            actual,
        }) => {
            assert_eq!(row, 2);
            assert_eq!(line, 406);
            assert_eq!(expected, 5);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {}", other),
    }
}

/// Duplicate keys fail by default and can be allowed through the layout
#[test]
fn test_duplicate_key_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dup.asc");
    let mut parameters = grid_parameters();
    parameters.push(("gain", "4.0"));
    fs::write(&input, asc_text(&parameters, 5, 100)).unwrap();

    let err = AscTranslator::default()
        .translate_file(&input, dir.path().join("a.pgrid"), &AcquisitionSettings::new(1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Header(HeaderError::DuplicateParameter { first_line: 8, line: 10, .. })
    ));

    let layout = AscLayout {
        duplicate_keys: DuplicateKeyPolicy::LastWriteWins,
        ..AscLayout::default()
    };
    let output = dir.path().join("b.pgrid");
    AscTranslator::new(layout, ContainerWriter::default())
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap();
    let reader = ContainerReader::open(&output).unwrap();
    assert_eq!(
        reader.channel().parameters.get("gain"),
        Some(&ParameterValue::Integer(4))
    );
}

/// Translated containers pass validation
#[test]
fn test_validator_accepts_output() {
    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), "grid.asc", 100);
    let output = dir.path().join("grid.pgrid");
    AscTranslator::default()
        .with_verification(true)
        .translate_file(&input, &output, &AcquisitionSettings::new(1.0))
        .unwrap();

    let report = validate_container(&output).unwrap();
    assert!(report.is_valid(), "{}", report);
    assert!(report.checks.iter().any(|c| c.name.contains(POSITION_VALUES)));
    assert!(report
        .checks
        .iter()
        .any(|c| c.name.contains(SPECTROSCOPIC_VALUES)));
}
