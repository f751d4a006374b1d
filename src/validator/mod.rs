//! # Container Validation
//!
//! Integrity validation for `.pgrid` containers.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: ZIP archive, `mimetype` first and uncompressed, manifest,
//!    group attributes and all five datasets present
//! 2. **References**: every ancillary dataset is referenced from `Raw_Data`
//!    and the reference resolves
//! 3. **Shapes**: dataset shapes match the channel attributes, position
//!    indices stay inside the raster and spectroscopic values increase
//!
//! Structural and reference failures stop validation early and are
//! returned as errors; shape problems are recorded in the report.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use probegrid::validator::validate_container;
//! use std::path::Path;
//!
//! match validate_container(Path::new("grid.pgrid")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod references;
mod report;
mod shapes;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Error in archive structure
    #[error("Structure error: {0}")]
    StructureError(String),

    /// Missing or dangling dataset reference
    #[error("Reference error: {0}")]
    ReferenceError(String),

    /// Validation completed but some checks failed
    #[error("{0} validation check(s) failed")]
    FailedChecks(usize),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the ZIP library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),
}

/// Main validation entry point
pub fn validate_container(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    let reader = structure::check_structure(path, &mut report)?;
    references::check_references(&reader, &mut report)?;
    shapes::check_shapes(&reader, &mut report)?;

    log::debug!(
        "Validated {}: {} passed, {} failed",
        path.display(),
        report.success_count(),
        report.failure_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerWriter, TranslationRequest};
    use crate::grid::RawGrid;
    use crate::schema::{dataset_path, MIMETYPE_ENTRY, POSITION_VALUES, PROBEGRID_MIMETYPE};
    use std::fs::{self, File};
    use std::io::{Read, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipArchive, ZipWriter};

    fn write_sample(path: &Path) {
        let grid = RawGrid::from_vec(6, 3, (0..18).map(|v| v as f32).collect()).unwrap();
        let request = TranslationRequest::builder(grid, 3, 2)
            .spectroscopic("Bias", "V", vec![-1.0, 0.0, 1.0])
            .scan_size(20.0, 30.0, "nm")
            .build()
            .unwrap();
        ContainerWriter::default().translate(path, request).unwrap();
    }

    /// Copy `source` to `dest`, dropping `skip` and applying `method` to the mimetype entry
    fn rewrite(source: &Path, dest: &Path, skip: Option<&str>, mimetype: CompressionMethod) {
        let mut archive = ZipArchive::new(File::open(source).unwrap()).unwrap();
        let mut zip = ZipWriter::new(File::create(dest).unwrap());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let name = entry.name().to_string();
            if Some(name.as_str()) == skip || entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            let method = if name == MIMETYPE_ENTRY {
                mimetype
            } else {
                CompressionMethod::Stored
            };
            zip.start_file(name, SimpleFileOptions::default().compression_method(method))
                .unwrap();
            zip.write_all(&bytes).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("test.pgrid");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.contains("Validation FAILED"));
    }

    #[test]
    fn test_add_check_reports_outcome() {
        let mut report = ValidationReport::new("test.pgrid");
        assert!(report.add_check(ValidationCheck::warning("w", "careful")));
        assert!(report.is_valid());
        assert!(!report.add_check(ValidationCheck::expect("e", false, || "bad".into())));
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_valid_container() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("good.pgrid");
        write_sample(&path);

        let report = validate_container(&path).unwrap();
        assert!(report.is_valid(), "{}", report);
        assert!(!report.has_warnings());
        assert!(report
            .checks
            .iter()
            .any(|c| c.name == "Reference Position_Values"));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        assert!(validate_container(&dir.path().join("absent.pgrid")).is_err());
        assert!(validate_container(dir.path()).is_err());
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.pgrid");
        fs::write(&path, PROBEGRID_MIMETYPE).unwrap();
        let err = validate_container(&path).unwrap_err();
        assert!(err.to_string().contains("Structure error"));
    }

    #[test]
    fn test_compressed_mimetype_fails() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.pgrid");
        let bad = dir.path().join("bad.pgrid");
        write_sample(&good);
        rewrite(&good, &bad, None, CompressionMethod::Deflated);

        assert!(validate_container(&bad).is_err());
    }

    #[test]
    fn test_missing_dataset_fails() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.pgrid");
        let bad = dir.path().join("bad.pgrid");
        write_sample(&good);
        rewrite(
            &good,
            &bad,
            Some(&dataset_path(POSITION_VALUES)),
            CompressionMethod::Stored,
        );

        let err = validate_container(&bad).unwrap_err();
        assert!(err.to_string().contains("Structure error"));
    }
}
