use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Result;
use zip::{CompressionMethod, ZipArchive};

use crate::reader::ContainerReader;
use crate::schema::{
    channel_attributes_path, dataset_path, measurement_attributes_path, Manifest,
    CHANNEL_DATASETS, MANIFEST_ENTRY, MIMETYPE_ENTRY, PROBEGRID_MIMETYPE,
};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 1: archive structure. Returns an opened reader for the later steps.
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<ContainerReader> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError("Path does not exist".to_string()));
    }
    if !path.is_file() {
        report.add_check(ValidationCheck::failed(
            "Path is a file",
            "Containers are single files, found a directory or special file",
        ));
        anyhow::bail!(ValidationError::StructureError("Not a file".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    let file = File::open(path)?;
    let mut archive = match ZipArchive::new(BufReader::new(file)) {
        Ok(archive) => archive,
        Err(e) => {
            report.add_check(ValidationCheck::failed("ZIP archive", e.to_string()));
            anyhow::bail!(ValidationError::StructureError(format!("Not a ZIP archive: {}", e)));
        }
    };
    report.add_check(ValidationCheck::ok("ZIP archive"));

    check_mimetype(&mut archive, report)?;

    match read_entry(&mut archive, MANIFEST_ENTRY) {
        Some(bytes) => match serde_json::from_slice::<Manifest>(&bytes) {
            Ok(manifest) => {
                report.add_check(ValidationCheck::ok(format!(
                    "manifest.json (format {})",
                    manifest.format_version
                )));
                let missing: Vec<&String> = manifest
                    .entries
                    .iter()
                    .filter(|name| archive.index_for_name(name).is_none())
                    .collect();
                report.add_check(ValidationCheck::expect(
                    "Manifest entries present",
                    missing.is_empty(),
                    || format!("Listed but missing: {:?}", missing),
                ));
            }
            Err(e) => {
                report.add_check(ValidationCheck::failed(
                    "manifest.json",
                    format!("Invalid manifest: {}", e),
                ));
            }
        },
        None => {
            report.add_check(ValidationCheck::failed("manifest.json", "Missing manifest.json"));
        }
    }

    for path in [measurement_attributes_path(), channel_attributes_path()] {
        report.add_check(ValidationCheck::expect(
            format!("{} exists", path),
            archive.index_for_name(&path).is_some(),
            || format!("Missing {}", path),
        ));
    }

    let mut datasets_ok = true;
    for name in CHANNEL_DATASETS {
        let entry_path = dataset_path(name);
        let check = match archive.by_name(&entry_path) {
            Ok(entry) if entry.compression() == CompressionMethod::Stored => {
                ValidationCheck::ok(format!("{} (Stored)", entry_path))
            }
            Ok(entry) => ValidationCheck::failed(
                format!("{} (Stored)", entry_path),
                format!(
                    "Parquet entries must be uncompressed, found {:?}",
                    entry.compression()
                ),
            ),
            Err(_) => ValidationCheck::failed(entry_path.clone(), format!("Missing {}", entry_path)),
        };
        datasets_ok &= report.add_check(check);
    }
    if !datasets_ok {
        anyhow::bail!(ValidationError::StructureError("Missing or compressed datasets".to_string()));
    }

    match ContainerReader::open(path) {
        Ok(reader) => {
            report.add_check(ValidationCheck::ok("Container readable"));
            Ok(reader)
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Container readable", e.to_string()));
            anyhow::bail!(ValidationError::StructureError(e.to_string()));
        }
    }
}

/// The mimetype entry MUST be first, uncompressed, and hold the probegrid MIME type
fn check_mimetype<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    report: &mut ValidationReport,
) -> Result<()> {
    if archive.is_empty() {
        report.add_check(ValidationCheck::failed("ZIP structure", "Empty ZIP archive"));
        anyhow::bail!(ValidationError::StructureError("Empty ZIP archive".to_string()));
    }

    let mut first = archive.by_index(0)?;
    if first.name() != MIMETYPE_ENTRY {
        report.add_check(ValidationCheck::failed(
            "mimetype entry",
            format!("First entry must be 'mimetype', found: {}", first.name()),
        ));
        anyhow::bail!(ValidationError::StructureError("mimetype is not the first entry".to_string()));
    }

    let stored = first.compression() == CompressionMethod::Stored;
    let mut content = String::new();
    first.read_to_string(&mut content)?;

    let passed = report.add_check(ValidationCheck::expect(
        "mimetype entry",
        stored && content == PROBEGRID_MIMETYPE,
        || {
            if stored {
                format!("Expected '{}', found '{}'", PROBEGRID_MIMETYPE, content)
            } else {
                "mimetype entry must be uncompressed".to_string()
            }
        },
    ));
    if !passed {
        anyhow::bail!(ValidationError::StructureError("Invalid mimetype entry".to_string()));
    }
    Ok(())
}

fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Option<Vec<u8>> {
    let mut entry = archive.by_name(name).ok()?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).ok()?;
    Some(bytes)
}
