use anyhow::Result;

use crate::reader::ContainerReader;
use crate::schema::{dataset_path, ANCILLARY_DATASETS, KEY_DATASET, RAW_DATA};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 2: every ancillary dataset is referenced from Raw_Data and the
/// reference resolves to the right entry.
pub(crate) fn check_references(reader: &ContainerReader, report: &mut ValidationReport) -> Result<()> {
    let references = match reader.references() {
        Ok(references) => references,
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                format!("{} references", RAW_DATA),
                e.to_string(),
            ));
            anyhow::bail!(ValidationError::ReferenceError(e.to_string()));
        }
    };

    let mut all_ok = true;
    for name in ANCILLARY_DATASETS {
        let check_name = format!("Reference {}", name);
        let expected = dataset_path(name);

        let check = match references.get(name) {
            None => ValidationCheck::failed(check_name, "Reference attribute missing"),
            Some(target) if *target != expected => ValidationCheck::failed(
                check_name,
                format!("Points to '{}', expected '{}'", target, expected),
            ),
            Some(target) => match reader.entry_bytes(target) {
                Err(_) => ValidationCheck::failed(check_name, format!("'{}' does not resolve", target)),
                Ok(_) => match reader.dataset_metadata(name) {
                    Ok(metadata) if metadata.name == name => ValidationCheck::ok(check_name),
                    Ok(metadata) => ValidationCheck::failed(
                        check_name,
                        format!("Footer {} is '{}'", KEY_DATASET, metadata.name),
                    ),
                    Err(e) => ValidationCheck::failed(check_name, e.to_string()),
                },
            },
        };
        all_ok &= report.add_check(check);
    }

    let extra: Vec<&String> = references
        .keys()
        .filter(|name| !ANCILLARY_DATASETS.contains(&name.as_str()))
        .collect();
    if !extra.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Unknown references",
            format!("{:?}", extra),
        ));
    }

    if !all_ok {
        anyhow::bail!(ValidationError::ReferenceError(
            "Unresolved ancillary references".to_string()
        ));
    }
    Ok(())
}
