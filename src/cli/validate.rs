use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate .pgrid container integrity
pub fn run(file: PathBuf) -> Result<()> {
    use probegrid::validator::validate_container;

    info!("probegrid Validator");
    info!("===================");
    info!("File: {}", file.display());

    match validate_container(&file) {
        Ok(report) => {
            println!("{}", report.format_colored());

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
