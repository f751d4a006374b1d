use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod info;
mod validate;

pub use convert::ConvertArgs;

/// probegrid - Scanning-probe spectroscopy grid translator
#[derive(Parser)]
#[command(name = "probegrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an Omicron .asc grid to a .pgrid container
    Convert(ConvertArgs),

    /// Display information about a .pgrid container
    Info {
        /// Input container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate .pgrid container integrity
    Validate {
        /// Input container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert(args) => convert::run(args),
        Commands::Info { file } => info::run(file),
        Commands::Validate { file } => validate::run(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "probegrid", "-vv", "convert", "scan.asc", "--max-v", "1.5", "--overwrite",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, PathBuf::from("scan.asc"));
                assert_eq!(args.output, None);
                assert_eq!(args.max_v, Some(1.5));
                assert!(args.overwrite);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["probegrid", "validate", "scan.pgrid"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { .. }));
    }
}
