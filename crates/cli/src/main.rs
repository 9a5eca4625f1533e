// pricesync CLI - reconcile vendor price lists against a company catalog

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "psync")]
#[command(about = "Reconcile vendor price lists against a company catalog by MPN")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug). PSYNC_LOG / RUST_LOG take precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match catalog rows to vendor rows and reprice them
    #[command(after_help = "\
Examples:
  psync reconcile -c pricing.toml --vendor vendor.xlsx --company catalog.csv
  psync reconcile -c pricing.toml --vendor vendor.csv --company catalog.csv --json
  psync reconcile -c pricing.toml --vendor vendor.csv --company catalog.csv --export updated.csv
  psync reconcile -c pricing.toml --vendor vendor.csv --company catalog.csv --subclass FASTENERS")]
    Reconcile {
        /// Path to the pricing .toml config
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Vendor price list (csv, tsv, xlsx, xls, xlsb, ods)
        #[arg(long)]
        vendor: PathBuf,

        /// Company catalog export (csv, tsv, xlsx, xls, xlsb, ods)
        #[arg(long)]
        company: PathBuf,

        /// Use this subclass's markup from [markup.subclasses] instead of the default
        #[arg(long)]
        subclass: Option<String>,

        /// Output JSON to stdout instead of only the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the updated catalog rows to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Validate a pricing config without running
    #[command(after_help = "\
Examples:
  psync validate pricing.toml")]
    Validate {
        /// Path to the pricing .toml config
        config: PathBuf,
    },

    /// Normalize a single sheet and report rejected rows
    #[command(after_help = "\
Examples:
  psync normalize --kind company --input catalog.csv
  psync normalize --kind vendor --input vendor.xlsx -c pricing.toml --json")]
    Normalize {
        /// Which row kind the sheet holds
        #[arg(long, value_enum)]
        kind: SheetKind,

        /// Sheet to read
        #[arg(long)]
        input: PathBuf,

        /// Pricing config (required for vendor sheets: supplies the column mapping)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output {normalized, errors} as JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SheetKind {
    Vendor,
    Company,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(EXIT_INVALID_CONFIG, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  pricesync-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  pricesync-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

/// Route `log` records from the library crates to stderr.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("PSYNC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    // try_init also installs the log → tracing bridge
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Reconcile { config, vendor, company, subclass, json, output, export } => {
            recon::cmd_reconcile(recon::ReconcileArgs {
                config,
                vendor,
                company,
                subclass,
                json,
                output,
                export,
            })
        }
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::Normalize { kind, input, config, json } => {
            recon::cmd_normalize(kind, input, config, json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
