//! `psync reconcile`, `psync validate`, `psync normalize`: config-driven price reconciliation.

use std::path::{Path, PathBuf};

use pricesync_recon::company::process_company_rows;
use pricesync_recon::vendor::process_vendor_rows;
use pricesync_recon::{PricingConfig, RowIssue, SheetData};
use serde::Serialize;

use crate::exit_codes::EXIT_ROW_ERRORS;
use crate::{CliError, SheetKind};

pub struct ReconcileArgs {
    pub config: PathBuf,
    pub vendor: PathBuf,
    pub company: PathBuf,
    pub subclass: Option<String>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub export: Option<PathBuf>,
}

fn load_config(path: &Path) -> Result<PricingConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    PricingConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))
}

fn load_sheet(path: &Path) -> Result<SheetData, CliError> {
    pricesync_io::load_sheet(path).map_err(|e| CliError::io(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))
}

fn print_issues(label: &str, issues: &[RowIssue]) {
    for issue in issues {
        eprintln!("  {label} {}", issue.error);
    }
}

pub fn cmd_reconcile(args: ReconcileArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;

    if let Some(ref subclass) = args.subclass {
        if !config.markup.subclasses.contains_key(subclass) {
            log::warn!("subclass '{subclass}' not in [markup.subclasses]; using default markup");
        }
    }

    let vendor = load_sheet(&args.vendor)?;
    let company = load_sheet(&args.company)?;

    let result = pricesync_recon::run(&config, &vendor, &company, args.subclass.as_deref())
        .map_err(|e| {
            CliError::config(e.to_string())
                .with_hint(format!("vendor headers: {}", vendor.headers.join(", ")))
        })?;

    // Output
    let json_str = to_json(&result)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(ref path) = args.export {
        pricesync_io::csv::export_company_rows(&result.updated_rows, path)
            .map_err(|e| CliError::io(format!("cannot write export: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "'{}': {} item(s), {} matched, {} orphaned; vendor cost up {}, down {}, unchanged {} (markup x{})",
        result.meta.config_name,
        s.total,
        s.matched,
        s.orphaned,
        s.cost_increases,
        s.cost_decreases,
        s.cost_unchanged,
        result.meta.multiplier,
    );
    if !result.vendor_only.is_empty() {
        eprintln!("{} vendor MPN(s) not in catalog", result.vendor_only.len());
    }
    if !result.duplicate_vendor_mpns.is_empty() {
        eprintln!(
            "{} vendor MPN(s) listed more than once; the last row for each was used",
            result.duplicate_vendor_mpns.len()
        );
    }

    if result.row_error_count() > 0 {
        eprintln!(
            "rejected rows: {} vendor, {} company",
            result.vendor_errors.len(),
            result.company_errors.len()
        );
        print_issues("vendor", &result.vendor_errors);
        print_issues("company", &result.company_errors);
        return Err(CliError::new(EXIT_ROW_ERRORS, "some rows were rejected"));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let markup = config.markup_for(None);
    eprintln!(
        "valid: '{}' with markup x{} and {} subclass override(s)",
        config.name,
        markup.multiplier,
        config.markup.subclasses.len(),
    );
    Ok(())
}

pub fn cmd_normalize(
    kind: SheetKind,
    input: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), CliError> {
    let sheet = load_sheet(&input)?;

    let (accepted, errors, json_str) = match kind {
        SheetKind::Vendor => {
            let config_path = config_path.ok_or_else(|| {
                CliError::args("vendor sheets need --config")
                    .with_hint("the config's [vendor.columns] says which columns hold MPN and Cost")
            })?;
            let config = load_config(&config_path)?;
            let mapping = config
                .vendor
                .columns
                .resolve(&sheet.headers)
                .map_err(|e| CliError::config(e.to_string()))?;
            let batch = process_vendor_rows(&sheet.rows, &mapping);
            (batch.normalized.len(), batch.errors.clone(), to_json(&batch)?)
        }
        SheetKind::Company => {
            let batch = process_company_rows(&sheet.rows, &sheet.headers);
            (batch.normalized.len(), batch.errors.clone(), to_json(&batch)?)
        }
    };

    if json_output {
        println!("{json_str}");
    }

    let label = match kind {
        SheetKind::Vendor => "vendor",
        SheetKind::Company => "company",
    };
    eprintln!("{label}: {accepted} row(s) normalized, {} rejected", errors.len());

    if !errors.is_empty() {
        print_issues(label, &errors);
        return Err(CliError::new(EXIT_ROW_ERRORS, "some rows were rejected"));
    }
    Ok(())
}
