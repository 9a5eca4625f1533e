// Sheet decoding and export

pub mod csv;
pub mod error;
pub mod xlsx;

use std::path::Path;

use pricesync_recon::SheetData;

pub use error::SheetError;

/// Decode the first sheet of `path` into headers + rows, picking the reader
/// by file extension.
pub fn load_sheet(path: &Path) -> Result<SheetData, SheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let sheet = match ext.as_str() {
        "csv" | "txt" => crate::csv::import(path)?,
        "tsv" | "tab" => crate::csv::import_with_delimiter(path, b'\t')?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => crate::xlsx::import(path)?,
        other => return Err(SheetError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "loaded {}: {} column(s), {} row(s)",
        path.display(),
        sheet.headers.len(),
        sheet.rows.len(),
    );
    Ok(sheet)
}
