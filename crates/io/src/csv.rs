// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use pricesync_recon::model::COMPANY_HEADERS;
use pricesync_recon::{Cell, NormalizedCompanyRow, SheetData};

use crate::error::SheetError;

pub fn import(path: &Path) -> Result<SheetData, SheetError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter).and_then(|s| non_empty(s, path))
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<SheetData, SheetError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter).and_then(|s| non_empty(s, path))
}

fn non_empty(sheet: SheetData, path: &Path) -> Result<SheetData, SheetError> {
    if sheet.headers.is_empty() {
        return Err(SheetError::EmptyFile(path.to_path_buf()));
    }
    Ok(sheet)
}

/// Delimiters price sheets arrive with; earlier entries win ties.
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Pick the delimiter from the header line and the first data rows.
///
/// Blank lines are skipped, as the importer skips them. A candidate has to split the
/// header into at least two columns. The one whose sampled rows most often match the
/// header's width wins, then the wider header.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    let mut best: Option<(u8, usize, usize)> = None;
    for delim in DELIMITERS {
        let widths: Vec<usize> = sample.iter().map(|line| field_count(line, delim)).collect();
        let Some(&header_width) = widths.first() else {
            break;
        };
        if header_width < 2 {
            continue;
        }
        let agreeing = widths.iter().filter(|&&w| w == header_width).count();
        if best.map_or(true, |(_, a, w)| (agreeing, header_width) > (a, w)) {
            best = Some((delim, agreeing, header_width));
        }
    }

    best.map_or(b',', |(delim, _, _)| delim)
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are often Windows-1252).
pub fn read_file_as_utf8(path: &Path) -> Result<String, SheetError> {
    let io_err = |source| SheetError::Io { path: path.to_path_buf(), source };
    let mut file = std::fs::File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// First non-blank record is the header row; fully blank records are skipped.
/// CSV has no cell types, so every non-empty field becomes `Cell::Text`.
pub fn import_from_string(content: &str, delimiter: u8) -> Result<SheetData, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut sheet = SheetData::default();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        if sheet.headers.is_empty() {
            sheet.headers = record.iter().map(|h| h.trim().to_string()).collect();
            continue;
        }

        let row = record
            .iter()
            .map(|field| if field.is_empty() { Cell::Empty } else { Cell::from(field) })
            .collect();
        sheet.rows.push(row);
    }

    Ok(sheet)
}

/// Write company rows back out under the standard company headers.
pub fn export_company_rows(rows: &[NormalizedCompanyRow], path: &Path) -> Result<(), SheetError> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;

    writer.write_record(COMPANY_HEADERS)?;
    for row in rows {
        let record: Vec<String> = row.to_cells().iter().map(Cell::to_display_string).collect();
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|source| SheetError::Io { path: path.to_path_buf(), source })?;
    Ok(())
}
