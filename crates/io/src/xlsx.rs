// Excel import (xlsx, xlsm, xlsb, xls, ods), first worksheet only

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use pricesync_recon::{Cell, SheetData};

use crate::error::SheetError;

/// Import the first worksheet of an Excel/ODS file.
pub fn import(path: &Path) -> Result<SheetData, SheetError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| SheetError::Excel(format!("failed to open {}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::Excel(format!("{} contains no sheets", path.display())))?
        .map_err(|e| SheetError::Excel(format!("failed to read first sheet: {}", e)))?;

    if workbook.sheet_names().len() > 1 {
        log::warn!("{}: only the first sheet is read", path.display());
    }

    let sheet = sheet_from_range(&range);
    if sheet.headers.is_empty() {
        return Err(SheetError::EmptyFile(path.to_path_buf()));
    }
    Ok(sheet)
}

/// Build headers + rows from a calamine range.
///
/// The range begins at the first used cell, so rows are left-padded with
/// `Empty` to keep column positions aligned with the sheet's real columns.
fn sheet_from_range(range: &Range<Data>) -> SheetData {
    let left_pad = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let mut sheet = SheetData::default();

    for row in range.rows() {
        let cells: Vec<Cell> = std::iter::repeat(Cell::Empty)
            .take(left_pad)
            .chain(row.iter().map(cell_from_data))
            .collect();

        if cells.iter().all(|c| c.to_display_string().trim().is_empty()) {
            continue;
        }

        if sheet.headers.is_empty() {
            sheet.headers = cells.iter().map(|c| c.to_display_string().trim().to_string()).collect();
        } else {
            sheet.rows.push(cells);
        }
    }

    sheet
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::from(if *b { "TRUE" } else { "FALSE" }),
        // Dates stay as serial numbers; no price field is a date.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}
