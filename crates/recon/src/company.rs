//! Company catalog rows, read by header name.

use std::collections::HashMap;

use crate::cell::Cell;
use crate::error::RowError;
use crate::model::{BatchOutput, NormalizedCompanyRow};
use crate::number::parse_number;
use crate::pipeline::RowPipeline;

/// Header name → cell, built by zipping the header list with the row.
pub type RawCompanyRow = HashMap<String, Cell>;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCompanyRow {
    pub mpn: Cell,
    pub item: String,
    pub description: Option<Cell>,
    pub preferred_vendor: Option<Cell>,
    pub cost: f64,
    pub price: f64,
    pub um: Option<Cell>,
}

pub const COMPANY_PIPELINE: RowPipeline<[String], RawCompanyRow, ValidatedCompanyRow, NormalizedCompanyRow> =
    RowPipeline {
        kind: "company",
        is_configured,
        extract,
        validate,
        normalize,
    };

/// Parse one company row against `headers` (`row_index` is zero-based).
pub fn parse_company_row(
    row: &[Cell],
    headers: &[String],
    row_index: usize,
) -> Result<NormalizedCompanyRow, RowError> {
    COMPANY_PIPELINE.parse_row(row, headers, row_index)
}

/// Parse every company row, collecting per-row errors.
pub fn process_company_rows<Row: AsRef<[Cell]>>(
    rows: &[Row],
    headers: &[String],
) -> BatchOutput<NormalizedCompanyRow> {
    COMPANY_PIPELINE.process_rows(rows, headers)
}

fn is_configured(headers: &[String]) -> bool {
    !headers.is_empty()
}

fn extract(row: &[Cell], headers: &[String], row_index: usize) -> Result<RawCompanyRow, RowError> {
    if headers.is_empty() {
        return Err(RowError::structural(row_index, "no headers provided"));
    }
    if row.len() != headers.len() {
        return Err(RowError::structural(
            row_index,
            format!("row has {} cells but there are {} headers", row.len(), headers.len()),
        ));
    }
    Ok(headers.iter().cloned().zip(row.iter().cloned()).collect())
}

/// Non-negative number from `field`; blank is "required", text is "unparsable".
fn non_negative(raw: &RawCompanyRow, field: &'static str, row_index: usize) -> Result<f64, RowError> {
    let cell = raw.get(field).cloned().unwrap_or_default();
    let value = match parse_number(&cell) {
        Some(n) => n,
        None if cell.is_empty() => return Err(RowError::required(row_index, field)),
        None => return Err(RowError::unparsable(row_index, field, cell.to_display_string())),
    };
    if !value.is_finite() {
        return Err(RowError::schema(row_index, format!("{field} is not a finite number ({value})")));
    }
    if value < 0.0 {
        return Err(RowError::constraint(
            row_index,
            field,
            format!("must be non-negative (got {value})"),
        ));
    }
    Ok(value)
}

fn validate(mut raw: RawCompanyRow, row_index: usize) -> Result<ValidatedCompanyRow, RowError> {
    let mpn = raw.remove("MPN").unwrap_or_default();
    if mpn.is_empty() {
        return Err(RowError::required(row_index, "MPN"));
    }
    if mpn.is_non_finite() {
        return Err(RowError::schema(row_index, "MPN is not a finite number"));
    }

    let item_cell = raw.get("Item").cloned().unwrap_or_default();
    let item = item_cell.to_display_string().trim().to_string();
    if item.is_empty() {
        return Err(RowError::required(row_index, "Item"));
    }
    if item_cell.is_non_finite() {
        return Err(RowError::schema(row_index, "Item is not a finite number"));
    }

    let cost = non_negative(&raw, "Cost", row_index)?;
    let price = non_negative(&raw, "Price", row_index)?;

    Ok(ValidatedCompanyRow {
        mpn,
        item,
        description: raw.remove("Description"),
        preferred_vendor: raw.remove("PreferredVendor"),
        cost,
        price,
        um: raw.remove("U/M"),
    })
}

fn optional_text(cell: Option<Cell>) -> Option<String> {
    cell.filter(|c| !c.is_empty()).map(|c| c.to_display_string())
}

fn normalize(row: ValidatedCompanyRow, row_index: usize) -> Result<NormalizedCompanyRow, RowError> {
    let mpn = row.mpn.to_display_string().trim().to_string();
    if mpn.is_empty() {
        return Err(RowError::schema(row_index, "MPN is blank after trimming"));
    }

    Ok(NormalizedCompanyRow {
        mpn,
        item: row.item,
        description: optional_text(row.description),
        preferred_vendor: optional_text(row.preferred_vendor),
        cost: row.cost,
        price: row.price,
        um: optional_text(row.um),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        ["MPN", "Item", "Description", "PreferredVendor", "Cost", "Price", "U/M"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn row(mpn: &str, item: &str, cost: Cell, price: Cell) -> Vec<Cell> {
        vec![
            Cell::from(mpn),
            Cell::from(item),
            Cell::from("desc"),
            Cell::Empty,
            cost,
            price,
            Cell::from("EA"),
        ]
    }

    #[test]
    fn normalizes_full_row() {
        let out = parse_company_row(&row(" X1 ", " Widget ", Cell::from(8i64), Cell::from("$12.00")), &headers(), 0)
            .unwrap();
        assert_eq!(
            out,
            NormalizedCompanyRow {
                mpn: "X1".into(),
                item: "Widget".into(),
                description: Some("desc".into()),
                preferred_vendor: None,
                cost: 8.0,
                price: 12.0,
                um: Some("EA".into()),
            }
        );
    }

    #[test]
    fn length_mismatch_is_structural() {
        let err = parse_company_row(&[Cell::from("X1")], &headers(), 2).unwrap_err();
        assert_eq!(err.kind(), "structural");
        assert_eq!(err.to_string(), "[Row 3] row has 1 cells but there are 7 headers");
    }

    #[test]
    fn validation_order() {
        let h = headers();
        let err = parse_company_row(&row("", "", Cell::from("x"), Cell::from("x")), &h, 0).unwrap_err();
        assert_eq!(err, RowError::required(0, "MPN"));

        let err = parse_company_row(&row("A", "   ", Cell::from("x"), Cell::from("x")), &h, 0).unwrap_err();
        assert_eq!(err, RowError::required(0, "Item"));

        let err = parse_company_row(&row("A", "W", Cell::from("x"), Cell::from("-1")), &h, 0).unwrap_err();
        assert_eq!(err, RowError::unparsable(0, "Cost", "x"));

        let err = parse_company_row(&row("A", "W", Cell::from(-2i64), Cell::from("1")), &h, 0).unwrap_err();
        assert_eq!(err.kind(), "constraint_violation");
        assert!(err.to_string().contains("Cost must be non-negative"));

        let err = parse_company_row(&row("A", "W", Cell::from(1i64), Cell::Empty), &h, 0).unwrap_err();
        assert_eq!(err, RowError::required(0, "Price"));

        let err = parse_company_row(&row("A", "W", Cell::from(1i64), Cell::from("-0.5")), &h, 0).unwrap_err();
        assert!(err.to_string().contains("Price must be non-negative"));
    }

    #[test]
    fn non_finite_numbers_are_schema_mismatch() {
        let h = headers();
        let err = parse_company_row(&row("A", "W", Cell::Number(f64::INFINITY), Cell::from(1i64)), &h, 0)
            .unwrap_err();
        assert_eq!(err.kind(), "schema_mismatch");
        assert!(err.to_string().contains("Cost is not a finite number"));

        let err = parse_company_row(&row("A", "W", Cell::from(1i64), Cell::Number(f64::NEG_INFINITY)), &h, 3)
            .unwrap_err();
        assert_eq!(err.row(), 4);
        assert!(err.to_string().contains("Price"));

        let mut cells = row("A", "W", Cell::from(1i64), Cell::from(1i64));
        cells[1] = Cell::Number(f64::NAN);
        let err = parse_company_row(&cells, &h, 0).unwrap_err();
        assert_eq!(err, RowError::schema(0, "Item is not a finite number"));

        cells[1] = Cell::from("W");
        cells[0] = Cell::Number(f64::INFINITY);
        let err = parse_company_row(&cells, &h, 0).unwrap_err();
        assert_eq!(err, RowError::schema(0, "MPN is not a finite number"));
    }

    #[test]
    fn whitespace_mpn_fails_final_shape() {
        let err = parse_company_row(&row("   ", "W", Cell::from(1i64), Cell::from(2i64)), &headers(), 0)
            .unwrap_err();
        assert_eq!(err.kind(), "schema_mismatch");
    }

    #[test]
    fn missing_optional_columns_are_none() {
        let h: Vec<String> = ["MPN", "Item", "Cost", "Price"].iter().map(|s| s.to_string()).collect();
        let cells = vec![Cell::from(555i64), Cell::from("Bolt"), Cell::from(1i64), Cell::from(2i64)];
        let out = parse_company_row(&cells, &h, 0).unwrap();
        assert_eq!(out.mpn, "555");
        assert!(out.description.is_none());
        assert!(out.um.is_none());
    }

    #[test]
    fn batch_counts_and_rows() {
        let rows = vec![
            row("A", "W", Cell::from(1i64), Cell::from(2i64)),
            row("B", "", Cell::from(1i64), Cell::from(2i64)),
            vec![Cell::from("C")],
            row("D", "W", Cell::from(1i64), Cell::from(2i64)),
            row("E", "W", Cell::from("n/a"), Cell::from(2i64)),
        ];
        let out = process_company_rows(&rows, &headers());
        assert_eq!(out.normalized.len(), 2);
        let bad: Vec<usize> = out.errors.iter().map(|e| e.row).collect();
        assert_eq!(bad, vec![2, 3, 5]);
    }

    #[test]
    fn no_headers_skips_batch() {
        let out = process_company_rows(&[vec![Cell::from("A")]], &[]);
        assert!(out.normalized.is_empty());
        assert!(out.errors.is_empty());
    }
}
