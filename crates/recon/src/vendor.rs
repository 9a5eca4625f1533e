//! Vendor price-list rows, read through a [`ColumnMapping`].

use crate::cell::Cell;
use crate::error::RowError;
use crate::model::{BatchOutput, ColumnMapping, ColumnRef, NormalizedVendorRow};
use crate::number::parse_number;
use crate::pipeline::RowPipeline;

/// Values pulled out of a vendor row, not yet checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVendorRow {
    pub mpn: Cell,
    pub cost_cell: Cell,
    pub cost: Option<f64>,
    pub unit_divider: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVendorRow {
    pub mpn: Cell,
    pub cost: f64,
    pub unit_divider: Option<f64>,
}

pub const VENDOR_PIPELINE: RowPipeline<ColumnMapping, RawVendorRow, ValidatedVendorRow, NormalizedVendorRow> =
    RowPipeline {
        kind: "vendor",
        is_configured,
        extract,
        validate,
        normalize,
    };

/// Parse one vendor row (`row_index` is zero-based).
pub fn parse_vendor_row(
    row: &[Cell],
    mapping: &ColumnMapping,
    row_index: usize,
) -> Result<NormalizedVendorRow, RowError> {
    VENDOR_PIPELINE.parse_row(row, mapping, row_index)
}

/// Parse every vendor row, collecting per-row errors.
pub fn process_vendor_rows<Row: AsRef<[Cell]>>(
    rows: &[Row],
    mapping: &ColumnMapping,
) -> BatchOutput<NormalizedVendorRow> {
    VENDOR_PIPELINE.process_rows(rows, mapping)
}

fn is_configured(mapping: &ColumnMapping) -> bool {
    !mapping.is_empty()
}

fn required_column<'a>(
    column: &'a Option<ColumnRef>,
    field: &str,
    row: &[Cell],
    row_index: usize,
) -> Result<&'a ColumnRef, RowError> {
    let column = column
        .as_ref()
        .ok_or_else(|| RowError::structural(row_index, format!("no column mapped for {field}")))?;
    if column.index >= row.len() {
        return Err(RowError::structural(
            row_index,
            format!(
                "{field} column '{}' (index {}) is out of bounds for a row of {} cells",
                column.name,
                column.index,
                row.len()
            ),
        ));
    }
    Ok(column)
}

fn extract(row: &[Cell], mapping: &ColumnMapping, row_index: usize) -> Result<RawVendorRow, RowError> {
    let mpn_col = required_column(&mapping.mpn, "MPN", row, row_index)?;
    let cost_col = required_column(&mapping.cost, "Cost", row, row_index)?;

    let cost_cell = row[cost_col.index].clone();
    let unit_divider = mapping
        .unit_divider
        .as_ref()
        .and_then(|col| row.get(col.index))
        .and_then(parse_number);

    Ok(RawVendorRow {
        mpn: row[mpn_col.index].clone(),
        cost: parse_number(&cost_cell),
        cost_cell,
        unit_divider,
    })
}

fn validate(raw: RawVendorRow, row_index: usize) -> Result<ValidatedVendorRow, RowError> {
    if raw.mpn.is_empty() {
        return Err(RowError::required(row_index, "MPN"));
    }
    if raw.mpn.is_non_finite() {
        return Err(RowError::schema(row_index, "MPN is not a finite number"));
    }

    let cost = match raw.cost {
        Some(cost) => cost,
        None if raw.cost_cell.is_empty() => return Err(RowError::required(row_index, "Cost")),
        None => {
            return Err(RowError::unparsable(row_index, "Cost", raw.cost_cell.to_display_string()))
        }
    };
    if cost < 0.0 {
        return Err(RowError::constraint(
            row_index,
            "Cost",
            format!("must be non-negative (got {cost})"),
        ));
    }

    if let Some(divider) = raw.unit_divider {
        if divider <= 0.0 {
            return Err(RowError::constraint(
                row_index,
                "Unit Divider",
                format!("must be greater than zero (got {divider})"),
            ));
        }
    }

    Ok(ValidatedVendorRow {
        mpn: raw.mpn,
        cost,
        unit_divider: raw.unit_divider,
    })
}

fn normalize(row: ValidatedVendorRow, row_index: usize) -> Result<NormalizedVendorRow, RowError> {
    let normalized = NormalizedVendorRow::new(
        row.mpn.to_display_string(),
        row.cost,
        row.unit_divider.unwrap_or(1.0),
    );
    if !normalized.unit_cost().is_finite() {
        return Err(RowError::schema(
            row_index,
            format!(
                "UnitCost is not a finite number (Cost {} / UnitDivider {})",
                row.cost,
                normalized.unit_divider()
            ),
        ));
    }
    Ok(normalized)
}
