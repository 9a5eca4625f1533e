//! Shared extract → validate → normalize skeleton for both row kinds.
//!
//! A row kind is a [`RowPipeline`] value holding its three stage functions.
//! The single-row and batch drivers are written once against that shape.

use crate::cell::Cell;
use crate::error::RowError;
use crate::model::{BatchOutput, RowIssue};

/// Stage functions for one row kind.
///
/// `C` is the configuration the rows are read with (a column mapping or a
/// header list), `R` the loosely-typed extracted record, `V` the validated
/// record and `T` the final normalized row. Every stage receives the
/// zero-based row index so errors can name the 1-based row.
pub struct RowPipeline<C: ?Sized, R, V, T> {
    /// Name used in log output ("vendor", "company").
    pub kind: &'static str,
    /// False when `config` is absent/empty; batches then do nothing.
    pub is_configured: fn(&C) -> bool,
    pub extract: fn(&[Cell], &C, usize) -> Result<R, RowError>,
    /// Checks run in a fixed order; the first violation rejects the row.
    pub validate: fn(R, usize) -> Result<V, RowError>,
    pub normalize: fn(V, usize) -> Result<T, RowError>,
}

impl<C: ?Sized, R, V, T> RowPipeline<C, R, V, T> {
    /// Run all three stages on one row, failing fast on the first error.
    pub fn parse_row(&self, row: &[Cell], config: &C, row_index: usize) -> Result<T, RowError> {
        let raw = (self.extract)(row, config, row_index)?;
        let validated = (self.validate)(raw, row_index)?;
        (self.normalize)(validated, row_index)
    }

    /// Run every row independently. A failing row is recorded in `errors`
    /// and left out of `normalized`; the batch itself never fails.
    pub fn process_rows<Row: AsRef<[Cell]>>(&self, rows: &[Row], config: &C) -> BatchOutput<T> {
        if !(self.is_configured)(config) {
            log::debug!("{} batch skipped: no column configuration", self.kind);
            return BatchOutput::default();
        }

        let output = rows.iter().enumerate().fold(BatchOutput::default(), |mut acc, (i, row)| {
            match self.parse_row(row.as_ref(), config, i) {
                Ok(normalized) => acc.normalized.push(normalized),
                Err(err) => {
                    log::debug!("{} row rejected: {err}", self.kind);
                    acc.errors.push(RowIssue::from(&err));
                }
            }
            acc
        });

        log::info!(
            "{} batch: {} accepted, {} rejected",
            self.kind,
            output.normalized.len(),
            output.errors.len(),
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::parse_number;

    // Minimal row kind: one numeric column at the configured index, must be even.
    fn extract(row: &[Cell], index: &usize, row_index: usize) -> Result<Cell, RowError> {
        row.get(*index)
            .cloned()
            .ok_or_else(|| RowError::structural(row_index, "index out of bounds"))
    }

    fn validate(cell: Cell, row_index: usize) -> Result<f64, RowError> {
        let n = parse_number(&cell)
            .ok_or_else(|| RowError::unparsable(row_index, "N", cell.to_display_string()))?;
        if n % 2.0 != 0.0 {
            return Err(RowError::constraint(row_index, "N", "must be even"));
        }
        Ok(n)
    }

    fn normalize(n: f64, _row_index: usize) -> Result<i64, RowError> {
        Ok(n as i64)
    }

    fn always(_: &usize) -> bool {
        true
    }

    fn never(_: &usize) -> bool {
        false
    }

    const EVEN: RowPipeline<usize, Cell, f64, i64> = RowPipeline {
        kind: "even",
        is_configured: always,
        extract,
        validate,
        normalize,
    };

    #[test]
    fn batch_continues_past_failures() {
        let rows = vec![
            vec![Cell::from(2i64)],
            vec![Cell::from(3i64)],
            vec![],
            vec![Cell::from("4")],
        ];
        let out = EVEN.process_rows(&rows, &0);
        assert_eq!(out.normalized, vec![2, 4]);
        assert_eq!(out.errors.len(), 2);
        assert_eq!(out.errors[0].row, 2);
        assert_eq!(out.errors[0].kind, "constraint_violation");
        assert_eq!(out.errors[1].row, 3);
        assert_eq!(out.errors[1].error, "[Row 3] index out of bounds");
    }

    #[test]
    fn single_row_fails_fast_with_row_context() {
        let err = EVEN.parse_row(&[Cell::from("x")], &0, 6).unwrap_err();
        assert_eq!(err.row(), 7);
        assert!(err.to_string().starts_with("[Row 7]"));
    }

    #[test]
    fn unconfigured_batch_is_empty() {
        let unconfigured = RowPipeline { is_configured: never, ..EVEN };
        let out = unconfigured.process_rows(&[vec![Cell::from(2i64)]], &0);
        assert!(out.normalized.is_empty());
        assert!(out.errors.is_empty());
    }
}
