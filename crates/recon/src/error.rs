use thiserror::Error;

/// Why a single row was rejected. Every variant carries the 1-based row number,
/// and `Display` always renders it as a `[Row N]` prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// Row/header length mismatch, missing mapping, out-of-bounds column index.
    #[error("[Row {row}] {message}")]
    Structural { row: usize, message: String },
    /// MPN, Item, or a mandatory mapped value is absent or blank.
    #[error("[Row {row}] {field} is required")]
    RequiredFieldMissing { row: usize, field: &'static str },
    /// A cost/price/divider cell could not be converted to a number.
    #[error("[Row {row}] {field} is not a valid number: '{value}'")]
    UnparsableNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    /// Negative cost/price, non-positive unit divider.
    #[error("[Row {row}] {field} {message}")]
    ConstraintViolation {
        row: usize,
        field: &'static str,
        message: String,
    },
    /// Final-shape failure not covered by the kinds above.
    #[error("[Row {row}] {message}")]
    SchemaMismatch { row: usize, message: String },
}

impl RowError {
    pub fn structural(row_index: usize, message: impl Into<String>) -> Self {
        Self::Structural { row: row_index + 1, message: message.into() }
    }

    pub fn required(row_index: usize, field: &'static str) -> Self {
        Self::RequiredFieldMissing { row: row_index + 1, field }
    }

    pub fn unparsable(row_index: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::UnparsableNumber { row: row_index + 1, field, value: value.into() }
    }

    pub fn constraint(row_index: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation { row: row_index + 1, field, message: message.into() }
    }

    pub fn schema(row_index: usize, message: impl Into<String>) -> Self {
        Self::SchemaMismatch { row: row_index + 1, message: message.into() }
    }

    /// 1-based row number.
    pub fn row(&self) -> usize {
        match self {
            Self::Structural { row, .. }
            | Self::RequiredFieldMissing { row, .. }
            | Self::UnparsableNumber { row, .. }
            | Self::ConstraintViolation { row, .. }
            | Self::SchemaMismatch { row, .. } => *row,
        }
    }

    /// Stable name of the error kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structural { .. } => "structural",
            Self::RequiredFieldMissing { .. } => "required_field_missing",
            Self::UnparsableNumber { .. } => "unparsable_number",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::SchemaMismatch { .. } => "schema_mismatch",
        }
    }
}

/// Configuration and driver failures.
#[derive(Debug, Error)]
pub enum PricingError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (bad markup, missing column name, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// A mapped vendor column has no index and its name is not among the headers.
    #[error("vendor sheet: missing column '{column}'")]
    MissingColumn { column: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_one_based_row() {
        let err = RowError::required(0, "MPN");
        assert_eq!(err.row(), 1);
        assert_eq!(err.to_string(), "[Row 1] MPN is required");
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(RowError::structural(4, "x").kind(), "structural");
        assert_eq!(RowError::unparsable(0, "Cost", "abc").kind(), "unparsable_number");
        assert_eq!(
            RowError::constraint(2, "Cost", "must be non-negative (got -1)").to_string(),
            "[Row 3] Cost must be non-negative (got -1)"
        );
        assert_eq!(RowError::schema(0, "x").kind(), "schema_mismatch");
    }
}
