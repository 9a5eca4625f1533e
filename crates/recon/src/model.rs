use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::RowError;
use crate::summary::MatchSummary;

// ---------------------------------------------------------------------------
// Column mapping (vendor sheets)
// ---------------------------------------------------------------------------

/// A source column: its display name and zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    pub index: usize,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self { name: name.into(), index }
    }
}

/// Semantic vendor field → source column. Produced by the column-selection step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(rename = "MPN", default, skip_serializing_if = "Option::is_none")]
    pub mpn: Option<ColumnRef>,
    #[serde(rename = "Cost", default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<ColumnRef>,
    #[serde(rename = "Unit Divider", default, skip_serializing_if = "Option::is_none")]
    pub unit_divider: Option<ColumnRef>,
}

impl ColumnMapping {
    /// True when nothing at all is mapped.
    pub fn is_empty(&self) -> bool {
        self.mpn.is_none() && self.cost.is_none() && self.unit_divider.is_none()
    }
}

// ---------------------------------------------------------------------------
// Batch output
// ---------------------------------------------------------------------------

/// A rejected row as reported by a batch: 1-based row, error kind, full message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub kind: &'static str,
    pub error: String,
}

impl From<&RowError> for RowIssue {
    fn from(err: &RowError) -> Self {
        Self {
            row: err.row(),
            kind: err.kind(),
            error: err.to_string(),
        }
    }
}

/// Result of a continue-on-error batch: accepted rows and per-row rejections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutput<T> {
    pub normalized: Vec<T>,
    pub errors: Vec<RowIssue>,
}

impl<T> Default for BatchOutput<T> {
    fn default() -> Self {
        Self {
            normalized: Vec::new(),
            errors: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized rows
// ---------------------------------------------------------------------------

/// A validated vendor price-list row.
///
/// `unit_cost` is derived from `cost / unit_divider` at construction and
/// cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVendorRow {
    #[serde(rename = "MPN")]
    mpn: String,
    #[serde(rename = "Cost")]
    cost: f64,
    #[serde(rename = "UnitDivider")]
    unit_divider: f64,
    #[serde(rename = "UnitCost")]
    unit_cost: f64,
}

impl NormalizedVendorRow {
    pub fn new(mpn: impl Into<String>, cost: f64, unit_divider: f64) -> Self {
        Self {
            mpn: mpn.into(),
            cost,
            unit_divider,
            unit_cost: cost / unit_divider,
        }
    }

    pub fn mpn(&self) -> &str {
        &self.mpn
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn unit_divider(&self) -> f64 {
        self.unit_divider
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }
}

/// A validated company catalog row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCompanyRow {
    #[serde(rename = "MPN")]
    pub mpn: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "PreferredVendor", skip_serializing_if = "Option::is_none")]
    pub preferred_vendor: Option<String>,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "UM", skip_serializing_if = "Option::is_none")]
    pub um: Option<String>,
}

/// Header row used when writing company rows back to spreadsheet form.
pub const COMPANY_HEADERS: [&str; 7] = [
    "MPN",
    "Item",
    "Description",
    "PreferredVendor",
    "Cost",
    "Price",
    "U/M",
];

impl NormalizedCompanyRow {
    /// Cells in `COMPANY_HEADERS` order; absent optionals become `Empty`.
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.mpn.as_str()),
            Cell::from(self.item.as_str()),
            Cell::from(self.description.clone()),
            Cell::from(self.preferred_vendor.clone()),
            Cell::Number(self.cost),
            Cell::Number(self.price),
            Cell::from(self.um.clone()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// One company row joined (or not) to a vendor row by MPN.
///
/// Built only through [`MatchedItem::matched`] / [`MatchedItem::orphaned`], so
/// `is_orphaned` always agrees with `vendor_row` being absent and
/// `cost_difference` is present exactly when a vendor row is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedItem {
    #[serde(rename = "MPN")]
    mpn: String,
    company_row: NormalizedCompanyRow,
    vendor_row: Option<NormalizedVendorRow>,
    is_orphaned: bool,
    cost_difference: Option<f64>,
}

impl MatchedItem {
    pub fn matched(company_row: NormalizedCompanyRow, vendor_row: NormalizedVendorRow) -> Self {
        let cost_difference = company_row.cost - vendor_row.cost();
        Self {
            mpn: company_row.mpn.clone(),
            company_row,
            vendor_row: Some(vendor_row),
            is_orphaned: false,
            cost_difference: Some(cost_difference),
        }
    }

    pub fn orphaned(company_row: NormalizedCompanyRow) -> Self {
        Self {
            mpn: company_row.mpn.clone(),
            company_row,
            vendor_row: None,
            is_orphaned: true,
            cost_difference: None,
        }
    }

    pub fn mpn(&self) -> &str {
        &self.mpn
    }

    pub fn company_row(&self) -> &NormalizedCompanyRow {
        &self.company_row
    }

    pub fn vendor_row(&self) -> Option<&NormalizedVendorRow> {
        self.vendor_row.as_ref()
    }

    pub fn is_orphaned(&self) -> bool {
        self.is_orphaned
    }

    /// `company cost − vendor cost`; `None` for orphaned items.
    pub fn cost_difference(&self) -> Option<f64> {
        self.cost_difference
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PricingMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
}

/// Output of one pricing run.
///
/// JSON keys: records that mirror sheet columns (normalized rows, and the
/// `MPN` of a [`MatchedItem`]) use the spreadsheet names (`MPN`, `UnitCost`,
/// `UM`); everything the run itself produces uses snake_case
/// (`company_row`, `is_orphaned`, `cost_difference`, `vendor_errors`).
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    pub meta: PricingMeta,
    pub summary: MatchSummary,
    pub vendor_errors: Vec<RowIssue>,
    pub company_errors: Vec<RowIssue>,
    pub items: Vec<MatchedItem>,
    pub updated_rows: Vec<NormalizedCompanyRow>,
    /// Vendor MPNs no company row references (dropped by the left join).
    pub vendor_only: Vec<String>,
    /// Vendor MPNs listed more than once, with their occurrence counts.
    pub duplicate_vendor_mpns: BTreeMap<String, usize>,
}

impl PricingResult {
    pub fn row_error_count(&self) -> usize {
        self.vendor_errors.len() + self.company_errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(mpn: &str, cost: f64) -> NormalizedCompanyRow {
        NormalizedCompanyRow {
            mpn: mpn.into(),
            item: "Widget".into(),
            description: None,
            preferred_vendor: Some("VendorA".into()),
            cost,
            price: 12.0,
            um: None,
        }
    }

    #[test]
    fn vendor_row_derives_unit_cost() {
        let row = NormalizedVendorRow::new("A", 24.0, 12.0);
        assert_eq!(row.unit_cost(), 2.0);
        assert_eq!(row.unit_divider(), 12.0);
    }

    #[test]
    fn matched_item_invariants() {
        let m = MatchedItem::matched(company("A", 8.0), NormalizedVendorRow::new("A", 10.0, 1.0));
        assert!(!m.is_orphaned());
        assert!(m.vendor_row().is_some());
        assert_eq!(m.cost_difference(), Some(-2.0));

        let o = MatchedItem::orphaned(company("B", 8.0));
        assert!(o.is_orphaned());
        assert!(o.vendor_row().is_none());
        assert_eq!(o.cost_difference(), None);
    }

    #[test]
    fn matched_item_json_keys() {
        let m = MatchedItem::matched(company("A", 8.0), NormalizedVendorRow::new("A", 10.0, 2.0));
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["MPN"], "A");
        assert_eq!(json["is_orphaned"], false);
        assert_eq!(json["cost_difference"], -2.0);
        assert_eq!(json["company_row"]["PreferredVendor"], "VendorA");
        assert_eq!(json["vendor_row"]["UnitCost"], 5.0);

        let json = serde_json::to_value(MatchedItem::orphaned(company("B", 8.0))).unwrap();
        assert_eq!(json["is_orphaned"], true);
        assert!(json["vendor_row"].is_null());
        assert!(json["cost_difference"].is_null());
    }

    #[test]
    fn company_row_cells_follow_header_order() {
        let cells = company("A", 8.0).to_cells();
        assert_eq!(cells.len(), COMPANY_HEADERS.len());
        assert_eq!(cells[0], Cell::from("A"));
        assert_eq!(cells[2], Cell::Empty);
        assert_eq!(cells[3], Cell::from("VendorA"));
        assert_eq!(cells[4], Cell::Number(8.0));
    }

    #[test]
    fn mapping_deserializes_spreadsheet_keys() {
        let mapping: ColumnMapping = serde_json::from_str(
            r#"{"MPN": {"name": "Part", "index": 0}, "Cost": {"name": "Cost", "index": 2}}"#,
        )
        .unwrap();
        assert_eq!(mapping.mpn, Some(ColumnRef::new("Part", 0)));
        assert!(mapping.unit_divider.is_none());
        assert!(!mapping.is_empty());
        assert!(ColumnMapping::default().is_empty());
    }
}
