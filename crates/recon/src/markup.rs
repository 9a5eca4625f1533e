use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{MatchedItem, NormalizedCompanyRow};

/// Multiplicative pricing rule: `price = cost * multiplier` (1.5 = 50% over cost).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    pub multiplier: f64,
}

impl Markup {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    /// `percentage` over cost, e.g. 25 → multiplier 1.25.
    pub fn from_percentage(percentage: f64) -> Self {
        Self { multiplier: 1.0 + percentage / 100.0 }
    }
}

pub fn calculate_price(cost: f64, markup: &Markup) -> f64 {
    cost * markup.multiplier
}

/// Same as `calculate_price` with `Markup::from_percentage(percentage)`.
pub fn apply_markup(cost: f64, percentage: f64) -> f64 {
    cost * (1.0 + percentage / 100.0)
}

/// Exact-key lookup in `table`, falling back to `default`.
pub fn get_markup_for_subclass(
    subclass: &str,
    table: &HashMap<String, Markup>,
    default: Markup,
) -> Markup {
    table.get(subclass).copied().unwrap_or(default)
}

/// Reprice matched items from their vendor cost; orphaned items pass through.
///
/// For a matched item the returned row has `cost` set to the vendor's cost and
/// `price` to `calculate_price(vendor cost, markup)`. Same length and order as `items`.
pub fn apply_price_updates(items: &[MatchedItem], markup: &Markup) -> Vec<NormalizedCompanyRow> {
    items
        .iter()
        .map(|item| {
            let mut row = item.company_row().clone();
            if let Some(vendor) = item.vendor_row() {
                row.cost = vendor.cost();
                row.price = calculate_price(vendor.cost(), markup);
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_items;
    use crate::model::NormalizedVendorRow;

    fn company(mpn: &str, cost: f64, price: f64) -> NormalizedCompanyRow {
        NormalizedCompanyRow {
            mpn: mpn.into(),
            item: "Widget".into(),
            description: Some("desc".into()),
            preferred_vendor: None,
            cost,
            price,
            um: Some("EA".into()),
        }
    }

    #[test]
    fn price_from_multiplier_and_percentage() {
        assert_eq!(calculate_price(100.0, &Markup::new(1.5)), 150.0);
        assert_eq!(apply_markup(100.0, 25.0), 125.0);
        assert_eq!(
            calculate_price(80.0, &Markup::from_percentage(25.0)),
            apply_markup(80.0, 25.0)
        );
    }

    #[test]
    fn subclass_lookup_is_exact() {
        let mut table = HashMap::new();
        table.insert("FASTENERS".to_string(), Markup::new(2.0));
        let default = Markup::new(1.4);

        assert_eq!(get_markup_for_subclass("FASTENERS", &table, default), Markup::new(2.0));
        assert_eq!(get_markup_for_subclass("fasteners", &table, default), default);
        assert_eq!(get_markup_for_subclass("FASTENER", &table, default), default);
    }

    #[test]
    fn updates_matched_and_passes_orphans() {
        let companies = vec![company("X1", 8.0, 12.0), company("Z9", 3.0, 4.5)];
        let vendors = vec![NormalizedVendorRow::new("X1", 10.0, 1.0)];
        let items = match_items(&companies, &vendors);

        let updated = apply_price_updates(&items, &Markup::new(1.5));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].cost, 10.0);
        assert_eq!(updated[0].price, 15.0);
        assert_eq!(updated[0].description.as_deref(), Some("desc"));
        assert_eq!(updated[1], companies[1]);
    }
}
