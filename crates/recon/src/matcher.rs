use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{MatchedItem, NormalizedCompanyRow, NormalizedVendorRow};

/// Left-join company rows to vendor rows by exact MPN.
///
/// Output has one item per company row, in company order. When an MPN occurs
/// more than once among the vendor rows the last occurrence wins. Vendor rows
/// no company row references are not part of the output (see [`vendor_only_mpns`]).
pub fn match_items(
    company_rows: &[NormalizedCompanyRow],
    vendor_rows: &[NormalizedVendorRow],
) -> Vec<MatchedItem> {
    let mut lookup: HashMap<&str, &NormalizedVendorRow> = HashMap::with_capacity(vendor_rows.len());
    let mut shadowed = 0usize;
    for row in vendor_rows {
        if lookup.insert(row.mpn(), row).is_some() {
            shadowed += 1;
        }
    }
    if shadowed > 0 {
        log::warn!("{shadowed} vendor row(s) shadowed by a later row with the same MPN");
    }

    let items: Vec<MatchedItem> = company_rows
        .iter()
        .map(|company| match lookup.get(company.mpn.as_str()) {
            Some(vendor) => MatchedItem::matched(company.clone(), (*vendor).clone()),
            None => MatchedItem::orphaned(company.clone()),
        })
        .collect();

    let orphaned = items.iter().filter(|i| i.is_orphaned()).count();
    log::info!(
        "matched {} of {} company rows ({} orphaned)",
        items.len() - orphaned,
        items.len(),
        orphaned,
    );
    items
}

/// Items with no vendor row.
pub fn orphaned_items(items: &[MatchedItem]) -> Vec<&MatchedItem> {
    items.iter().filter(|i| i.is_orphaned()).collect()
}

/// Items joined to a vendor row.
pub fn matched_items(items: &[MatchedItem]) -> Vec<&MatchedItem> {
    items.iter().filter(|i| !i.is_orphaned()).collect()
}

/// Vendor MPNs that no company row references, first-seen order, no repeats.
pub fn vendor_only_mpns(
    company_rows: &[NormalizedCompanyRow],
    vendor_rows: &[NormalizedVendorRow],
) -> Vec<String> {
    let company: HashSet<&str> = company_rows.iter().map(|r| r.mpn.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    vendor_rows
        .iter()
        .map(|r| r.mpn())
        .filter(|mpn| !company.contains(mpn) && seen.insert(*mpn))
        .map(str::to_string)
        .collect()
}

/// MPNs occurring more than once among vendor rows, with their counts.
pub fn duplicate_vendor_mpns(vendor_rows: &[NormalizedVendorRow]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in vendor_rows {
        *counts.entry(row.mpn().to_string()).or_insert(0) += 1;
    }
    counts.retain(|_, n| *n > 1);
    counts
}
