use serde::Serialize;

use crate::model::MatchedItem;

/// Counts over a match run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub orphaned: usize,
    /// Vendor cost above the catalog cost.
    pub cost_increases: usize,
    /// Vendor cost below the catalog cost.
    pub cost_decreases: usize,
    pub cost_unchanged: usize,
}

/// Compute summary statistics from matched items.
pub fn compute_summary(items: &[MatchedItem]) -> MatchSummary {
    let mut summary = MatchSummary {
        total: items.len(),
        ..Default::default()
    };

    for item in items {
        match item.cost_difference() {
            None => summary.orphaned += 1,
            Some(diff) => {
                summary.matched += 1;
                // cost_difference is company − vendor
                if diff < 0.0 {
                    summary.cost_increases += 1;
                } else if diff > 0.0 {
                    summary.cost_decreases += 1;
                } else {
                    summary.cost_unchanged += 1;
                }
            }
        }
    }

    summary
}
