//! `pricesync-recon`: vendor price list / company catalog reconciliation engine.
//!
//! Pure engine crate: receives decoded sheets (`headers` + positional rows),
//! returns normalized rows, per-row errors, MPN matches and repriced catalog rows.
//! No CLI or IO dependencies.

pub mod cell;
pub mod company;
pub mod config;
pub mod engine;
pub mod error;
pub mod markup;
pub mod matcher;
pub mod model;
pub mod number;
pub mod pipeline;
pub mod summary;
pub mod vendor;

pub use cell::{Cell, SheetData};
pub use config::PricingConfig;
pub use engine::run;
pub use error::{PricingError, RowError};
pub use markup::{apply_markup, apply_price_updates, calculate_price, get_markup_for_subclass, Markup};
pub use matcher::{match_items, orphaned_items};
pub use model::{
    BatchOutput, ColumnMapping, ColumnRef, MatchedItem, NormalizedCompanyRow, NormalizedVendorRow,
    PricingResult, RowIssue,
};
pub use number::parse_number;
