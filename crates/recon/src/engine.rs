use crate::cell::SheetData;
use crate::company::process_company_rows;
use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::markup::apply_price_updates;
use crate::matcher::{duplicate_vendor_mpns, match_items, vendor_only_mpns};
use crate::model::{PricingMeta, PricingResult};
use crate::summary::compute_summary;
use crate::vendor::process_vendor_rows;

/// Run the full pass: normalize both sheets, match by MPN, reprice.
///
/// Row-level problems never fail the run; they are reported in
/// `vendor_errors` / `company_errors`. Only a vendor column that cannot be
/// located in `vendor.headers` is an error.
pub fn run(
    config: &PricingConfig,
    vendor: &SheetData,
    company: &SheetData,
    subclass: Option<&str>,
) -> Result<PricingResult, PricingError> {
    let mapping = config.vendor.columns.resolve(&vendor.headers)?;

    let vendor_batch = process_vendor_rows(&vendor.rows, &mapping);
    let company_batch = process_company_rows(&company.rows, &company.headers);

    let items = match_items(&company_batch.normalized, &vendor_batch.normalized);
    let markup = config.markup_for(subclass);
    let updated_rows = apply_price_updates(&items, &markup);

    let vendor_only = vendor_only_mpns(&company_batch.normalized, &vendor_batch.normalized);
    let duplicate_vendor_mpns = duplicate_vendor_mpns(&vendor_batch.normalized);
    let summary = compute_summary(&items);

    Ok(PricingResult {
        meta: PricingMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            multiplier: markup.multiplier,
            subclass: subclass.map(str::to_string),
        },
        summary,
        vendor_errors: vendor_batch.errors,
        company_errors: company_batch.errors,
        items,
        updated_rows,
        vendor_only,
        duplicate_vendor_mpns,
    })
}
