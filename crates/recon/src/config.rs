use std::collections::HashMap;

use serde::Deserialize;

use crate::error::PricingError;
use crate::markup::{get_markup_for_subclass, Markup};
use crate::model::{ColumnMapping, ColumnRef};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub vendor: VendorConfig,
    pub markup: MarkupConfig,
}

fn default_name() -> String {
    "pricing".into()
}

// ---------------------------------------------------------------------------
// Vendor columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    pub columns: VendorColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorColumns {
    pub mpn: ColumnSpec,
    pub cost: ColumnSpec,
    #[serde(default)]
    pub unit_divider: Option<ColumnSpec>,
}

/// A configured column. Without `index`, the column is found by header name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub index: Option<usize>,
}

impl ColumnSpec {
    fn resolve(&self, headers: &[String]) -> Result<ColumnRef, PricingError> {
        let index = match self.index {
            Some(index) => index,
            None => headers.iter().position(|h| h == &self.name).ok_or_else(|| {
                PricingError::MissingColumn {
                    column: self.name.clone(),
                }
            })?,
        };
        Ok(ColumnRef::new(self.name.clone(), index))
    }
}

impl VendorColumns {
    /// Turn the configured columns into a positional mapping for `headers`.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnMapping, PricingError> {
        Ok(ColumnMapping {
            mpn: Some(self.mpn.resolve(headers)?),
            cost: Some(self.cost.resolve(headers)?),
            unit_divider: self
                .unit_divider
                .as_ref()
                .map(|spec| spec.resolve(headers))
                .transpose()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// Default markup (exactly one of `multiplier` / `percentage`) plus an
/// optional per-subclass table.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    #[serde(default)]
    pub multiplier: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub subclasses: HashMap<String, Markup>,
}

impl MarkupConfig {
    pub fn default_markup(&self) -> Markup {
        match (self.multiplier, self.percentage) {
            (Some(m), _) => Markup::new(m),
            (None, Some(p)) => Markup::from_percentage(p),
            (None, None) => Markup::new(1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl PricingConfig {
    pub fn from_toml(input: &str) -> Result<Self, PricingError> {
        let config: PricingConfig =
            toml::from_str(input).map_err(|e| PricingError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        let markup = &self.markup;
        match (markup.multiplier, markup.percentage) {
            (Some(_), Some(_)) => {
                return Err(PricingError::ConfigValidation(
                    "markup: set either multiplier or percentage, not both".into(),
                ))
            }
            (None, None) => {
                return Err(PricingError::ConfigValidation(
                    "markup: one of multiplier or percentage is required".into(),
                ))
            }
            _ => {}
        }

        check_multiplier("markup", markup.default_markup().multiplier)?;
        for (subclass, m) in &markup.subclasses {
            check_multiplier(&format!("markup.subclasses.{subclass}"), m.multiplier)?;
        }

        let columns = &self.vendor.columns;
        let specs = [Some(&columns.mpn), Some(&columns.cost), columns.unit_divider.as_ref()];
        for spec in specs.into_iter().flatten() {
            if spec.name.trim().is_empty() && spec.index.is_none() {
                return Err(PricingError::ConfigValidation(
                    "vendor column needs a name or an index".into(),
                ));
            }
        }

        Ok(())
    }

    /// Markup for `subclass`, or the default markup when none is given or listed.
    pub fn markup_for(&self, subclass: Option<&str>) -> Markup {
        let default = self.markup.default_markup();
        match subclass {
            Some(s) => get_markup_for_subclass(s, &self.markup.subclasses, default),
            None => default,
        }
    }
}

fn check_multiplier(what: &str, multiplier: f64) -> Result<(), PricingError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(PricingError::ConfigValidation(format!(
            "{what}: multiplier must be a positive number, got {multiplier}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
