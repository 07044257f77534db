//! Fuel parameters by reactor type

use crate::config::ModelConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the reactor fuel parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelParams {
    pub reactor_type: String,
    #[serde(default)]
    pub default_capacity_factor: Option<f64>,
    #[serde(default)]
    pub first_core_tu_per_gwe: Option<f64>,
    #[serde(default)]
    pub reload_tu_per_gwe_year: Option<f64>,
    #[serde(default)]
    pub product_assay: Option<f64>,
    #[serde(default)]
    pub tails_assay: Option<f64>,
}

/// Fuel parameters with every gap filled from the model defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFuel {
    pub capacity_factor: f64,
    pub first_core_tu_per_gwe: f64,
    pub reload_tu_per_gwe_year: f64,
    pub product_assay: f64,
    pub tails_assay: f64,
}

/// Lookup of fuel parameters keyed by reactor type
#[derive(Debug, Clone, Default)]
pub struct FuelParamTable {
    by_type: HashMap<String, FuelParams>,
}

impl FuelParamTable {
    /// Build from rows; the first row for a reactor type wins
    pub fn from_rows(rows: Vec<FuelParams>) -> Self {
        let mut by_type = HashMap::new();
        for row in rows {
            by_type.entry(row.reactor_type.clone()).or_insert(row);
        }
        Self { by_type }
    }

    pub fn get(&self, reactor_type: &str) -> Option<&FuelParams> {
        self.by_type.get(reactor_type)
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Resolve parameters for a reactor type, falling back per field
    ///
    /// Unknown types and missing or NaN values take the configured defaults;
    /// first-core and reload factors default to zero.
    pub fn resolve(&self, reactor_type: Option<&str>, config: &ModelConfig) -> ResolvedFuel {
        let params = reactor_type.and_then(|t| self.get(t));
        let pick = |value: Option<f64>, default: f64| match value {
            Some(v) if !v.is_nan() => v,
            _ => default,
        };

        ResolvedFuel {
            capacity_factor: pick(
                params.and_then(|p| p.default_capacity_factor),
                config.default_capacity_factor,
            ),
            first_core_tu_per_gwe: pick(params.and_then(|p| p.first_core_tu_per_gwe), 0.0),
            reload_tu_per_gwe_year: pick(params.and_then(|p| p.reload_tu_per_gwe_year), 0.0),
            product_assay: pick(
                params.and_then(|p| p.product_assay),
                config.default_product_assay,
            ),
            tails_assay: pick(params.and_then(|p| p.tails_assay), config.default_tails_assay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pwr() -> FuelParams {
        FuelParams {
            reactor_type: "PWR".to_string(),
            default_capacity_factor: Some(0.9),
            first_core_tu_per_gwe: Some(75.0),
            reload_tu_per_gwe_year: Some(20.0),
            product_assay: Some(0.0495),
            tails_assay: None,
        }
    }

    #[test]
    fn test_resolve_known_type() {
        let table = FuelParamTable::from_rows(vec![pwr()]);
        let fuel = table.resolve(Some("PWR"), &ModelConfig::default());

        assert_eq!(fuel.capacity_factor, 0.9);
        assert_eq!(fuel.first_core_tu_per_gwe, 75.0);
        assert_eq!(fuel.reload_tu_per_gwe_year, 20.0);
        assert_eq!(fuel.product_assay, 0.0495);
        // Missing column falls back to the model default
        assert_eq!(fuel.tails_assay, 0.0025);
    }

    #[test]
    fn test_resolve_unknown_type_uses_defaults() {
        let table = FuelParamTable::from_rows(vec![pwr()]);
        let config = ModelConfig::default();

        for fuel in [table.resolve(Some("BWR"), &config), table.resolve(None, &config)] {
            assert_eq!(fuel.capacity_factor, 0.85);
            assert_eq!(fuel.first_core_tu_per_gwe, 0.0);
            assert_eq!(fuel.reload_tu_per_gwe_year, 0.0);
            assert_eq!(fuel.product_assay, 0.045);
            assert_eq!(fuel.tails_assay, 0.0025);
        }
    }

    #[test]
    fn test_first_row_wins() {
        let mut second = pwr();
        second.reload_tu_per_gwe_year = Some(99.0);
        let table = FuelParamTable::from_rows(vec![pwr(), second]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("PWR").unwrap().reload_tu_per_gwe_year, Some(20.0));
    }
}
