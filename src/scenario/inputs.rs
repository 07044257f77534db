//! Scenario input contract
//!
//! Every scenario table carries a required `scenario` key (CSV files may name
//! the column `scenario_name`). Rows are selected by exact match on the
//! scenario name before they reach a stage.

use crate::balance::CapacityRow;
use crate::fleet::Reactor;
use crate::supply::{MineProduction, SecondarySupply};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows that belong to a named scenario
pub trait ScenarioKeyed {
    fn scenario(&self) -> &str;
}

/// Select the rows keyed to `name`, preserving order
pub fn rows_for<'a, T: ScenarioKeyed>(rows: &'a [T], name: &'a str) -> impl Iterator<Item = &'a T> + 'a {
    rows.iter().filter(move |r| r.scenario() == name)
}

macro_rules! scenario_keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl ScenarioKeyed for $ty {
            fn scenario(&self) -> &str {
                &self.scenario
            }
        })*
    };
}

/// Life extension or early closure of an existing reactor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorLifeOverride {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub reactor_id: String,
    /// Blank keeps the reactor's recorded shutdown
    #[serde(default)]
    pub shutdown_year: Option<i32>,
}

/// Planned reactor that enters the fleet under a scenario
///
/// Loaded tables must carry every reactor column plus `start_year`, even
/// where individual values are blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewbuildProject {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub reactor_id: String,
    pub pris_id: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub reactor_type: Option<String>,
    pub net_mwe: Option<f64>,
    pub start_year: i32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
}

impl NewbuildProject {
    /// Synthesize a fleet reactor starting on January 1 of `start_year` with no shutdown
    pub fn to_reactor(&self) -> Reactor {
        Reactor {
            reactor_id: self.reactor_id.clone(),
            pris_id: self.pris_id.clone(),
            name: self.name.clone(),
            country: self.country.clone(),
            reactor_type: self.reactor_type.clone(),
            net_mwe: self.net_mwe,
            commercial_operation_date: NaiveDate::from_ymd_opt(self.start_year, 1, 1),
            permanent_shutdown_date: None,
            status: Some(self.status.clone().unwrap_or_else(|| "Planned".to_string())),
            fuel_type: Some(self.fuel_type.clone().unwrap_or_else(|| "UO2".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineProductionScenario {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub mine_id: String,
    pub year: i32,
    #[serde(default)]
    pub production_tu: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondarySupplyScenario {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub year: i32,
    #[serde(default)]
    pub secondary_supply_tu: Option<f64>,
    #[serde(default)]
    pub heu_tu: Option<f64>,
    #[serde(default)]
    pub underfeeding_tu: Option<f64>,
}

/// Policy-driven inventory build (positive) or drawdown (negative)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryChange {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub year: i32,
    #[serde(default)]
    pub inventory_change_tu: Option<f64>,
}

/// Additional announced conversion or enrichment capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityScenario {
    #[serde(alias = "scenario_name")]
    pub scenario: String,
    pub year: i32,
    #[serde(default, alias = "conv_capacity_tu", alias = "swu_capacity_swu")]
    pub capacity: Option<f64>,
}

scenario_keyed!(
    ReactorLifeOverride,
    NewbuildProject,
    MineProductionScenario,
    SecondarySupplyScenario,
    InventoryChange,
    CapacityScenario,
);

/// All scenario tables for one model run
#[derive(Debug, Clone, Default)]
pub struct ScenarioInputs {
    /// Scenario key every table is filtered on
    pub name: String,
    pub reactor_life: Vec<ReactorLifeOverride>,
    pub newbuilds: Vec<NewbuildProject>,
    pub mine_production: Vec<MineProductionScenario>,
    pub secondary_supply: Vec<SecondarySupplyScenario>,
    pub inventory_changes: Vec<InventoryChange>,
    pub conversion_capacity: Vec<CapacityScenario>,
    pub enrichment_capacity: Vec<CapacityScenario>,
}

impl ScenarioInputs {
    /// Scenario with no overrides
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mine_rows(&self) -> Vec<MineProduction> {
        rows_for(&self.mine_production, &self.name)
            .map(|r| MineProduction {
                mine_id: r.mine_id.clone(),
                year: r.year,
                production_tu: r.production_tu,
            })
            .collect()
    }

    pub fn secondary_rows(&self) -> Vec<SecondarySupply> {
        rows_for(&self.secondary_supply, &self.name)
            .map(|r| SecondarySupply {
                year: r.year,
                secondary_supply_tu: r.secondary_supply_tu,
                heu_tu: r.heu_tu,
                underfeeding_tu: r.underfeeding_tu,
            })
            .collect()
    }

    pub fn inventory_changes(&self) -> Vec<InventoryChange> {
        rows_for(&self.inventory_changes, &self.name).cloned().collect()
    }

    pub fn conversion_rows(&self) -> Vec<CapacityRow> {
        Self::capacity_rows(&self.conversion_capacity, &self.name)
    }

    pub fn enrichment_rows(&self) -> Vec<CapacityRow> {
        Self::capacity_rows(&self.enrichment_capacity, &self.name)
    }

    fn capacity_rows(rows: &[CapacityScenario], name: &str) -> Vec<CapacityRow> {
        rows_for(rows, name)
            .map(|r| CapacityRow {
                year: r.year,
                capacity: r.capacity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(scenario: &str, year: i32, tu: f64) -> InventoryChange {
        InventoryChange {
            scenario: scenario.to_string(),
            year,
            inventory_change_tu: Some(tu),
        }
    }

    #[test]
    fn test_rows_for_filters_by_name() {
        let rows = vec![change("base", 2025, 1.0), change("high", 2025, 2.0), change("base", 2026, 3.0)];
        let base: Vec<_> = rows_for(&rows, "base").map(|r| r.year).collect();
        assert_eq!(base, vec![2025, 2026]);
        assert_eq!(rows_for(&rows, "low").count(), 0);
    }

    #[test]
    fn test_newbuild_to_reactor() {
        let project = NewbuildProject {
            scenario: "high".to_string(),
            reactor_id: "NB-1".to_string(),
            pris_id: None,
            name: Some("New Unit".to_string()),
            country: Some("PL".to_string()),
            reactor_type: Some("PWR".to_string()),
            net_mwe: Some(1100.0),
            start_year: 2033,
            status: None,
            fuel_type: None,
        };

        let reactor = project.to_reactor();
        assert_eq!(reactor.start_year(), Some(2033));
        assert_eq!(reactor.shutdown_year(), None);
        assert_eq!(reactor.status.as_deref(), Some("Planned"));
        assert_eq!(reactor.fuel_type.as_deref(), Some("UO2"));
    }

    #[test]
    fn test_scenario_inputs_conversion() {
        let mut inputs = ScenarioInputs::named("high");
        inputs.conversion_capacity = vec![
            CapacityScenario { scenario: "high".to_string(), year: 2030, capacity: Some(5000.0) },
            CapacityScenario { scenario: "base".to_string(), year: 2030, capacity: Some(1.0) },
        ];

        let rows = inputs.conversion_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].capacity, Some(5000.0));
        assert!(inputs.enrichment_rows().is_empty());
    }
}
