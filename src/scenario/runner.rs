//! Scenario runner for supply/demand balance runs
//!
//! Holds the base inputs once, then runs any number of scenarios over them
//! without re-reading CSV files.

use crate::balance::{
    build_sd_panel, compute_conversion_balance, compute_enrichment_balance, BalancePanelRow,
    CapacityBalanceRow,
};
use crate::config::{ModelConfig, YearRange};
use crate::data::LoadedInputs;
use crate::demand::{ReactorDemandEngine, ReactorDemandRow};
use crate::enrichment::{compute_feed_and_swu_demand, FeedAndSwuRow};
use crate::error::ModelResult;
use crate::inventory::{evolve_inventories, InventoryRow};
use crate::supply::{
    build_primary_supply, build_secondary_supply, MineYearProduction, PrimarySupplyRow, SecondarySupplyRow,
};
use super::inputs::ScenarioInputs;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Every table produced by one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub range: YearRange,
    pub reactor_demand: Vec<ReactorDemandRow>,
    pub feed_and_swu: Vec<FeedAndSwuRow>,
    pub conversion_balance: Vec<CapacityBalanceRow>,
    pub enrichment_balance: Vec<CapacityBalanceRow>,
    pub mine_production: Vec<MineYearProduction>,
    pub primary_supply: Vec<PrimarySupplyRow>,
    pub secondary_supply: Vec<SecondarySupplyRow>,
    pub inventories: Vec<InventoryRow>,
    pub sd_panel: Vec<BalancePanelRow>,
}

/// Pre-loaded runner for scenario batches
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data"), ModelConfig::default())?;
/// let range = YearRange::new(2024, 2040)?;
///
/// for name in ["base", "high", "low"] {
///     let scenario = load_scenario(Path::new("data"), name)?;
///     let result = runner.run(&scenario, range)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ModelConfig,
    inputs: LoadedInputs,
}

impl ScenarioRunner {
    /// Create runner with pre-built inputs
    pub fn new(config: ModelConfig, inputs: LoadedInputs) -> Self {
        Self { config, inputs }
    }

    /// Create runner by loading inputs from a data directory
    pub fn from_csv_path(path: &Path, config: ModelConfig) -> ModelResult<Self> {
        Ok(Self::new(config, LoadedInputs::load_from(path)?))
    }

    /// Run every stage for one scenario
    pub fn run(&self, scenario: &ScenarioInputs, range: YearRange) -> ModelResult<ScenarioResult> {
        let inputs = &self.inputs;

        let engine = ReactorDemandEngine::new(self.config.clone(), inputs.fuel_params.clone());
        let reactor_demand = engine.compute_reactor_demand(
            &inputs.reactors,
            &inputs.generation,
            &scenario.reactor_life,
            &scenario.newbuilds,
            range,
            &scenario.name,
        );

        let feed_and_swu =
            compute_feed_and_swu_demand(&reactor_demand, &inputs.u_prices, &inputs.swu_prices, &self.config);

        let conversion_balance = compute_conversion_balance(
            &feed_and_swu,
            &inputs.conversion_capacity,
            &scenario.conversion_rows(),
            range,
        );
        let enrichment_balance = compute_enrichment_balance(
            &feed_and_swu,
            &inputs.enrichment_capacity,
            &scenario.enrichment_rows(),
            range,
        );

        let (mine_production, primary_supply) =
            build_primary_supply(&inputs.mines, &inputs.mine_production, &scenario.mine_rows(), range);
        let secondary_supply = build_secondary_supply(&inputs.secondary_supply, &scenario.secondary_rows(), range);

        let inventories = evolve_inventories(
            &inputs.initial_inventories,
            &primary_supply,
            &secondary_supply,
            &feed_and_swu,
            &scenario.inventory_changes(),
        )?;

        let sd_panel = build_sd_panel(
            &feed_and_swu,
            &primary_supply,
            &secondary_supply,
            &inventories,
            Some(conversion_balance.as_slice()),
            Some(enrichment_balance.as_slice()),
        );

        info!(
            "Scenario '{}' {}-{}: {} reactor-years, {} panel years",
            scenario.name,
            range.start,
            range.end,
            reactor_demand.len(),
            sd_panel.len()
        );

        Ok(ScenarioResult {
            scenario_name: scenario.name.clone(),
            range,
            reactor_demand,
            feed_and_swu,
            conversion_balance,
            enrichment_balance,
            mine_production,
            primary_supply,
            secondary_supply,
            inventories,
            sd_panel,
        })
    }

    /// Run several scenarios over the same inputs and range
    pub fn run_scenarios(&self, scenarios: &[ScenarioInputs], range: YearRange) -> ModelResult<Vec<ScenarioResult>> {
        scenarios.iter().map(|scenario| self.run(scenario, range)).collect()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Get mutable reference to the config for sensitivity runs
    pub fn config_mut(&mut self) -> &mut ModelConfig {
        &mut self.config
    }

    pub fn inputs(&self) -> &LoadedInputs {
        &self.inputs
    }
}
