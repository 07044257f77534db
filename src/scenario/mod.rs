//! Scenario inputs and batch runs

mod inputs;
mod runner;

pub use inputs::{
    rows_for, CapacityScenario, InventoryChange, MineProductionScenario, NewbuildProject, ReactorLifeOverride,
    ScenarioInputs, ScenarioKeyed, SecondarySupplyScenario,
};
pub use runner::{ScenarioResult, ScenarioRunner};
