//! Fuel Cycle Model - nuclear fuel-cycle supply/demand balance engine
//!
//! This library provides:
//! - Reactor-year enriched product demand from fleet and generation data
//! - Feed and SWU demand via the enrichment value function, with tails-assay optimization
//! - Conversion and enrichment capacity balances
//! - Primary (mine) and secondary supply panels
//! - Year-over-year global inventory evolution
//! - The annual supply/demand balance panel and a multi-scenario runner

pub mod balance;
pub mod config;
pub mod data;
pub mod demand;
pub mod enrichment;
pub mod error;
pub mod fleet;
pub mod inventory;
pub mod scenario;
pub mod supply;

// Re-export commonly used types
pub use balance::{BalancePanelRow, CapacityBalanceRow};
pub use config::{ModelConfig, TailsPolicy, YearRange};
pub use data::LoadedInputs;
pub use demand::{ReactorDemandEngine, ReactorDemandRow};
pub use enrichment::{EnrichmentParams, FeedAndSwuRow, PriceSeries};
pub use error::{ModelError, ModelResult};
pub use scenario::{ScenarioInputs, ScenarioResult, ScenarioRunner};
