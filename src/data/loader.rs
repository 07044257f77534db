//! CSV-based input loader
//!
//! Loads base tables from a data directory (default `data/`) and scenario
//! tables from its `scenarios/` subdirectory.

use crate::balance::CapacityRow;
use crate::enrichment::PriceSeries;
use crate::error::{ModelError, ModelResult};
use crate::fleet::{FuelParamTable, FuelParams, Reactor, ReactorGeneration};
use crate::inventory::InventoryRow;
use crate::scenario::{
    CapacityScenario, InventoryChange, MineProductionScenario, NewbuildProject, ReactorLifeOverride,
    ScenarioInputs, SecondarySupplyScenario,
};
use crate::supply::{Mine, MineProduction, SecondarySupply};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the input data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Subdirectory of the data directory holding scenario tables
pub const SCENARIO_DIR: &str = "scenarios";

/// A CSV table: its file name and the columns it must carry
///
/// Each required entry lists accepted header names; the first is reported
/// when none is present.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub file: &'static str,
    pub required: &'static [&'static [&'static str]],
}

const SCENARIO_KEY: &[&str] = &["scenario", "scenario_name"];

pub const REACTOR_MASTER: TableSpec = TableSpec {
    name: "reactor_master",
    file: "reactor_master.csv",
    required: &[
        &["reactor_id"],
        &["pris_id"],
        &["name", "reactor", "reactor_name"],
        &["country"],
        &["reactor_type", "type"],
        &["net_mwe", "net_capacity_mwe", "net_capacity"],
        &["commercial_operation_date", "op_date"],
        &["permanent_shutdown_date", "permanent_shutdown"],
        &["status"],
        &["fuel_type"],
    ],
};

pub const REACTOR_GENERATION: TableSpec = TableSpec {
    name: "reactor_generation",
    file: "reactor_generation.csv",
    required: &[
        &["reactor_id", "reactor", "plant"],
        &["year"],
        &["net_generation_gwh", "net_generation"],
        &["net_mwe"],
    ],
};

pub const FUEL_PARAMS: TableSpec = TableSpec {
    name: "reactor_fuel_params",
    file: "reactor_fuel_params.csv",
    required: &[&["reactor_type"]],
};

pub const MINES: TableSpec = TableSpec {
    name: "mines",
    file: "mines.csv",
    required: &[&["mine_id"]],
};

pub const MINE_PRODUCTION: TableSpec = TableSpec {
    name: "mine_production",
    file: "mine_production.csv",
    required: &[&["mine_id"], &["year"], &["production_tu"]],
};

pub const SECONDARY_SUPPLY: TableSpec = TableSpec {
    name: "secondary_supply",
    file: "secondary_supply.csv",
    required: &[&["year"]],
};

pub const INITIAL_INVENTORIES: TableSpec = TableSpec {
    name: "initial_inventories",
    file: "initial_inventories.csv",
    required: &[&["year"], &["inventory_tu"]],
};

pub const CONVERSION_CAPACITY: TableSpec = TableSpec {
    name: "conversion_capacity",
    file: "conversion_capacity.csv",
    required: &[&["year"], &["capacity", "conv_capacity_tu"]],
};

pub const ENRICHMENT_CAPACITY: TableSpec = TableSpec {
    name: "enrichment_capacity",
    file: "enrichment_capacity.csv",
    required: &[&["year"], &["capacity", "swu_capacity_swu"]],
};

pub const U3O8_PRICES: TableSpec = TableSpec {
    name: "u3o8_prices",
    file: "u3o8_prices.csv",
    required: &[&["year"], &["price", "u3o8_usd_lb"]],
};

pub const SWU_PRICES: TableSpec = TableSpec {
    name: "swu_prices",
    file: "swu_prices.csv",
    required: &[&["year"], &["price", "swu_usd"]],
};

pub const SCENARIO_REACTOR_LIFE: TableSpec = TableSpec {
    name: "reactor_life_scenarios",
    file: "reactor_life.csv",
    required: &[SCENARIO_KEY, &["reactor_id"], &["shutdown_year"]],
};

pub const SCENARIO_NEWBUILDS: TableSpec = TableSpec {
    name: "newbuild_projects",
    file: "newbuild_projects.csv",
    required: &[
        SCENARIO_KEY,
        &["reactor_id"],
        &["pris_id"],
        &["name"],
        &["country"],
        &["reactor_type"],
        &["net_mwe"],
        &["start_year"],
    ],
};

pub const SCENARIO_MINE_PRODUCTION: TableSpec = TableSpec {
    name: "mine_scenarios",
    file: "mine_production.csv",
    required: &[SCENARIO_KEY, &["mine_id"], &["year"], &["production_tu"]],
};

pub const SCENARIO_SECONDARY_SUPPLY: TableSpec = TableSpec {
    name: "secondary_scenarios",
    file: "secondary_supply.csv",
    required: &[SCENARIO_KEY, &["year"]],
};

pub const SCENARIO_INVENTORY_CHANGES: TableSpec = TableSpec {
    name: "inventory_scenarios",
    file: "inventory_changes.csv",
    required: &[SCENARIO_KEY, &["year"], &["inventory_change_tu"]],
};

pub const SCENARIO_CONVERSION_CAPACITY: TableSpec = TableSpec {
    name: "conv_scenarios",
    file: "conversion_capacity.csv",
    required: &[SCENARIO_KEY, &["year"], &["capacity", "conv_capacity_tu"]],
};

pub const SCENARIO_ENRICHMENT_CAPACITY: TableSpec = TableSpec {
    name: "enr_scenarios",
    file: "enrichment_capacity.csv",
    required: &[SCENARIO_KEY, &["year"], &["capacity", "swu_capacity_swu"]],
};

impl TableSpec {
    /// Read typed rows from any reader (e.g., string buffer), validating headers first
    pub fn read<T: DeserializeOwned, R: Read>(&self, reader: R) -> ModelResult<Vec<T>> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|accepted| !accepted.iter().any(|col| headers.iter().any(|h| h == *col)))
            .map(|accepted| accepted[0].to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ModelError::MissingColumns {
                table: self.name.to_string(),
                columns: missing,
            });
        }

        let mut rows = Vec::new();
        for result in csv_reader.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }

    /// Load the table from `dir`
    pub fn load<T: DeserializeOwned>(&self, dir: &Path) -> ModelResult<Vec<T>> {
        let file = File::open(dir.join(self.file))?;
        let rows: Vec<T> = self.read(file)?;
        debug!("Loaded {} rows from {}", rows.len(), self.name);
        Ok(rows)
    }

    /// Load the table from `dir`, or no rows when the file does not exist
    pub fn load_optional<T: DeserializeOwned>(&self, dir: &Path) -> ModelResult<Vec<T>> {
        if !dir.join(self.file).exists() {
            debug!("No {} table in {}; treated as empty", self.name, dir.display());
            return Ok(Vec::new());
        }
        self.load(dir)
    }
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    year: i32,
    #[serde(default, alias = "u3o8_usd_lb", alias = "swu_usd")]
    price: Option<f64>,
}

/// Read an annual price series; blank prices are skipped
pub fn read_price_series<R: Read>(spec: &TableSpec, reader: R) -> ModelResult<PriceSeries> {
    let rows: Vec<PriceRow> = spec.read(reader)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.price.map(|price| (row.year, price)))
        .collect())
}

fn load_price_series(spec: &TableSpec, dir: &Path) -> ModelResult<PriceSeries> {
    if !dir.join(spec.file).exists() {
        return Ok(PriceSeries::new());
    }
    read_price_series(spec, File::open(dir.join(spec.file))?)
}

/// All base inputs for a model run
#[derive(Debug, Clone, Default)]
pub struct LoadedInputs {
    pub reactors: Vec<Reactor>,
    pub generation: Vec<ReactorGeneration>,
    pub fuel_params: FuelParamTable,
    pub mines: Vec<Mine>,
    pub mine_production: Vec<MineProduction>,
    pub secondary_supply: Vec<SecondarySupply>,
    pub initial_inventories: Vec<InventoryRow>,
    pub conversion_capacity: Vec<CapacityRow>,
    pub enrichment_capacity: Vec<CapacityRow>,
    pub u_prices: PriceSeries,
    pub swu_prices: PriceSeries,
}

impl LoadedInputs {
    /// Load all inputs from the default path
    pub fn load_default() -> ModelResult<Self> {
        Self::load_from(Path::new(DEFAULT_DATA_PATH))
    }

    /// Load all inputs from a specific directory
    ///
    /// The reactor master, fuel parameters and inventory seed are required;
    /// every other table may be absent.
    pub fn load_from(path: &Path) -> ModelResult<Self> {
        let fuel_rows: Vec<FuelParams> = FUEL_PARAMS.load(path)?;
        let inputs = Self {
            reactors: REACTOR_MASTER.load(path)?,
            generation: REACTOR_GENERATION.load_optional(path)?,
            fuel_params: FuelParamTable::from_rows(fuel_rows),
            mines: MINES.load_optional(path)?,
            mine_production: MINE_PRODUCTION.load_optional(path)?,
            secondary_supply: SECONDARY_SUPPLY.load_optional(path)?,
            initial_inventories: INITIAL_INVENTORIES.load(path)?,
            conversion_capacity: CONVERSION_CAPACITY.load_optional(path)?,
            enrichment_capacity: ENRICHMENT_CAPACITY.load_optional(path)?,
            u_prices: load_price_series(&U3O8_PRICES, path)?,
            swu_prices: load_price_series(&SWU_PRICES, path)?,
        };
        info!(
            "Loaded {} reactors, {} fuel types, {} mines from {}",
            inputs.reactors.len(),
            inputs.fuel_params.len(),
            inputs.mines.len(),
            path.display()
        );
        Ok(inputs)
    }
}

/// Load every scenario table under `<path>/scenarios` for the named scenario
///
/// Rows for all scenarios are kept; stages select the named ones.
pub fn load_scenario(path: &Path, name: &str) -> ModelResult<ScenarioInputs> {
    let dir = path.join(SCENARIO_DIR);
    let reactor_life: Vec<ReactorLifeOverride> = SCENARIO_REACTOR_LIFE.load_optional(&dir)?;
    let newbuilds: Vec<NewbuildProject> = SCENARIO_NEWBUILDS.load_optional(&dir)?;
    let mine_production: Vec<MineProductionScenario> = SCENARIO_MINE_PRODUCTION.load_optional(&dir)?;
    let secondary_supply: Vec<SecondarySupplyScenario> = SCENARIO_SECONDARY_SUPPLY.load_optional(&dir)?;
    let inventory_changes: Vec<InventoryChange> = SCENARIO_INVENTORY_CHANGES.load_optional(&dir)?;
    let conversion_capacity: Vec<CapacityScenario> = SCENARIO_CONVERSION_CAPACITY.load_optional(&dir)?;
    let enrichment_capacity: Vec<CapacityScenario> = SCENARIO_ENRICHMENT_CAPACITY.load_optional(&dir)?;

    Ok(ScenarioInputs {
        name: name.to_string(),
        reactor_life,
        newbuilds,
        mine_production,
        secondary_supply,
        inventory_changes,
        conversion_capacity,
        enrichment_capacity,
    })
}
