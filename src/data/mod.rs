//! Tabular input loading

pub mod loader;

pub use loader::{load_scenario, read_price_series, LoadedInputs, TableSpec, DEFAULT_DATA_PATH};
