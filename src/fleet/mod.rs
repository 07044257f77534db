//! Reactor fleet data: master records, generation history, fuel parameters

mod data;
mod params;

pub use data::{parse_date, Reactor, ReactorGeneration};
pub use params::{FuelParamTable, FuelParams, ResolvedFuel};
