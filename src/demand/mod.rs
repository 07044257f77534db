//! Reactor-driven enriched product demand

mod engine;
mod rows;

pub use engine::ReactorDemandEngine;
pub use rows::ReactorDemandRow;
