//! Error types for loading inputs and running the balance engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table} missing columns: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("initial_inventories must contain at least one row with 'year' and 'inventory_tu'")]
    EmptyInventorySeed,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
