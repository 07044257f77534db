//! Supply-side input and output rows

use serde::{Deserialize, Serialize};

/// Mine master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mine {
    pub mine_id: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Production of one mine in one year (historical or scenario)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineProduction {
    pub mine_id: String,
    pub year: i32,
    #[serde(default)]
    pub production_tu: Option<f64>,
}

/// Dense mine × year production grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineYearProduction {
    pub mine_id: String,
    pub year: i32,
    pub production_tu: f64,
    pub country: Option<String>,
}

/// Annual primary (mine) supply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimarySupplyRow {
    pub year: i32,
    pub primary_supply_tu: f64,
}

/// Secondary supply input row; blank categories count as zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondarySupply {
    pub year: i32,
    #[serde(default)]
    pub secondary_supply_tu: Option<f64>,
    #[serde(default)]
    pub heu_tu: Option<f64>,
    #[serde(default)]
    pub underfeeding_tu: Option<f64>,
}

/// Annual secondary supply by category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondarySupplyRow {
    pub year: i32,
    pub secondary_supply_tu: f64,
    pub heu_tu: f64,
    pub underfeeding_tu: f64,
}
