//! Reactor-year demand output

use serde::{Deserialize, Serialize};

/// Enriched product requirement for one reactor in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorDemandRow {
    pub reactor_id: String,
    pub year: i32,
    pub country: Option<String>,

    /// Generation in GW-years; absent when the reactor has no net capacity
    pub gw_years: Option<f64>,

    /// First-core charge (tU), non-zero only in the commissioning year
    pub first_core_tu: f64,

    /// Reload requirement (tU)
    pub reload_tu: f64,

    /// First core plus reload (tU of enriched product)
    pub total_tu: f64,

    pub product_assay: f64,
    pub tails_assay: f64,
}
