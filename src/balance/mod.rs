//! Capacity balances and the final annual supply/demand panel

mod capacity;
mod panel;

pub use capacity::{
    combine_capacity, compute_capacity_balance, compute_conversion_balance, compute_enrichment_balance,
    CapacityBalanceRow, CapacityRow, Commodity,
};
pub use panel::{build_sd_panel, BalancePanelRow};
