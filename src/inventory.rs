//! Global inventory evolution
//!
//! A single running stock advanced one year at a time:
//! `stock(t) = stock(t-1) + primary(t) + secondary(t) - feed(t) + policy(t)`.
//! Each year depends on the previous year's computed stock, so years are
//! processed strictly in ascending order.

use crate::enrichment::FeedAndSwuRow;
use crate::error::{ModelError, ModelResult};
use crate::scenario::InventoryChange;
use crate::supply::{PrimarySupplyRow, SecondarySupplyRow};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Global inventory at the end of a year (tU)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub year: i32,
    pub inventory_tu: f64,
}

/// Flows into and out of the stock for one year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearFlows {
    pub primary_tu: f64,
    pub secondary_tu: f64,
    pub feed_tu: f64,
    pub policy_tu: f64,
}

impl YearFlows {
    pub fn net(&self) -> f64 {
        self.primary_tu + self.secondary_tu - self.feed_tu + self.policy_tu
    }
}

/// Advance the stock by one year
pub fn advance_stock(stock: f64, flows: &YearFlows) -> f64 {
    stock + flows.net()
}

/// Evolve inventories from the latest seed year through the last feed-demand year
///
/// Missing supply, demand or policy rows for a year count as zero. Several
/// policy rows for the same year are summed. Fails when the seed is empty.
pub fn evolve_inventories(
    initial_inventories: &[InventoryRow],
    primary_supply: &[PrimarySupplyRow],
    secondary_supply: &[SecondarySupplyRow],
    feed_demand: &[FeedAndSwuRow],
    inventory_changes: &[InventoryChange],
) -> ModelResult<Vec<InventoryRow>> {
    let seed = initial_inventories
        .iter()
        .max_by_key(|row| row.year)
        .ok_or(ModelError::EmptyInventorySeed)?;

    let Some(last_year) = feed_demand.iter().map(|row| row.year).max() else {
        return Ok(Vec::new());
    };

    let primary: HashMap<i32, f64> = primary_supply.iter().map(|r| (r.year, r.primary_supply_tu)).collect();
    let secondary: HashMap<i32, f64> =
        secondary_supply.iter().map(|r| (r.year, r.secondary_supply_tu)).collect();
    let feed: HashMap<i32, f64> = feed_demand.iter().map(|r| (r.year, r.feed_tu)).collect();
    let mut policy: HashMap<i32, f64> = HashMap::new();
    for change in inventory_changes {
        *policy.entry(change.year).or_insert(0.0) += change.inventory_change_tu.unwrap_or(0.0);
    }

    debug!(
        "Evolving inventory from {} tU at {} through {}",
        seed.inventory_tu, seed.year, last_year
    );

    let rows = (seed.year + 1..=last_year)
        .scan(seed.inventory_tu, |stock, year| {
            let flows = YearFlows {
                primary_tu: primary.get(&year).copied().unwrap_or(0.0),
                secondary_tu: secondary.get(&year).copied().unwrap_or(0.0),
                feed_tu: feed.get(&year).copied().unwrap_or(0.0),
                policy_tu: policy.get(&year).copied().unwrap_or(0.0),
            };
            *stock = advance_stock(*stock, &flows);
            Some(InventoryRow { year, inventory_tu: *stock })
        })
        .collect();

    Ok(rows)
}
