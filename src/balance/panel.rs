//! Annual supply/demand balance panel

use crate::enrichment::FeedAndSwuRow;
use crate::inventory::InventoryRow;
use crate::supply::{PrimarySupplyRow, SecondarySupplyRow};
use super::capacity::{ratio, CapacityBalanceRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One year of the final supply/demand panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePanelRow {
    pub year: i32,
    pub feed_tu: f64,
    pub primary_supply_tu: f64,
    pub secondary_supply_tu: f64,
    pub total_supply_tu: f64,
    /// total supply - feed demand
    pub balance_tu: f64,
    /// total supply / feed demand
    pub balance_ratio: f64,
    pub inventory_tu: f64,
    /// Inventory expressed in years of feed demand
    pub inventory_years: f64,
    pub conv_balance_ratio: Option<f64>,
    pub conv_spare_tu: Option<f64>,
    pub swu_balance_ratio: Option<f64>,
    pub swu_spare_swu: Option<f64>,
}

/// Join feed demand, supply, inventories and capacity balances by year
///
/// One row per feed-demand year, sorted ascending. Missing supply counts as
/// zero. Missing inventory carries the last known stock forward (zero before
/// any stock is known). Capacity columns are filled only when the matching
/// balance is supplied and non-empty.
pub fn build_sd_panel(
    feed_demand: &[FeedAndSwuRow],
    primary_supply: &[PrimarySupplyRow],
    secondary_supply: &[SecondarySupplyRow],
    inventories: &[InventoryRow],
    conversion_balance: Option<&[CapacityBalanceRow]>,
    enrichment_balance: Option<&[CapacityBalanceRow]>,
) -> Vec<BalancePanelRow> {
    let primary: HashMap<i32, f64> = primary_supply.iter().map(|r| (r.year, r.primary_supply_tu)).collect();
    let secondary: HashMap<i32, f64> =
        secondary_supply.iter().map(|r| (r.year, r.secondary_supply_tu)).collect();
    let inventory: HashMap<i32, f64> = inventories.iter().map(|r| (r.year, r.inventory_tu)).collect();
    let conversion = balance_lookup(conversion_balance);
    let enrichment = balance_lookup(enrichment_balance);

    let mut demand: Vec<&FeedAndSwuRow> = feed_demand.iter().collect();
    demand.sort_by_key(|r| r.year);

    let mut carried_inventory = 0.0;
    demand
        .into_iter()
        .map(|row| {
            let year = row.year;
            let primary_supply_tu = primary.get(&year).copied().unwrap_or(0.0);
            let secondary_supply_tu = secondary.get(&year).copied().unwrap_or(0.0);
            let total_supply_tu = primary_supply_tu + secondary_supply_tu;

            if let Some(stock) = inventory.get(&year) {
                carried_inventory = *stock;
            }

            let conv = conversion.as_ref().and_then(|m| m.get(&year));
            let enr = enrichment.as_ref().and_then(|m| m.get(&year));

            BalancePanelRow {
                year,
                feed_tu: row.feed_tu,
                primary_supply_tu,
                secondary_supply_tu,
                total_supply_tu,
                balance_tu: total_supply_tu - row.feed_tu,
                balance_ratio: ratio(total_supply_tu, row.feed_tu, "supply balance", year),
                inventory_tu: carried_inventory,
                inventory_years: ratio(carried_inventory, row.feed_tu, "inventory cover", year),
                conv_balance_ratio: conv.map(|b| b.balance_ratio),
                conv_spare_tu: conv.map(|b| b.spare),
                swu_balance_ratio: enr.map(|b| b.balance_ratio),
                swu_spare_swu: enr.map(|b| b.spare),
            }
        })
        .collect()
}

fn balance_lookup(rows: Option<&[CapacityBalanceRow]>) -> Option<HashMap<i32, &CapacityBalanceRow>> {
    rows.filter(|r| !r.is_empty())
        .map(|r| r.iter().map(|b| (b.year, b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Commodity;
    use approx::assert_relative_eq;

    fn feed(year: i32, feed_tu: f64) -> FeedAndSwuRow {
        FeedAndSwuRow { year, product_tu: 0.0, feed_tu, swu_demand_swu: 0.0, tails_assay_used: 0.0025 }
    }

    #[test]
    fn test_single_year_balance() {
        let panel = build_sd_panel(
            &[feed(2025, 100.0)],
            &[PrimarySupplyRow { year: 2025, primary_supply_tu: 60.0 }],
            &[SecondarySupplyRow { year: 2025, secondary_supply_tu: 20.0, heu_tu: 0.0, underfeeding_tu: 0.0 }],
            &[],
            None,
            None,
        );

        assert_eq!(panel.len(), 1);
        let row = &panel[0];
        assert_relative_eq!(row.total_supply_tu, 80.0);
        assert_relative_eq!(row.balance_tu, -20.0);
        assert_relative_eq!(row.balance_ratio, 0.8);
        assert_eq!(row.inventory_tu, 0.0);
        assert_eq!(row.conv_balance_ratio, None);
    }

    #[test]
    fn test_sorted_with_zero_filled_supply() {
        let panel = build_sd_panel(
            &[feed(2027, 10.0), feed(2025, 10.0), feed(2026, 10.0)],
            &[PrimarySupplyRow { year: 2026, primary_supply_tu: 5.0 }],
            &[],
            &[],
            None,
            None,
        );

        assert_eq!(panel.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2025, 2026, 2027]);
        assert_eq!(panel[0].primary_supply_tu, 0.0);
        assert_relative_eq!(panel[1].balance_ratio, 0.5);
    }

    #[test]
    fn test_inventory_forward_filled() {
        let inventories = vec![
            InventoryRow { year: 2026, inventory_tu: 200.0 },
            InventoryRow { year: 2028, inventory_tu: 150.0 },
        ];
        let demand: Vec<_> = (2025..=2029).map(|y| feed(y, 50.0)).collect();
        let panel = build_sd_panel(&demand, &[], &[], &inventories, None, None);

        let stocks: Vec<f64> = panel.iter().map(|r| r.inventory_tu).collect();
        assert_eq!(stocks, vec![0.0, 200.0, 200.0, 150.0, 150.0]);
        assert_relative_eq!(panel[2].inventory_years, 4.0);
    }

    #[test]
    fn test_capacity_columns_merged() {
        let conv = vec![CapacityBalanceRow {
            year: 2025,
            commodity: Commodity::Conversion,
            demand: 100.0,
            capacity: 120.0,
            balance_ratio: 1.2,
            spare: 20.0,
        }];
        let panel = build_sd_panel(
            &[feed(2025, 100.0), feed(2026, 100.0)],
            &[],
            &[],
            &[],
            Some(&conv[..]),
            Some(&[][..]),
        );

        assert_eq!(panel[0].conv_balance_ratio, Some(1.2));
        assert_eq!(panel[0].conv_spare_tu, Some(20.0));
        assert_eq!(panel[1].conv_balance_ratio, None);
        assert_eq!(panel[0].swu_balance_ratio, None);
    }
}
