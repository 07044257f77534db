//! Conversion and enrichment capacity balances

use crate::config::YearRange;
use crate::enrichment::FeedAndSwuRow;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fuel-cycle service whose capacity is balanced against demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commodity {
    /// UF6 conversion, tU
    Conversion,
    /// Enrichment, SWU
    Enrichment,
}

impl Commodity {
    pub fn label(&self) -> &'static str {
        match self {
            Commodity::Conversion => "conversion",
            Commodity::Enrichment => "enrichment",
        }
    }
}

/// Annual capacity (baseline or scenario addition)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRow {
    pub year: i32,
    #[serde(default, alias = "conv_capacity_tu", alias = "swu_capacity_swu")]
    pub capacity: Option<f64>,
}

/// Capacity against demand for one commodity-year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityBalanceRow {
    pub year: i32,
    pub commodity: Commodity,
    pub demand: f64,
    pub capacity: f64,
    /// capacity / demand; infinite or NaN when demand is zero
    pub balance_ratio: f64,
    /// capacity - demand
    pub spare: f64,
}

/// Divide, warning when the denominator is zero
///
/// The IEEE result (infinity or NaN) is returned unchanged.
pub(crate) fn ratio(numerator: f64, denominator: f64, what: &str, year: i32) -> f64 {
    if denominator == 0.0 {
        warn!("{}: zero denominator for {} ratio", year, what);
    }
    numerator / denominator
}

/// Baseline plus scenario capacity by year within `range`
///
/// Scenario rows are additional announced capacity and add to the baseline.
pub fn combine_capacity(
    baseline: &[CapacityRow],
    scenario: &[CapacityRow],
    range: YearRange,
) -> BTreeMap<i32, f64> {
    let mut by_year = BTreeMap::new();
    for row in baseline.iter().chain(scenario).filter(|r| range.contains(r.year)) {
        *by_year.entry(row.year).or_insert(0.0) += row.capacity.unwrap_or(0.0);
    }
    by_year
}

/// Balance annual demand `(year, demand)` against capacity for one commodity
///
/// Only demand years inside `range` are kept; years without capacity get zero.
pub fn compute_capacity_balance(
    commodity: Commodity,
    demand: impl IntoIterator<Item = (i32, f64)>,
    baseline: &[CapacityRow],
    scenario: &[CapacityRow],
    range: YearRange,
) -> Vec<CapacityBalanceRow> {
    let capacity = combine_capacity(baseline, scenario, range);

    demand
        .into_iter()
        .filter(|(year, _)| range.contains(*year))
        .map(|(year, demand)| {
            let cap = capacity.get(&year).copied().unwrap_or(0.0);
            CapacityBalanceRow {
                year,
                commodity,
                demand,
                capacity: cap,
                balance_ratio: ratio(cap, demand, commodity.label(), year),
                spare: cap - demand,
            }
        })
        .collect()
}

/// Compare UF6 (feed) demand to conversion capacity
pub fn compute_conversion_balance(
    feed_demand: &[FeedAndSwuRow],
    conversion_capacity: &[CapacityRow],
    scenario_capacity: &[CapacityRow],
    range: YearRange,
) -> Vec<CapacityBalanceRow> {
    compute_capacity_balance(
        Commodity::Conversion,
        feed_demand.iter().map(|r| (r.year, r.feed_tu)),
        conversion_capacity,
        scenario_capacity,
        range,
    )
}

/// Compare SWU demand to enrichment capacity
pub fn compute_enrichment_balance(
    swu_demand: &[FeedAndSwuRow],
    enrichment_capacity: &[CapacityRow],
    scenario_capacity: &[CapacityRow],
    range: YearRange,
) -> Vec<CapacityBalanceRow> {
    compute_capacity_balance(
        Commodity::Enrichment,
        swu_demand.iter().map(|r| (r.year, r.swu_demand_swu)),
        enrichment_capacity,
        scenario_capacity,
        range,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demand(year: i32, feed_tu: f64, swu: f64) -> FeedAndSwuRow {
        FeedAndSwuRow { year, product_tu: 0.0, feed_tu, swu_demand_swu: swu, tails_assay_used: 0.0025 }
    }

    fn cap(year: i32, capacity: f64) -> CapacityRow {
        CapacityRow { year, capacity: Some(capacity) }
    }

    #[test]
    fn test_scenario_capacity_adds_to_baseline() {
        let feed = vec![demand(2025, 60_000.0, 0.0), demand(2026, 65_000.0, 0.0)];
        let baseline = vec![cap(2025, 62_000.0), cap(2026, 62_000.0)];
        let scenario = vec![cap(2026, 8_000.0), cap(2040, 1.0)];
        let range = YearRange::new(2025, 2030).unwrap();

        let rows = compute_conversion_balance(&feed, &baseline, &scenario, range);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].commodity, Commodity::Conversion);
        assert_relative_eq!(rows[0].balance_ratio, 62_000.0 / 60_000.0);
        assert_relative_eq!(rows[0].spare, 2_000.0);
        assert_relative_eq!(rows[1].capacity, 70_000.0);
        assert_relative_eq!(rows[1].spare, 5_000.0);
    }

    #[test]
    fn test_missing_capacity_is_zero() {
        let swu = vec![demand(2025, 0.0, 50_000.0)];
        let rows = compute_enrichment_balance(&swu, &[], &[], YearRange::new(2025, 2025).unwrap());

        assert_eq!(rows[0].capacity, 0.0);
        assert_eq!(rows[0].balance_ratio, 0.0);
        assert_relative_eq!(rows[0].spare, -50_000.0);
    }

    #[test]
    fn test_demand_outside_range_dropped() {
        let feed = vec![demand(2024, 1.0, 1.0), demand(2025, 1.0, 1.0)];
        let rows = compute_conversion_balance(&feed, &[cap(2024, 5.0)], &[], YearRange::new(2025, 2025).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2025);
    }

    #[test]
    fn test_zero_demand_propagates_infinity() {
        let feed = vec![demand(2025, 0.0, 0.0)];
        let rows = compute_conversion_balance(&feed, &[cap(2025, 10.0)], &[], YearRange::new(2025, 2025).unwrap());
        assert!(rows[0].balance_ratio.is_infinite());

        let none = compute_conversion_balance(&feed, &[], &[], YearRange::new(2025, 2025).unwrap());
        assert!(none[0].balance_ratio.is_nan());
    }
}
