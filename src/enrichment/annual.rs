//! Annual feed and SWU demand from reactor-year product demand

use crate::config::{ModelConfig, TailsPolicy};
use crate::demand::ReactorDemandRow;
use super::optimizer::optimize_tails_assay;
use super::separation::{feed_and_swu, EnrichmentParams};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annual price series (USD/lb U3O8 or USD/SWU), keyed by year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    prices: BTreeMap<i32, f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, price: f64) {
        self.prices.insert(year, price);
    }

    /// Price for the year; NaN counts as missing
    pub fn get(&self, year: i32) -> Option<f64> {
        self.prices.get(&year).copied().filter(|p| !p.is_nan())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(i32, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// Annual enrichment requirement across the whole fleet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedAndSwuRow {
    pub year: i32,
    pub product_tu: f64,
    pub feed_tu: f64,
    pub swu_demand_swu: f64,
    /// Tails assay actually applied for the year
    pub tails_assay_used: f64,
}

#[derive(Debug, Default)]
struct YearTotals {
    product_tu: f64,
    product_assay_sum: f64,
    tails_assay_sum: f64,
    tails_count: usize,
    rows: usize,
}

impl YearTotals {
    fn mean_product_assay(&self) -> Option<f64> {
        (self.rows > 0).then(|| self.product_assay_sum / self.rows as f64)
    }

    fn mean_tails_assay(&self) -> Option<f64> {
        (self.tails_count > 0).then(|| self.tails_assay_sum / self.tails_count as f64)
    }
}

/// Aggregate reactor product demand into feed and SWU demand by year
///
/// With [`TailsPolicy::Optimize`] and both prices known for a year, the tails
/// assay is grid-searched; otherwise the mean fuel-parameter tails assay is used,
/// then the configured default.
pub fn compute_feed_and_swu_demand(
    reactor_demand: &[ReactorDemandRow],
    u_prices: &PriceSeries,
    swu_prices: &PriceSeries,
    config: &ModelConfig,
) -> Vec<FeedAndSwuRow> {
    let mut by_year: BTreeMap<i32, YearTotals> = BTreeMap::new();
    for row in reactor_demand {
        let totals = by_year.entry(row.year).or_default();
        totals.product_tu += row.total_tu;
        totals.product_assay_sum += row.product_assay;
        totals.rows += 1;
        if !row.tails_assay.is_nan() {
            totals.tails_assay_sum += row.tails_assay;
            totals.tails_count += 1;
        }
    }

    by_year
        .into_iter()
        .map(|(year, totals)| {
            let product_assay = totals
                .mean_product_assay()
                .unwrap_or(config.default_product_assay);
            let u_price = u_prices.get(year);
            let swu_price = swu_prices.get(year);

            let tails = match (config.tails_policy, u_price, swu_price) {
                (TailsPolicy::Optimize, Some(_), Some(_)) => optimize_tails_assay(
                    u_price,
                    swu_price,
                    product_assay,
                    config.feed_assay,
                    &config.tails_search,
                    config.default_tails_assay,
                ),
                _ => totals.mean_tails_assay().unwrap_or(config.default_tails_assay),
            };

            let params = EnrichmentParams::new(config.feed_assay, product_assay, tails);
            let (feed_tu, swu) = feed_and_swu(totals.product_tu, &params);
            debug!(
                "{}: product {:.1} tU, feed {:.1} tU, {:.0} SWU at tails {:.5}",
                year, totals.product_tu, feed_tu, swu, tails
            );

            FeedAndSwuRow {
                year,
                product_tu: totals.product_tu,
                feed_tu,
                swu_demand_swu: swu,
                tails_assay_used: tails,
            }
        })
        .collect()
}
