//! Tails-assay optimization by grid search
//!
//! Cost per unit of product is `u_price * feed + swu_price * swu`. Feed is in tU
//! while the uranium price is per lb U3O8, so the cost is only meaningful for
//! ranking candidates against each other.

use crate::config::TailsSearch;
use super::separation::{feed_and_swu, EnrichmentParams};

/// Relative fuel cost of one unit of product at the given tails assay
pub fn unit_product_cost(u_price: f64, swu_price: f64, params: &EnrichmentParams) -> f64 {
    let (feed, swu) = feed_and_swu(1.0, params);
    u_price * feed + swu_price * swu
}

/// Tails assay on the search grid that minimizes relative cost per unit product
///
/// Returns `default_tails` unchanged when either price is missing (or NaN) or the
/// grid is empty. Ties go to the lowest candidate.
pub fn optimize_tails_assay(
    u_price: Option<f64>,
    swu_price: Option<f64>,
    product_assay: f64,
    feed_assay: f64,
    search: &TailsSearch,
    default_tails: f64,
) -> f64 {
    let (Some(u_price), Some(swu_price)) = (
        u_price.filter(|p| !p.is_nan()),
        swu_price.filter(|p| !p.is_nan()),
    ) else {
        return default_tails;
    };

    let mut best: Option<(f64, f64)> = None;
    for tails in search.candidates() {
        let params = EnrichmentParams::new(feed_assay, product_assay, tails);
        let cost = unit_product_cost(u_price, swu_price, &params);
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((tails, cost)),
        }
    }

    best.map_or(default_tails, |(tails, _)| tails)
}
