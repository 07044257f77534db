//! Separation physics: value function and feed/SWU for a product mass

use crate::config::{DEFAULT_TAILS_ASSAY, NATURAL_U235_ASSAY};
use serde::{Deserialize, Serialize};

/// Assays (U-235 atomic fractions) of one enrichment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentParams {
    pub feed_assay: f64,
    pub product_assay: f64,
    pub tails_assay: f64,
}

impl Default for EnrichmentParams {
    fn default() -> Self {
        Self {
            feed_assay: NATURAL_U235_ASSAY,
            product_assay: 0.045,
            tails_assay: DEFAULT_TAILS_ASSAY,
        }
    }
}

impl EnrichmentParams {
    pub fn new(feed_assay: f64, product_assay: f64, tails_assay: f64) -> Self {
        Self {
            feed_assay,
            product_assay,
            tails_assay,
        }
    }

    /// Feed mass required per unit of product
    pub fn feed_over_product(&self) -> f64 {
        (self.product_assay - self.tails_assay) / (self.feed_assay - self.tails_assay)
    }
}

/// Enrichment value function V(x) = (1 - 2x) ln((1 - x) / x), for x in (0, 1)
pub fn value_function(x: f64) -> f64 {
    (1.0 - 2.0 * x) * ((1.0 - x) / x).ln()
}

/// Feed (tU) and separative work (SWU) needed to produce `product_tu` of product
pub fn feed_and_swu(product_tu: f64, params: &EnrichmentParams) -> (f64, f64) {
    let feed = params.feed_over_product() * product_tu;
    let tails = feed - product_tu;

    let swu = product_tu * value_function(params.product_assay)
        + tails * value_function(params.tails_assay)
        - feed * value_function(params.feed_assay);

    (feed, swu)
}
