//! Enrichment economics: feed and separative work for enriched product demand

mod annual;
mod optimizer;
mod separation;

pub use annual::{compute_feed_and_swu_demand, FeedAndSwuRow, PriceSeries};
pub use optimizer::{optimize_tails_assay, unit_product_cost};
pub use separation::{feed_and_swu, value_function, EnrichmentParams};
