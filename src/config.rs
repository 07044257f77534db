//! Model configuration shared by every stage of the balance engine
//!
//! Assay defaults and fallback factors are carried here instead of in
//! module-level constants so each run states its assumptions explicitly.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// U-235 atomic fraction of natural uranium
pub const NATURAL_U235_ASSAY: f64 = 0.00711;

/// Tails assay used when no price-driven optimum is available
pub const DEFAULT_TAILS_ASSAY: f64 = 0.0025;

/// Inclusive range of calendar years for a model run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> ModelResult<Self> {
        if start > end {
            return Err(ModelError::Config(format!(
                "start year {} is after end year {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Years in ascending order
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// How the tails assay for a year is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TailsPolicy {
    /// Grid-search the cheapest tails assay when both prices are known
    Optimize,
    /// Always use the fuel-parameter tails assay (or the global default)
    Fixed,
}

impl FromStr for TailsPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimize" => Ok(TailsPolicy::Optimize),
            "fixed" => Ok(TailsPolicy::Fixed),
            other => Err(ModelError::Config(format!("Unknown tails policy: {}", other))),
        }
    }
}

/// Grid used by the tails-assay optimizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailsSearch {
    /// Lowest candidate tails assay
    pub lower: f64,
    /// Highest candidate tails assay
    pub upper: f64,
    /// Number of evenly spaced candidates, endpoints included
    pub grid_points: usize,
}

impl Default for TailsSearch {
    fn default() -> Self {
        Self {
            lower: 0.001,
            upper: 0.003,
            grid_points: 40,
        }
    }
}

impl TailsSearch {
    /// Evenly spaced candidates from `lower` to `upper`; the last point is exactly `upper`
    pub fn candidates(&self) -> Vec<f64> {
        match self.grid_points {
            0 => Vec::new(),
            1 => vec![self.lower],
            n => {
                let step = (self.upper - self.lower) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.upper
                        } else {
                            self.lower + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Configuration for a balance run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Feed assay fed into enrichment
    pub feed_assay: f64,

    /// Tails assay used when neither the optimizer nor fuel parameters supply one
    pub default_tails_assay: f64,

    /// Product assay for reactor types without fuel parameters
    pub default_product_assay: f64,

    /// Capacity factor for reactor-years without generation data or fuel parameters
    pub default_capacity_factor: f64,

    /// Hours in a generation year (GWh per GWe-year)
    pub hours_per_year: f64,

    /// Optimizer grid
    pub tails_search: TailsSearch,

    /// Tails-assay policy for annual aggregation
    pub tails_policy: TailsPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            feed_assay: NATURAL_U235_ASSAY,
            default_tails_assay: DEFAULT_TAILS_ASSAY,
            default_product_assay: 0.045,
            default_capacity_factor: 0.85,
            hours_per_year: 8760.0,
            tails_search: TailsSearch::default(),
            tails_policy: TailsPolicy::Optimize,
        }
    }
}
