//! Reactor fleet records matching the PRIS-style master and generation exports

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Parse a date leniently; anything unparseable is treated as absent
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Some(date);
    }
    // Bare year, e.g. "1985"
    raw.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// A reactor from the fleet master table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reactor {
    pub reactor_id: String,

    #[serde(default)]
    pub pris_id: Option<String>,

    #[serde(default, alias = "reactor", alias = "reactor_name")]
    pub name: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Key into the fuel parameter table
    #[serde(default, alias = "type")]
    pub reactor_type: Option<String>,

    /// Net electrical capacity (MWe)
    #[serde(default, alias = "net_capacity_mwe", alias = "net_capacity")]
    pub net_mwe: Option<f64>,

    #[serde(default, alias = "op_date", deserialize_with = "lenient_date")]
    pub commercial_operation_date: Option<NaiveDate>,

    #[serde(default, alias = "permanent_shutdown", deserialize_with = "lenient_date")]
    pub permanent_shutdown_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub fuel_type: Option<String>,
}

impl Reactor {
    /// Year of commercial operation (first-core year)
    pub fn start_year(&self) -> Option<i32> {
        self.commercial_operation_date.map(|d| d.year())
    }

    /// Year of permanent shutdown, if the reactor has one on record
    pub fn shutdown_year(&self) -> Option<i32> {
        self.permanent_shutdown_date.map(|d| d.year())
    }

    /// Net capacity in GWe
    pub fn net_gwe(&self) -> Option<f64> {
        self.net_mwe.filter(|mwe| !mwe.is_nan()).map(|mwe| mwe / 1000.0)
    }
}

/// Net generation for one reactor-year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorGeneration {
    #[serde(alias = "reactor", alias = "plant")]
    pub reactor_id: String,

    pub year: i32,

    #[serde(default, alias = "net_generation")]
    pub net_generation_gwh: Option<f64>,

    #[serde(default)]
    pub net_mwe: Option<f64>,
}

impl ReactorGeneration {
    /// Load factor for the year, clipped to [0, 1]
    ///
    /// `None` when generation or capacity is missing or capacity is zero.
    pub fn capacity_factor(&self, hours_per_year: f64) -> Option<f64> {
        let gwh = self.net_generation_gwh?;
        let mwe = self.net_mwe?;
        let max_gwh = mwe * hours_per_year / 1000.0;
        if max_gwh <= 0.0 || gwh.is_nan() {
            return None;
        }
        Some((gwh / max_gwh).clamp(0.0, 1.0))
    }
}
