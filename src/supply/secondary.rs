//! Secondary supply (HEU downblending, underfeeding, other) by year

use crate::config::YearRange;
use super::data::{SecondarySupply, SecondarySupplyRow};
use std::collections::BTreeMap;

/// Combine baseline and scenario secondary supply within `range`
///
/// Scenario rows are added to the baseline. Each category is summed by year
/// with blanks counted as zero. Years with no rows in either input are absent.
pub fn build_secondary_supply(
    baseline: &[SecondarySupply],
    scenario: &[SecondarySupply],
    range: YearRange,
) -> Vec<SecondarySupplyRow> {
    let mut by_year: BTreeMap<i32, SecondarySupplyRow> = BTreeMap::new();

    for row in baseline.iter().chain(scenario).filter(|r| range.contains(r.year)) {
        let total = by_year.entry(row.year).or_insert(SecondarySupplyRow {
            year: row.year,
            secondary_supply_tu: 0.0,
            heu_tu: 0.0,
            underfeeding_tu: 0.0,
        });
        total.secondary_supply_tu += row.secondary_supply_tu.unwrap_or(0.0);
        total.heu_tu += row.heu_tu.unwrap_or(0.0);
        total.underfeeding_tu += row.underfeeding_tu.unwrap_or(0.0);
    }

    by_year.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(year: i32, total: Option<f64>, heu: Option<f64>, underfeed: Option<f64>) -> SecondarySupply {
        SecondarySupply { year, secondary_supply_tu: total, heu_tu: heu, underfeeding_tu: underfeed }
    }

    #[test]
    fn test_baseline_and_scenario_summed() {
        let baseline = vec![row(2025, Some(8000.0), Some(1000.0), None), row(2026, Some(7000.0), None, Some(2000.0))];
        let scenario = vec![row(2025, Some(500.0), None, Some(500.0)), row(2040, Some(1.0), None, None)];
        let range = YearRange::new(2025, 2030).unwrap();

        let out = build_secondary_supply(&baseline, &scenario, range);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].year, 2025);
        assert_relative_eq!(out[0].secondary_supply_tu, 8500.0);
        assert_relative_eq!(out[0].heu_tu, 1000.0);
        assert_relative_eq!(out[0].underfeeding_tu, 500.0);
        assert_relative_eq!(out[1].heu_tu, 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let range = YearRange::new(2025, 2030).unwrap();
        assert!(build_secondary_supply(&[], &[], range).is_empty());
    }
}
