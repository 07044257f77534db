//! Primary (mine) supply construction

use crate::config::YearRange;
use super::data::{Mine, MineProduction, MineYearProduction, PrimarySupplyRow};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Build the dense mine × year production grid and the annual primary supply
///
/// Historical and scenario rows inside `range` are summed at the (mine, year)
/// grain, so scenario rows add to history. Every known mine gets a row for every
/// year, zero where nothing was produced. Mines are taken from the master table,
/// or from the production rows when the master is empty.
pub fn build_primary_supply(
    mines: &[Mine],
    production: &[MineProduction],
    scenario_production: &[MineProduction],
    range: YearRange,
) -> (Vec<MineYearProduction>, Vec<PrimarySupplyRow>) {
    let in_range: Vec<&MineProduction> = production
        .iter()
        .chain(scenario_production)
        .filter(|row| range.contains(row.year))
        .collect();

    let mut totals: HashMap<(&str, i32), f64> = HashMap::new();
    for row in &in_range {
        *totals.entry((row.mine_id.as_str(), row.year)).or_insert(0.0) += row.production_tu.unwrap_or(0.0);
    }

    let mine_ids: Vec<&str> = if mines.is_empty() {
        unique(in_range.iter().map(|row| row.mine_id.as_str()))
    } else {
        unique(mines.iter().map(|mine| mine.mine_id.as_str()))
    };

    let mut countries: HashMap<&str, Option<&String>> = HashMap::new();
    for mine in mines {
        countries.entry(mine.mine_id.as_str()).or_insert(mine.country.as_ref());
    }

    let mut mine_year = Vec::with_capacity(mine_ids.len() * range.len());
    for mine_id in &mine_ids {
        let country = countries.get(mine_id).copied().flatten().cloned();
        for year in range.years() {
            mine_year.push(MineYearProduction {
                mine_id: mine_id.to_string(),
                year,
                production_tu: totals.get(&(*mine_id, year)).copied().unwrap_or(0.0),
                country: country.clone(),
            });
        }
    }

    let primary = if mine_ids.is_empty() {
        Vec::new()
    } else {
        range
            .years()
            .map(|year| PrimarySupplyRow {
                year,
                primary_supply_tu: mine_year
                    .iter()
                    .filter(|row| row.year == year)
                    .map(|row| row.production_tu)
                    .sum(),
            })
            .collect()
    };

    debug!(
        "Primary supply: {} mines x {} years, {} scenario rows",
        mine_ids.len(),
        range.len(),
        scenario_production.len()
    );

    (mine_year, primary)
}

/// Distinct values in order of first appearance
fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mine(id: &str, country: &str) -> Mine {
        Mine { mine_id: id.to_string(), country: Some(country.to_string()) }
    }

    fn prod(id: &str, year: i32, tu: f64) -> MineProduction {
        MineProduction { mine_id: id.to_string(), year, production_tu: Some(tu) }
    }

    #[test]
    fn test_dense_grid_zero_fills() {
        let mines = vec![mine("CIGAR", "CA"), mine("HUSAB", "NA"), mine("RANGER", "AU")];
        let history = vec![prod("CIGAR", 2020, 7000.0), prod("HUSAB", 2021, 3000.0), prod("CIGAR", 2019, 1.0)];
        let range = YearRange::new(2020, 2022).unwrap();

        let (grid, primary) = build_primary_supply(&mines, &history, &[], range);

        assert_eq!(grid.len(), 3 * 3);
        let ranger: Vec<_> = grid.iter().filter(|r| r.mine_id == "RANGER").collect();
        assert_eq!(ranger.len(), 3);
        assert!(ranger.iter().all(|r| r.production_tu == 0.0));
        assert_eq!(ranger[0].country.as_deref(), Some("AU"));

        assert_eq!(primary.len(), 3);
        assert_relative_eq!(primary[0].primary_supply_tu, 7000.0);
        assert_relative_eq!(primary[1].primary_supply_tu, 3000.0);
        assert_relative_eq!(primary[2].primary_supply_tu, 0.0);
    }

    #[test]
    fn test_scenario_rows_add_to_history() {
        let mines = vec![mine("CIGAR", "CA")];
        let history = vec![prod("CIGAR", 2025, 6000.0)];
        let scenario = vec![prod("CIGAR", 2025, 500.0), prod("CIGAR", 2026, 6500.0), prod("CIGAR", 2030, 1.0)];
        let range = YearRange::new(2025, 2026).unwrap();

        let (grid, primary) = build_primary_supply(&mines, &history, &scenario, range);

        assert_eq!(grid.len(), 2);
        assert_relative_eq!(grid[0].production_tu, 6500.0);
        assert_relative_eq!(primary[1].primary_supply_tu, 6500.0);
    }

    #[test]
    fn test_mines_from_production_when_master_empty() {
        let history = vec![prod("B", 2020, 1.0), prod("A", 2020, 2.0), prod("B", 2021, 3.0)];
        let range = YearRange::new(2020, 2021).unwrap();

        let (grid, primary) = build_primary_supply(&[], &history, &[], range);

        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0].mine_id, "B");
        assert_eq!(grid[2].mine_id, "A");
        assert!(grid.iter().all(|r| r.country.is_none()));
        assert_relative_eq!(primary[0].primary_supply_tu, 3.0);
    }

    #[test]
    fn test_unknown_mine_dropped_from_grid() {
        let mines = vec![mine("A", "KZ")];
        let history = vec![prod("A", 2020, 1.0), prod("Z", 2020, 100.0)];
        let range = YearRange::new(2020, 2020).unwrap();

        let (grid, primary) = build_primary_supply(&mines, &history, &[], range);
        assert_eq!(grid.len(), 1);
        assert_relative_eq!(primary[0].primary_supply_tu, 1.0);
    }
}
