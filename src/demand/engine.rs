//! Reactor demand engine: fleet + generation history to product demand by reactor-year

use crate::config::{ModelConfig, YearRange};
use crate::fleet::{FuelParamTable, Reactor, ReactorGeneration};
use crate::scenario::{rows_for, NewbuildProject, ReactorLifeOverride};
use super::rows::ReactorDemandRow;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;

/// A fleet reactor with its operating window resolved for a scenario
#[derive(Debug, Clone)]
struct ScheduledReactor {
    reactor: Reactor,
    /// Scenario override of the shutdown year, if any
    shutdown_override: Option<i32>,
}

impl ScheduledReactor {
    /// Last operating year: override, then recorded shutdown, then end of range
    fn shutdown_year(&self, range: YearRange) -> i32 {
        self.shutdown_override
            .or_else(|| self.reactor.shutdown_year())
            .unwrap_or(range.end)
    }
}

type GenerationLookup<'a> = HashMap<(&'a str, i32), &'a ReactorGeneration>;

/// Computes per-reactor-year product demand
pub struct ReactorDemandEngine {
    config: ModelConfig,
    fuel: FuelParamTable,
}

impl ReactorDemandEngine {
    pub fn new(config: ModelConfig, fuel: FuelParamTable) -> Self {
        Self { config, fuel }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Compute product demand (tU) by reactor-year
    ///
    /// Life overrides and newbuilds are restricted to rows keyed to `scenario_name`.
    /// Output is one row per operating reactor-year, not aggregated.
    pub fn compute_reactor_demand(
        &self,
        reactor_master: &[Reactor],
        generation: &[ReactorGeneration],
        life_overrides: &[ReactorLifeOverride],
        newbuilds: &[NewbuildProject],
        range: YearRange,
        scenario_name: &str,
    ) -> Vec<ReactorDemandRow> {
        let mut fleet = apply_life_overrides(reactor_master, life_overrides, scenario_name);
        append_newbuilds(&mut fleet, newbuilds, scenario_name);

        let mut lookup: GenerationLookup<'_> = HashMap::with_capacity(generation.len());
        for row in generation {
            lookup.entry((row.reactor_id.as_str(), row.year)).or_insert(row);
        }

        debug!(
            "Computing reactor demand for {} reactors, {}-{}, scenario '{}'",
            fleet.len(),
            range.start,
            range.end,
            scenario_name
        );

        let per_reactor: Vec<Vec<ReactorDemandRow>> = fleet
            .par_iter()
            .map(|scheduled| self.reactor_rows(scheduled, &lookup, range))
            .collect();

        per_reactor.into_iter().flatten().collect()
    }

    fn reactor_rows(
        &self,
        scheduled: &ScheduledReactor,
        generation: &GenerationLookup<'_>,
        range: YearRange,
    ) -> Vec<ReactorDemandRow> {
        let reactor = &scheduled.reactor;
        let Some(start) = reactor.start_year() else {
            warn!("Reactor {} has no commercial operation date; skipped", reactor.reactor_id);
            return Vec::new();
        };
        let shutdown = scheduled.shutdown_year(range);
        let fuel = self.fuel.resolve(reactor.reactor_type.as_deref(), &self.config);
        let net_gwe = reactor.net_gwe();

        let mut rows = Vec::new();
        for year in start.max(range.start)..=range.end {
            if year > shutdown {
                break;
            }

            let capacity_factor = match generation.get(&(reactor.reactor_id.as_str(), year)) {
                Some(gen) => self.actual_capacity_factor(reactor, gen, fuel.capacity_factor),
                None => fuel.capacity_factor,
            };
            let gw_years = net_gwe.map(|gwe| gwe * capacity_factor);

            let first_core_tu = if year == start {
                net_gwe.map_or(0.0, |gwe| fuel.first_core_tu_per_gwe * gwe)
            } else {
                0.0
            };
            let reload_tu = gw_years
                .filter(|gw| !gw.is_nan())
                .map_or(0.0, |gw| fuel.reload_tu_per_gwe_year * gw);

            rows.push(ReactorDemandRow {
                reactor_id: reactor.reactor_id.clone(),
                year,
                country: reactor.country.clone(),
                gw_years,
                first_core_tu,
                reload_tu,
                total_tu: first_core_tu + reload_tu,
                product_assay: fuel.product_assay,
                tails_assay: fuel.tails_assay,
            });
        }
        rows
    }

    /// Capacity factor implied by reported generation; not clipped
    fn actual_capacity_factor(&self, reactor: &Reactor, gen: &ReactorGeneration, default: f64) -> f64 {
        match (reactor.net_mwe, gen.net_generation_gwh) {
            (Some(mwe), Some(gwh)) if mwe != 0.0 && !mwe.is_nan() => {
                let factor = gwh / (mwe * self.config.hours_per_year / 1000.0);
                if gen.capacity_factor(self.config.hours_per_year).is_some_and(|clipped| clipped < factor) {
                    debug!(
                        "{} {}: capacity factor {:.3} exceeds reported nameplate",
                        reactor.reactor_id, gen.year, factor
                    );
                }
                factor
            }
            _ => default,
        }
    }
}

/// Attach scenario shutdown overrides to the master fleet
fn apply_life_overrides(
    reactor_master: &[Reactor],
    life_overrides: &[ReactorLifeOverride],
    scenario_name: &str,
) -> Vec<ScheduledReactor> {
    let mut overrides: HashMap<&str, Option<i32>> = HashMap::new();
    for row in rows_for(life_overrides, scenario_name) {
        overrides.insert(row.reactor_id.as_str(), row.shutdown_year);
    }

    reactor_master
        .iter()
        .map(|reactor| ScheduledReactor {
            reactor: reactor.clone(),
            shutdown_override: overrides.get(reactor.reactor_id.as_str()).copied().flatten(),
        })
        .collect()
}

/// Append the scenario's newbuild projects as open-ended reactors
fn append_newbuilds(fleet: &mut Vec<ScheduledReactor>, newbuilds: &[NewbuildProject], scenario_name: &str) {
    let before = fleet.len();
    fleet.extend(rows_for(newbuilds, scenario_name).map(|project| ScheduledReactor {
        reactor: project.to_reactor(),
        shutdown_override: None,
    }));
    debug!("Appended {} newbuild projects", fleet.len() - before);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{parse_date, FuelParams};
    use approx::assert_relative_eq;

    fn reactor(id: &str, mwe: f64, cod: &str, shutdown: Option<&str>) -> Reactor {
        Reactor {
            reactor_id: id.to_string(),
            pris_id: None,
            name: None,
            country: Some("US".to_string()),
            reactor_type: Some("PWR".to_string()),
            net_mwe: Some(mwe),
            commercial_operation_date: parse_date(cod),
            permanent_shutdown_date: shutdown.and_then(parse_date),
            status: None,
            fuel_type: None,
        }
    }

    fn engine() -> ReactorDemandEngine {
        let fuel = FuelParamTable::from_rows(vec![FuelParams {
            reactor_type: "PWR".to_string(),
            default_capacity_factor: Some(0.9),
            first_core_tu_per_gwe: Some(80.0),
            reload_tu_per_gwe_year: Some(20.0),
            product_assay: Some(0.045),
            tails_assay: Some(0.0025),
        }]);
        ReactorDemandEngine::new(ModelConfig::default(), fuel)
    }

    fn range(start: i32, end: i32) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    #[test]
    fn test_first_core_only_in_commissioning_year() {
        let fleet = vec![reactor("R1", 1000.0, "2022-07-01", None)];
        let rows = engine().compute_reactor_demand(&fleet, &[], &[], &[], range(2020, 2025), "base");

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].year, 2022);
        assert_relative_eq!(rows[0].first_core_tu, 80.0);
        assert_relative_eq!(rows[0].reload_tu, 20.0 * 0.9);
        assert_relative_eq!(rows[0].total_tu, 80.0 + 18.0);
        for row in &rows[1..] {
            assert_eq!(row.first_core_tu, 0.0);
            assert_relative_eq!(row.total_tu, 18.0);
        }
    }

    #[test]
    fn test_no_first_core_when_commissioned_before_range() {
        let fleet = vec![reactor("R1", 1000.0, "1990-01-01", None)];
        let rows = engine().compute_reactor_demand(&fleet, &[], &[], &[], range(2020, 2021), "base");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.first_core_tu == 0.0));
    }

    #[test]
    fn test_shutdown_and_life_override() {
        let fleet = vec![reactor("R1", 1000.0, "1990-01-01", Some("2021-06-30"))];
        let overrides = vec![
            ReactorLifeOverride { scenario: "extend".to_string(), reactor_id: "R1".to_string(), shutdown_year: Some(2023) },
            ReactorLifeOverride { scenario: "other".to_string(), reactor_id: "R1".to_string(), shutdown_year: Some(2020) },
        ];
        let e = engine();

        let base = e.compute_reactor_demand(&fleet, &[], &overrides, &[], range(2020, 2025), "base");
        assert_eq!(base.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2020, 2021]);

        let extended = e.compute_reactor_demand(&fleet, &[], &overrides, &[], range(2020, 2025), "extend");
        assert_eq!(extended.last().unwrap().year, 2023);
    }

    #[test]
    fn test_actual_generation_sets_capacity_factor() {
        let fleet = vec![reactor("R1", 1000.0, "1990-01-01", None)];
        let generation = vec![ReactorGeneration {
            reactor_id: "R1".to_string(),
            year: 2020,
            net_generation_gwh: Some(4380.0),
            net_mwe: Some(1000.0),
        }];
        let rows = engine().compute_reactor_demand(&fleet, &generation, &[], &[], range(2020, 2021), "base");

        assert_relative_eq!(rows[0].gw_years.unwrap(), 0.5);
        assert_relative_eq!(rows[0].reload_tu, 10.0);
        // No generation for 2021: type default applies
        assert_relative_eq!(rows[1].gw_years.unwrap(), 0.9);
    }

    #[test]
    fn test_newbuilds_filtered_by_scenario() {
        let newbuilds = vec![NewbuildProject {
            scenario: "high".to_string(),
            reactor_id: "NB-1".to_string(),
            pris_id: None,
            name: None,
            country: Some("IN".to_string()),
            reactor_type: Some("PWR".to_string()),
            net_mwe: Some(500.0),
            start_year: 2024,
            status: None,
            fuel_type: None,
        }];
        let e = engine();

        assert!(e.compute_reactor_demand(&[], &[], &[], &newbuilds, range(2020, 2025), "base").is_empty());

        let rows = e.compute_reactor_demand(&[], &[], &[], &newbuilds, range(2020, 2025), "high");
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[0].first_core_tu, 40.0);
        assert_eq!(rows[1].first_core_tu, 0.0);
    }

    #[test]
    fn test_unknown_type_and_missing_date() {
        let mut unknown = reactor("R1", 1000.0, "1990-01-01", None);
        unknown.reactor_type = Some("FBR".to_string());
        let mut undated = reactor("R2", 1000.0, "", None);
        undated.commercial_operation_date = None;

        let rows = engine().compute_reactor_demand(&[unknown, undated], &[], &[], &[], range(2020, 2020), "base");
        assert_eq!(rows.len(), 1);
        assert_relative_eq!(rows[0].gw_years.unwrap(), 0.85);
        assert_eq!(rows[0].total_tu, 0.0);
        assert_eq!(rows[0].product_assay, 0.045);
    }
}
