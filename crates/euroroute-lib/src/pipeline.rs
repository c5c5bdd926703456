//! End-to-end automation: discover cities, pair them into routes, and write
//! every artifact for the routes selected for processing.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, info_span};

use crate::city::{City, CityIndex};
use crate::config::AutomationConfig;
use crate::discovery::CityDiscovery;
use crate::documents::report::report_timestamp;
use crate::documents::{
    sheet_name, write_all_timetables, write_analysis_workbook, write_pricing_workbook,
    write_route_map, write_route_timetable, write_routes_csv, AnalysisStats, OutputLayout,
};
use crate::error::{Error, Result};
use crate::pricing::PriceQuote;
use crate::routes::{build_routes, plan_route, route_id, Route};

/// Cities and routes produced before any document is written.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlanning {
    pub countries: usize,
    pub cities: Vec<City>,
    pub routes: Vec<Route>,
}

/// A processed route and the artifacts written for it.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedRoute {
    pub route: Route,
    pub travel_time: String,
    pub map: PathBuf,
    pub timetable: PathBuf,
    pub sheet: String,
}

/// Paths of the run-level reports.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPaths {
    pub all_timetables: PathBuf,
    pub analysis: PathBuf,
    pub routes_csv: PathBuf,
    pub pricing: PathBuf,
    /// Sheet names of the combined timetable workbook, one per processed route.
    pub timetable_sheets: Vec<String>,
}

/// Outcome of an automation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub countries_discovered: usize,
    pub cities_discovered: usize,
    pub total_routes_generated: usize,
    pub routes_processed: usize,
    pub output_dir: PathBuf,
    pub processed: Vec<ProcessedRoute>,
    pub reports: ReportPaths,
}

/// Drives a run against a configured [`CityDiscovery`].
pub struct Automation {
    discovery: CityDiscovery,
}

impl Automation {
    pub fn new(discovery: CityDiscovery) -> Self {
        Self { discovery }
    }

    pub fn discovery(&self) -> &CityDiscovery {
        &self.discovery
    }

    /// Discover the cities of every configured country.
    ///
    /// Countries listed more than once contribute their cities once.
    pub fn discover(&mut self, config: &AutomationConfig) -> Result<Vec<City>> {
        config.validate()?;
        let query = config.discovery_query();
        let cities = self.discovery.discover_all(&config.countries, &query)?;
        let mut seen = HashSet::new();
        Ok(cities
            .into_iter()
            .filter(|city| seen.insert((city.name.to_lowercase(), city.country.to_lowercase())))
            .collect())
    }

    /// Discover cities and pair them, without writing anything.
    pub fn plan(&mut self, config: &AutomationConfig) -> Result<RoutePlanning> {
        let cities = self.discover(config)?;
        let routes = build_routes(&cities, &config.route_config())?;
        Ok(RoutePlanning {
            countries: distinct_countries(&config.countries),
            cities,
            routes,
        })
    }

    /// Full run: plan, then document the first `config.routes` routes.
    pub fn run(&mut self, config: &AutomationConfig) -> Result<RunSummary> {
        let span = info_span!("run", countries = ?config.countries, routes = config.routes);
        let _guard = span.enter();

        let planning = self.plan(config)?;
        if planning.routes.is_empty() {
            return Err(Error::NoRoutesGenerated);
        }

        let selected = planning
            .routes
            .iter()
            .take(config.routes)
            .cloned()
            .collect::<Vec<_>>();
        info!(
            selected = selected.len(),
            generated = planning.routes.len(),
            "processing routes"
        );

        let layout = OutputLayout::new(&config.output_dir);
        document(&layout, &planning, &selected)
    }

    /// Document the single route between two named cities.
    pub fn run_between(
        &mut self,
        config: &AutomationConfig,
        origin: &str,
        destination: &str,
    ) -> Result<RunSummary> {
        let cities = self.discover(config)?;
        let index = CityIndex::new(cities);
        let route = plan_route(&index, &route_id(1), origin, destination)?;
        let planning = RoutePlanning {
            countries: distinct_countries(&config.countries),
            cities: index.cities().to_vec(),
            routes: vec![route],
        };
        let layout = OutputLayout::new(&config.output_dir);
        document(&layout, &planning, &planning.routes)
    }
}

fn distinct_countries(countries: &[String]) -> usize {
    countries
        .iter()
        .map(|country| country.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

fn document(
    layout: &OutputLayout,
    planning: &RoutePlanning,
    selected: &[Route],
) -> Result<RunSummary> {
    layout.create_dirs()?;

    let mut processed = Vec::with_capacity(selected.len());
    for (idx, route) in selected.iter().enumerate() {
        info!(
            route = %route.id,
            position = idx + 1,
            of = selected.len(),
            origin = %route.origin.name,
            destination = %route.destination.name,
            distance_km = route.distance_km,
            "documenting route"
        );
        let map = write_route_map(route, &layout.route_map(&route.id))?;
        let timetable = write_route_timetable(route, &layout.route_timetable(&route.id))?;
        processed.push(ProcessedRoute {
            route: route.clone(),
            travel_time: route.journey().formatted(),
            map,
            timetable,
            sheet: sheet_name(&route.id),
        });
    }

    let generated_at = report_timestamp();
    let stats = AnalysisStats {
        countries: planning.countries,
        cities: planning.cities.len(),
        routes_generated: planning.routes.len(),
        routes_processed: processed.len(),
        generated_at: generated_at.clone(),
    };
    let quotes = selected.iter().map(PriceQuote::for_route).collect::<Vec<_>>();

    let all_timetables = layout.all_timetables();
    let timetable_sheets = write_all_timetables(selected, &all_timetables)?;
    let reports = ReportPaths {
        all_timetables,
        analysis: write_analysis_workbook(&stats, selected, &layout.analysis_report())?,
        routes_csv: write_routes_csv(&planning.routes, &layout.routes_csv())?,
        pricing: write_pricing_workbook(&quotes, &generated_at, &layout.pricing_report())?,
        timetable_sheets,
    };

    info!(
        processed = processed.len(),
        output = %layout.root().display(),
        "automation complete"
    );

    Ok(RunSummary {
        countries_discovered: planning.countries,
        cities_discovered: planning.cities.len(),
        total_routes_generated: planning.routes.len(),
        routes_processed: processed.len(),
        output_dir: layout.root().to_path_buf(),
        processed,
        reports,
    })
}
