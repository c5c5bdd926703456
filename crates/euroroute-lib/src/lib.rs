//! European route automation library.
//!
//! This crate discovers major cities per country, pairs them into
//! distance-bounded routes, and produces the artifacts for each route: an
//! interactive map, timetable workbooks, an analysis report, and a pricing
//! report. The CLI should only depend on the functions exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod city;
pub mod config;
pub mod discovery;
pub mod documents;
pub mod error;
pub mod geo;
pub mod journey;
pub mod pipeline;
pub mod pricing;
pub mod routes;
pub mod schedule;

pub use city::{City, CityIndex, PlaceKind};
pub use config::AutomationConfig;
pub use discovery::{CityDiscovery, CitySource, CountryCities, DiscoveryQuery};
pub use documents::OutputLayout;
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use journey::{format_duration, parse_duration, JourneyEstimate};
pub use pipeline::{Automation, ProcessedRoute, ReportPaths, RoutePlanning, RunSummary};
pub use pricing::{MarketPosition, PriceQuote};
pub use routes::{build_routes, plan_route, Route, RouteConfig, RouteKind};
pub use schedule::{arrival_time, ClockTime, Timetable, TimetableEntry};
