use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::{DiscoveryQuery, DEFAULT_MAX_CITIES};
use crate::documents::DEFAULT_OUTPUT_DIR;
use crate::error::{Error, Result};
use crate::routes::RouteConfig;

/// How many routes are generated for every route that gets documented.
pub const DISCOVERY_FACTOR: usize = 10;

/// Parameters of an automation run.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it changes:
///
/// ```json
/// { "countries": ["France", "Germany"], "routes": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomationConfig {
    pub countries: Vec<String>,
    /// Number of routes to document.
    pub routes: usize,
    pub min_population: u64,
    /// Cap on generated routes; defaults to `routes * 10`.
    pub max_routes: Option<usize>,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    pub max_cities_per_country: usize,
    pub output_dir: PathBuf,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            countries: vec!["France".to_string(), "Spain".to_string()],
            routes: 3,
            min_population: 150_000,
            max_routes: None,
            min_distance_km: 150.0,
            max_distance_km: 700.0,
            max_cities_per_country: DEFAULT_MAX_CITIES,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl AutomationConfig {
    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|err| Error::InvalidConfig {
            message: format!("{}: {err}", path.display()),
        })
    }

    pub fn effective_max_routes(&self) -> usize {
        self.max_routes
            .unwrap_or_else(|| self.routes.saturating_mul(DISCOVERY_FACTOR))
    }

    pub fn route_config(&self) -> RouteConfig {
        RouteConfig {
            min_distance_km: self.min_distance_km,
            max_distance_km: self.max_distance_km,
            max_routes: self.effective_max_routes(),
        }
    }

    pub fn discovery_query(&self) -> DiscoveryQuery {
        DiscoveryQuery::new(self.min_population).max_cities(self.max_cities_per_country)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidConfig {
                message: message.to_string(),
            })
        };
        if self.countries.is_empty() {
            return invalid("at least one country is required");
        }
        if self.countries.iter().any(|c| c.trim().is_empty()) {
            return invalid("country names must not be blank");
        }
        if self.routes == 0 {
            return invalid("routes must be at least 1");
        }
        if self.max_cities_per_country == 0 {
            return invalid("max_cities_per_country must be at least 1");
        }
        self.route_config().validate()
    }
}
