//! City discovery against OpenStreetMap-backed services.
//!
//! [`CityDiscovery`] asks a primary [`CitySource`] (normally Overpass) for the
//! settlements of a country and falls back to geocoding a built-in list of
//! major cities through Nominatim when the primary source fails or returns
//! too little. Results are filtered by population, deduplicated by name,
//! ranked, and memoised for the rest of the run. An optional on-disk
//! [`DiscoveryCache`] persists results between runs.
//!
//! Tests and offline runs can point `EUROROUTE_CITY_SOURCE` at a JSON file of
//! cities to bypass the network entirely.

pub mod cache;
pub mod fixture;
pub mod nominatim;
pub mod overpass;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::city::{dedup_by_name, rank_by_population, City};
use crate::error::{Error, Result};

pub use cache::DiscoveryCache;
pub use fixture::{FixtureSource, CITY_SOURCE_ENV};
pub use nominatim::NominatimSource;
pub use overpass::OverpassSource;

/// Below this many primary results the geocoding fallback is consulted.
pub const MIN_PRIMARY_RESULTS: usize = 3;

/// Default cap on cities kept per country.
pub const DEFAULT_MAX_CITIES: usize = 20;

/// Filtering parameters for a single discovery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub min_population: u64,
    pub max_cities: usize,
}

impl DiscoveryQuery {
    pub fn new(min_population: u64) -> Self {
        Self {
            min_population,
            max_cities: DEFAULT_MAX_CITIES,
        }
    }

    pub fn max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities;
        self
    }
}

/// Something that can list candidate cities for a country.
///
/// Implementations return raw candidates; population filtering, dedup and
/// ranking are applied by [`CityDiscovery`].
pub trait CitySource {
    /// Short label used in log output.
    fn label(&self) -> &'static str;

    fn discover(&self, country: &str, query: &DiscoveryQuery) -> Result<Vec<City>>;
}

/// Cities discovered for one country, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCities {
    pub country: String,
    pub cities: Vec<City>,
}

/// Orchestrates primary lookup, fallback, filtering, and caching.
pub struct CityDiscovery {
    primary: Box<dyn CitySource>,
    fallback: Option<Box<dyn CitySource>>,
    cache: Option<DiscoveryCache>,
    refresh: bool,
    discovered: Vec<CountryCities>,
}

impl CityDiscovery {
    pub fn new(primary: Box<dyn CitySource>) -> Self {
        Self {
            primary,
            fallback: None,
            cache: None,
            refresh: false,
            discovered: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn CitySource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_cache(mut self, cache: DiscoveryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Ignore cached results on read; fresh results are still written back.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Overpass primary with Nominatim fallback and the default disk cache.
    pub fn online() -> Result<Self> {
        let discovery = Self::new(Box::new(OverpassSource::from_env()?))
            .with_fallback(Box::new(NominatimSource::from_env()?));
        match DiscoveryCache::default_location() {
            Ok(cache) => Ok(discovery.with_cache(cache)),
            Err(err) => {
                warn!(error = %err, "discovery cache disabled");
                Ok(discovery)
            }
        }
    }

    /// Use the fixture named by `EUROROUTE_CITY_SOURCE` when set, otherwise
    /// the online sources.
    pub fn from_env() -> Result<Self> {
        if let Some(source) = env::var_os(CITY_SOURCE_ENV) {
            let path = PathBuf::from(source);
            info!(path = %path.display(), "using local city source override");
            return Ok(Self::new(Box::new(FixtureSource::from_path(&path)?)));
        }
        Self::online()
    }

    /// Everything discovered so far, one entry per country in request order.
    pub fn discovered(&self) -> &[CountryCities] {
        &self.discovered
    }

    /// All discovered cities across countries.
    pub fn all_cities(&self) -> Vec<City> {
        self.discovered
            .iter()
            .flat_map(|entry| entry.cities.iter().cloned())
            .collect()
    }

    /// Discover the cities of `country`.
    ///
    /// The returned list is non-empty, unique by name, sorted by population
    /// descending, and at most `query.max_cities` long.
    pub fn discover(&mut self, country: &str, query: &DiscoveryQuery) -> Result<Vec<City>> {
        if let Some(entry) = self
            .discovered
            .iter()
            .find(|entry| entry.country == country)
        {
            debug!(country, "using cities discovered earlier in this run");
            return Ok(entry.cities.clone());
        }

        if !self.refresh {
            if let Some(cache) = &self.cache {
                if let Some(cities) = cache.load(country, query)? {
                    info!(country, count = cities.len(), "loaded cities from cache");
                    self.remember(country, cities.clone());
                    return Ok(cities);
                }
            }
        }

        info!(country, source = self.primary.label(), "discovering cities");
        let mut eligible = match self.primary.discover(country, query) {
            Ok(raw) => eligible_cities(raw, query),
            Err(err) => {
                warn!(country, source = self.primary.label(), error = %err, "city query failed");
                Vec::new()
            }
        };

        if eligible.len() < MIN_PRIMARY_RESULTS {
            if let Some(fallback) = &self.fallback {
                info!(country, source = fallback.label(), "using geocoding fallback");
                match fallback.discover(country, query) {
                    Ok(raw) => {
                        let fallback_cities = eligible_cities(raw, query);
                        if fallback_cities.len() > eligible.len() {
                            eligible = fallback_cities;
                        }
                    }
                    Err(err) => {
                        warn!(country, source = fallback.label(), error = %err, "fallback failed");
                    }
                }
            }
        }

        let cities = rank_by_population(eligible, query.max_cities);
        if cities.is_empty() {
            return Err(Error::NoCitiesDiscovered {
                country: country.to_string(),
            });
        }

        info!(country, count = cities.len(), "discovered cities");

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.store(country, query, &cities) {
                warn!(country, error = %err, "failed to write discovery cache");
            }
        }

        self.remember(country, cities.clone());
        Ok(cities)
    }

    /// Discover every country in order, returning the combined city list.
    pub fn discover_all(
        &mut self,
        countries: &[String],
        query: &DiscoveryQuery,
    ) -> Result<Vec<City>> {
        let mut all = Vec::new();
        for country in countries {
            all.extend(self.discover(country, query)?);
        }
        Ok(all)
    }

    fn remember(&mut self, country: &str, cities: Vec<City>) {
        self.discovered.push(CountryCities {
            country: country.to_string(),
            cities,
        });
    }
}

/// Population-qualified cities with valid coordinates, unique by name.
fn eligible_cities(raw: Vec<City>, query: &DiscoveryQuery) -> Vec<City> {
    let eligible = raw
        .into_iter()
        .filter(|city| city.population >= query.min_population)
        .filter(|city| city.coordinates().is_valid())
        .collect::<Vec<_>>();
    dedup_by_name(eligible)
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "euroroute-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/euroroute"
    )
}
