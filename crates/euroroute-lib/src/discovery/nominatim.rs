use std::env;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{build_client, CitySource, DiscoveryQuery};
use crate::city::{City, PlaceKind};
use crate::error::Result;
use crate::geo::Coordinates;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const NOMINATIM_URL_ENV: &str = "EUROROUTE_NOMINATIM_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause between consecutive geocoding requests.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(2);

const MAJOR_CITIES: &[(&str, &[&str])] = &[
    (
        "france",
        &[
            "Paris",
            "Lyon",
            "Marseille",
            "Toulouse",
            "Nice",
            "Nantes",
            "Strasbourg",
            "Montpellier",
        ],
    ),
    (
        "germany",
        &[
            "Berlin",
            "Hamburg",
            "Munich",
            "Cologne",
            "Frankfurt",
            "Stuttgart",
            "Düsseldorf",
            "Dortmund",
        ],
    ),
    (
        "spain",
        &[
            "Madrid",
            "Barcelona",
            "Valencia",
            "Seville",
            "Bilbao",
            "Malaga",
            "Murcia",
            "Las Palmas",
        ],
    ),
    (
        "italy",
        &[
            "Rome", "Milan", "Naples", "Turin", "Palermo", "Genoa", "Bologna", "Florence",
        ],
    ),
    (
        "netherlands",
        &[
            "Amsterdam",
            "Rotterdam",
            "The Hague",
            "Utrecht",
            "Eindhoven",
            "Tilburg",
        ],
    ),
    (
        "belgium",
        &["Brussels", "Antwerp", "Ghent", "Charleroi", "Liège", "Bruges"],
    ),
    (
        "poland",
        &["Warsaw", "Krakow", "Lodz", "Wroclaw", "Poznan", "Gdansk"],
    ),
    ("czech republic", &["Prague", "Brno", "Ostrava", "Plzen"]),
    ("austria", &["Vienna", "Graz", "Linz", "Salzburg", "Innsbruck"]),
    ("portugal", &["Lisbon", "Porto", "Vila Nova de Gaia", "Amadora"]),
    ("switzerland", &["Zurich", "Geneva", "Basel", "Lausanne", "Bern"]),
    ("sweden", &["Stockholm", "Gothenburg", "Malmo", "Uppsala"]),
    ("norway", &["Oslo", "Bergen", "Trondheim", "Stavanger"]),
    ("denmark", &["Copenhagen", "Aarhus", "Odense", "Aalborg"]),
];

/// Built-in list of major cities for `country`, matched case-insensitively.
pub fn major_cities(country: &str) -> Option<&'static [&'static str]> {
    let key = country.trim().to_lowercase();
    MAJOR_CITIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, cities)| *cities)
}

/// Geocodes the built-in major-city list through Nominatim.
///
/// Cities found this way carry no population data; they are reported with
/// the query's minimum population so they survive filtering.
#[derive(Debug, Clone)]
pub struct NominatimSource {
    client: Client,
    endpoint: String,
    interval: Duration,
}

impl NominatimSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(REQUEST_TIMEOUT)?,
            endpoint: endpoint.into(),
            interval: DEFAULT_REQUEST_INTERVAL,
        })
    }

    /// Honour `EUROROUTE_NOMINATIM_URL`, defaulting to the public instance.
    pub fn from_env() -> Result<Self> {
        let endpoint =
            env::var(NOMINATIM_URL_ENV).unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.into());
        Self::new(endpoint)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Resolve a free-form query to the first matching coordinates.
    pub fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        debug!(endpoint = %self.endpoint, query, "geocoding");
        let places = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json::<Vec<NominatimPlace>>()?;
        Ok(first_position(&places))
    }
}

impl CitySource for NominatimSource {
    fn label(&self) -> &'static str {
        "nominatim"
    }

    fn discover(&self, country: &str, query: &DiscoveryQuery) -> Result<Vec<City>> {
        let Some(names) = major_cities(country) else {
            warn!(country, "no built-in city list for country");
            return Ok(Vec::new());
        };

        let mut cities = Vec::new();
        for (idx, name) in names.iter().take(query.max_cities).enumerate() {
            if idx > 0 && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
            match self.geocode(&format!("{name}, {country}")) {
                Ok(Some(position)) => cities.push(
                    City::new(*name, country, position.latitude, position.longitude)
                        .with_population(query.min_population)
                        .with_place(PlaceKind::City),
                ),
                Ok(None) => debug!(city = name, country, "no geocoding match"),
                Err(err) => warn!(city = name, country, error = %err, "geocoding failed"),
            }
        }
        Ok(cities)
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn first_position(places: &[NominatimPlace]) -> Option<Coordinates> {
    places.iter().find_map(|place| {
        let latitude = place.lat.parse().ok()?;
        let longitude = place.lon.parse().ok()?;
        Some(Coordinates::new(latitude, longitude))
    })
}
