use std::collections::HashMap;
use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{build_client, CitySource, DiscoveryQuery};
use crate::city::{City, PlaceKind};
use crate::error::Result;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const OVERPASS_URL_ENV: &str = "EUROROUTE_OVERPASS_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const QUERY_TIMEOUT_SECS: u32 = 90;

/// Settlement lookup through the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassSource {
    client: Client,
    endpoint: String,
}

impl OverpassSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(REQUEST_TIMEOUT)?,
            endpoint: endpoint.into(),
        })
    }

    /// Honour `EUROROUTE_OVERPASS_URL`, defaulting to the public instance.
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var(OVERPASS_URL_ENV).unwrap_or_else(|_| DEFAULT_OVERPASS_URL.into());
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CitySource for OverpassSource {
    fn label(&self) -> &'static str {
        "overpass"
    }

    fn discover(&self, country: &str, _query: &DiscoveryQuery) -> Result<Vec<City>> {
        let query = build_query(country);
        debug!(endpoint = %self.endpoint, country, "posting overpass query");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()?
            .error_for_status()?;
        let body = response.json::<OverpassResponse>()?;
        Ok(cities_from_response(country, body))
    }
}

/// Overpass QL selecting populated, named cities and towns inside the
/// national (admin level 2) boundary called `country`.
pub fn build_query(country: &str) -> String {
    let country = escape_ql(country);
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n\
         area[\"name\"=\"{country}\"][\"admin_level\"=\"2\"]->.country;\n\
         (\n\
         \x20 node[\"place\"=\"city\"][\"population\"][\"name\"](area.country);\n\
         \x20 node[\"place\"=\"town\"][\"population\"][\"name\"](area.country);\n\
         );\n\
         out center;\n"
    )
}

fn escape_ql(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }
}

pub(crate) fn cities_from_response(country: &str, response: OverpassResponse) -> Vec<City> {
    response
        .elements
        .into_iter()
        .filter_map(|element| {
            let name = element.tags.get("name")?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            let (latitude, longitude) = element.position()?;
            let place = element
                .tags
                .get("place")
                .and_then(|tag| PlaceKind::from_tag(tag))
                .unwrap_or_default();
            let population = element
                .tags
                .get("population")
                .and_then(|raw| parse_population(raw))
                .filter(|population| *population > 0)
                .unwrap_or_else(|| place.estimated_population());

            Some(
                City::new(name, country, latitude, longitude)
                    .with_population(population)
                    .with_place(place),
            )
        })
        .collect()
}

/// Parse an OSM population tag, tolerating digit-group separators.
pub fn parse_population(raw: &str) -> Option<u64> {
    let digits = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '\u{a0}' | '\u{202f}' | '\''))
        .collect::<String>();
    digits.parse().ok()
}
