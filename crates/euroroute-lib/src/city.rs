use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Population assumed for a `place=city` node without a usable population tag.
pub const ESTIMATED_CITY_POPULATION: u64 = 100_000;
/// Population assumed for a `place=town` node without a usable population tag.
pub const ESTIMATED_TOWN_POPULATION: u64 = 50_000;

/// OpenStreetMap settlement classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    #[default]
    City,
    Town,
}

impl PlaceKind {
    /// Parse an OSM `place` tag value.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "city" => Some(PlaceKind::City),
            "town" => Some(PlaceKind::Town),
            _ => None,
        }
    }

    /// Population used when the source carries none.
    pub fn estimated_population(self) -> u64 {
        match self {
            PlaceKind::City => ESTIMATED_CITY_POPULATION,
            PlaceKind::Town => ESTIMATED_TOWN_POPULATION,
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceKind::City => f.write_str("city"),
            PlaceKind::Town => f.write_str("town"),
        }
    }
}

/// A discovered settlement. Immutable once discovery returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub place: PlaceKind,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
            population: 0,
            place: PlaceKind::City,
        }
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_place(mut self, place: PlaceKind) -> Self {
        self.place = place;
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Great-circle distance to `other` in kilometres (unrounded).
    pub fn distance_km(&self, other: &City) -> f64 {
        self.coordinates().distance_km(&other.coordinates())
    }

    /// Case-insensitive name comparison.
    pub fn same_name(&self, other: &City) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// Keep the first city for every distinct name, preserving order.
pub fn dedup_by_name(cities: Vec<City>) -> Vec<City> {
    let mut seen = std::collections::HashSet::new();
    cities
        .into_iter()
        .filter(|city| seen.insert(city.name.clone()))
        .collect()
}

/// Sort by population descending and truncate to `max_cities`.
///
/// The sort is stable so cities with equal population keep discovery order.
pub fn rank_by_population(mut cities: Vec<City>, max_cities: usize) -> Vec<City> {
    cities.sort_by(|a, b| b.population.cmp(&a.population));
    cities.truncate(max_cities);
    cities
}

/// Lookup table over a set of discovered cities.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    cities: Vec<City>,
}

impl CityIndex {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Find a city by case-insensitive name.
    ///
    /// Returns [`Error::UnknownCity`] with up to three fuzzy suggestions when
    /// no city matches.
    pub fn find(&self, name: &str) -> Result<&City> {
        let needle = name.trim().to_lowercase();
        if let Some(city) = self
            .cities
            .iter()
            .find(|city| city.name.to_lowercase() == needle)
        {
            return Ok(city);
        }

        Err(Error::UnknownCity {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(&needle, 3),
        })
    }

    fn fuzzy_matches(&self, needle: &str, limit: usize) -> Vec<String> {
        let mut scored = self
            .cities
            .iter()
            .map(|city| {
                let score = strsim::jaro_winkler(needle, &city.name.to_lowercase());
                (score, city.name.clone())
            })
            .filter(|(score, _)| *score >= 0.8)
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.dedup_by(|a, b| a.1 == b.1);
        scored.into_iter().take(limit).map(|(_, name)| name).collect()
    }
}
