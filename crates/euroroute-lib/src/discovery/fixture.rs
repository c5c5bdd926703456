use std::fs;
use std::path::Path;

use super::{CitySource, DiscoveryQuery};
use crate::city::City;
use crate::error::{Error, Result};

/// Points discovery at a local JSON array of cities instead of the network.
pub const CITY_SOURCE_ENV: &str = "EUROROUTE_CITY_SOURCE";

/// In-memory city list, usually loaded from a JSON fixture.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    cities: Vec<City>,
}

impl FixtureSource {
    pub fn from_cities(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| Error::CitySourceLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let cities = serde_json::from_str(&raw).map_err(|err| Error::CitySourceLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

impl CitySource for FixtureSource {
    fn label(&self) -> &'static str {
        "fixture"
    }

    fn discover(&self, country: &str, _query: &DiscoveryQuery) -> Result<Vec<City>> {
        let country = country.trim();
        Ok(self
            .cities
            .iter()
            .filter(|city| city.country.eq_ignore_ascii_case(country))
            .map(|city| City {
                country: country.to_string(),
                ..city.clone()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn loads_and_filters_by_country() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{"name": "Paris", "country": "France", "latitude": 48.8566, "longitude": 2.3522, "population": 2100000}},
                {{"name": "Madrid", "country": "Spain", "latitude": 40.4168, "longitude": -3.7038}}
            ]"#
        )
        .expect("write fixture");

        let source = FixtureSource::from_path(file.path()).expect("fixture loads");
        assert_eq!(source.cities().len(), 2);

        let query = DiscoveryQuery::new(0);
        let spanish = source.discover("spain", &query).expect("discover");
        assert_eq!(spanish.len(), 1);
        assert_eq!(spanish[0].name, "Madrid");
        assert_eq!(spanish[0].country, "spain");
        assert_eq!(spanish[0].population, 0);
    }

    #[test]
    fn malformed_fixture_reports_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write fixture");
        let err = FixtureSource::from_path(file.path()).expect_err("invalid json");
        assert!(matches!(err, Error::CitySourceLoad { .. }));
        assert!(err.to_string().contains("failed to load city source"));
    }
}
