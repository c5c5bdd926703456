//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use euroroute_lib::discovery::FixtureSource;
use euroroute_lib::{CityDiscovery, DiscoveryQuery};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the bundled city list.
pub fn cities_fixture() -> PathBuf {
    fixtures_dir().join("cities.json")
}

/// Discovery backed by the fixture city list, with no cache.
pub fn fixture_discovery() -> CityDiscovery {
    let source = FixtureSource::from_path(&cities_fixture()).expect("load fixture cities.json");
    CityDiscovery::new(Box::new(source))
}

/// Query used by the default automation run.
#[allow(dead_code)]
pub fn default_query() -> DiscoveryQuery {
    DiscoveryQuery::new(150_000)
}
