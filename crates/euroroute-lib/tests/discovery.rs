mod common;

use euroroute_lib::discovery::{DiscoveryCache, FixtureSource};
use euroroute_lib::{CityDiscovery, DiscoveryQuery, Error};

use common::{cities_fixture, default_query, fixture_discovery};

#[test]
fn fixture_discovery_filters_and_ranks() {
    let mut discovery = fixture_discovery();
    let cities = discovery
        .discover("France", &default_query())
        .expect("France has cities");

    let names = cities.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names.first(), Some(&"Paris"));
    assert!(!names.contains(&"Annecy"), "below population threshold");
    assert_eq!(cities.len(), 9);
    assert!(cities
        .windows(2)
        .all(|pair| pair[0].population >= pair[1].population));
}

#[test]
fn max_cities_truncates_after_ranking() {
    let mut discovery = fixture_discovery();
    let cities = discovery
        .discover("Spain", &DiscoveryQuery::new(150_000).max_cities(3))
        .expect("Spain has cities");
    let names = cities.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Madrid", "Barcelona", "Valencia"]);
}

#[test]
fn country_lookup_ignores_case() {
    let mut discovery = fixture_discovery();
    let cities = discovery
        .discover("germany", &default_query())
        .expect("case-insensitive match");
    assert_eq!(cities.len(), 5);
    assert!(cities.iter().all(|c| c.country == "germany"));
}

#[test]
fn unknown_country_fails() {
    let mut discovery = fixture_discovery();
    let err = discovery
        .discover("Atlantis", &default_query())
        .expect_err("no cities");
    assert!(matches!(err, Error::NoCitiesDiscovered { .. }));
}

#[test]
fn discover_all_preserves_country_order() {
    let mut discovery = fixture_discovery();
    let countries = vec!["Spain".to_string(), "France".to_string()];
    let cities = discovery
        .discover_all(&countries, &default_query())
        .expect("both countries discovered");

    assert_eq!(cities.len(), 7 + 9);
    assert_eq!(cities[0].name, "Madrid");
    assert_eq!(cities[7].name, "Paris");
    assert_eq!(discovery.discovered().len(), 2);
    assert_eq!(discovery.all_cities(), cities);
}

#[test]
fn cache_round_trip_skips_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    let query = default_query();

    let mut first = fixture_discovery().with_cache(DiscoveryCache::new(dir.path()));
    let discovered = first.discover("France", &query).expect("discovered");
    let entry = DiscoveryCache::new(dir.path()).entry_path("France", &query);
    assert!(entry.exists(), "cache entry written");

    // An empty source can only succeed through the cache.
    let empty = FixtureSource::from_cities(Vec::new());
    let mut second =
        CityDiscovery::new(Box::new(empty)).with_cache(DiscoveryCache::new(dir.path()));
    let cached = second.discover("France", &query).expect("served from cache");
    assert_eq!(cached, discovered);

    let empty = FixtureSource::from_cities(Vec::new());
    let mut refreshed = CityDiscovery::new(Box::new(empty))
        .with_cache(DiscoveryCache::new(dir.path()))
        .refresh(true);
    assert!(refreshed.discover("France", &query).is_err());
}

#[test]
fn corrupt_cache_entry_is_ignored() {
    let dir = tempfile::tempdir().expect("temp dir");
    let query = default_query();
    let cache = DiscoveryCache::new(dir.path());
    std::fs::write(cache.entry_path("France", &query), "{not json").expect("write");

    let mut discovery = fixture_discovery().with_cache(cache);
    let cities = discovery.discover("France", &query).expect("falls through");
    assert_eq!(cities[0].name, "Paris");
}

#[test]
fn missing_fixture_reports_path() {
    let missing = cities_fixture().with_file_name("does-not-exist.json");
    let err = FixtureSource::from_path(&missing).expect_err("missing file");
    assert!(matches!(err, Error::CitySourceLoad { ref path, .. } if path == &missing));
}
