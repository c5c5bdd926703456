use criterion::{criterion_group, criterion_main, Criterion};
use euroroute_lib::discovery::FixtureSource;
use euroroute_lib::{build_routes, City, CityDiscovery, DiscoveryQuery, RouteConfig, Timetable};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/cities.json")
}

static CITIES: Lazy<Vec<City>> = Lazy::new(|| {
    let source = FixtureSource::from_path(&fixture_path()).expect("fixture loads");
    let mut discovery = CityDiscovery::new(Box::new(source));
    let countries = ["France", "Spain", "Germany", "Netherlands"].map(String::from);
    discovery
        .discover_all(&countries, &DiscoveryQuery::new(150_000))
        .expect("fixture countries")
});

fn benchmark_route_generation(c: &mut Criterion) {
    let cities = &*CITIES;

    c.bench_function("build_routes_uncapped", |b| {
        let config = RouteConfig {
            min_distance_km: 0.0,
            max_distance_km: 5_000.0,
            max_routes: usize::MAX,
        };
        b.iter(|| {
            let routes = build_routes(cities, &config).expect("routes");
            black_box(routes.len())
        });
    });

    c.bench_function("build_routes_default_window", |b| {
        let config = RouteConfig {
            min_distance_km: 150.0,
            max_distance_km: 700.0,
            max_routes: 30,
        };
        b.iter(|| {
            let routes = build_routes(cities, &config).expect("routes");
            black_box(routes.len())
        });
    });

    c.bench_function("timetable_for_route", |b| {
        let config = RouteConfig::default();
        let routes = build_routes(cities, &config).expect("routes");
        b.iter(|| {
            for route in &routes {
                black_box(Timetable::for_route(route));
            }
        });
    });
}

criterion_group!(benches, benchmark_route_generation);
criterion_main!(benches);
