mod common;

use euroroute_lib::{
    build_routes, plan_route, CityIndex, Error, MarketPosition, PriceQuote, RouteConfig,
    RouteKind, Timetable,
};

use common::{default_query, fixture_discovery};

fn france_and_spain() -> Vec<euroroute_lib::City> {
    let mut discovery = fixture_discovery();
    discovery
        .discover_all(&["France".to_string(), "Spain".to_string()], &default_query())
        .expect("fixture countries")
}

#[test]
fn default_window_pairs_in_discovery_order() {
    let cities = france_and_spain();
    let config = RouteConfig {
        min_distance_km: 150.0,
        max_distance_km: 700.0,
        max_routes: 30,
    };
    let routes = build_routes(&cities, &config).expect("routes");

    assert_eq!(routes.len(), 30);
    let first = &routes[0];
    assert_eq!(first.id, "EUR_001");
    assert_eq!(first.origin.name, "Paris");
    assert_eq!(first.destination.name, "Marseille");
    assert_eq!(first.distance_km, 660.5);
    assert_eq!(routes[1].destination.name, "Lyon");
    assert_eq!(routes[29].id, "EUR_030");
    assert!(routes
        .iter()
        .all(|r| (150.0..=700.0).contains(&r.distance_km)));
}

#[test]
fn uncapped_generation_finds_every_pair() {
    let cities = france_and_spain();
    let config = RouteConfig {
        min_distance_km: 150.0,
        max_distance_km: 700.0,
        max_routes: usize::MAX,
    };
    let routes = build_routes(&cities, &config).expect("routes");
    assert_eq!(routes.len(), 66);
    assert!(routes
        .iter()
        .any(|r| r.kind == RouteKind::International));
}

#[test]
fn named_route_resolves_case_and_whitespace() {
    let index = CityIndex::new(france_and_spain());
    let route = plan_route(&index, "EUR_001", "madrid", " Barcelona ").expect("route");
    assert_eq!(route.distance_km, 505.1);
    assert_eq!(route.journey().formatted(), "8h 25m");
    assert_eq!(route.kind, RouteKind::Domestic);

    let quote = PriceQuote::for_route(&route);
    assert_eq!(quote.base_price, 45.41);
    assert_eq!(quote.premium_price, 59.03);
    assert_eq!(quote.market_position, MarketPosition::International);

    let timetable = Timetable::for_route(&route);
    assert_eq!(timetable.entries.len(), 3);
}

#[test]
fn misspelt_city_suggests_alternatives() {
    let index = CityIndex::new(france_and_spain());
    let err = plan_route(&index, "EUR_001", "Pariss", "Lyon").expect_err("unknown");
    match err {
        Error::UnknownCity { suggestions, .. } => {
            assert!(suggestions.iter().any(|s| s == "Paris"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}
