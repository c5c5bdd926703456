use std::fmt;

use serde::Serialize;

use crate::geo::round2;
use crate::routes::Route;

/// Per-kilometre component of the base fare, in euros.
pub const PRICE_PER_KM: f64 = 0.08;
/// Fixed component of the base fare, in euros.
pub const BASE_FARE: f64 = 5.0;
/// Premium fare as a multiple of the base fare.
pub const PREMIUM_MULTIPLIER: f64 = 1.3;

/// Market segment a route competes in, by distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    Regional,
    National,
    International,
}

impl MarketPosition {
    pub fn for_distance(distance_km: f64) -> Self {
        if distance_km < 200.0 {
            MarketPosition::Regional
        } else if distance_km < 500.0 {
            MarketPosition::National
        } else {
            MarketPosition::International
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketPosition::Regional => "Regional",
            MarketPosition::National => "National",
            MarketPosition::International => "International",
        }
    }
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fares for a single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub route_id: String,
    pub label: String,
    pub distance_km: f64,
    pub base_price: f64,
    pub premium_price: f64,
    pub market_position: MarketPosition,
}

impl PriceQuote {
    pub fn for_route(route: &Route) -> Self {
        let base_price = round2(route.distance_km * PRICE_PER_KM + BASE_FARE);
        Self {
            route_id: route.id.clone(),
            label: route.label(),
            distance_km: route.distance_km,
            base_price,
            premium_price: round2(base_price * PREMIUM_MULTIPLIER),
            market_position: MarketPosition::for_distance(route.distance_km),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;

    #[test]
    fn prices_scale_with_distance() {
        let route = Route::between(
            "EUR_001",
            City::new("Paris", "France", 48.8566, 2.3522),
            City::new("Lyon", "France", 45.764, 4.8357),
        )
        .expect("distinct");
        let quote = PriceQuote::for_route(&route);
        assert_eq!(quote.distance_km, 391.5);
        assert_eq!(quote.base_price, 36.32);
        assert_eq!(quote.premium_price, 47.22);
        assert_eq!(quote.market_position, MarketPosition::National);
        assert_eq!(quote.label, "Paris → Lyon");
    }

    #[test]
    fn market_position_boundaries() {
        assert_eq!(MarketPosition::for_distance(199.9), MarketPosition::Regional);
        assert_eq!(MarketPosition::for_distance(200.0), MarketPosition::National);
        assert_eq!(MarketPosition::for_distance(499.9), MarketPosition::National);
        assert_eq!(
            MarketPosition::for_distance(500.0),
            MarketPosition::International
        );
    }
}
