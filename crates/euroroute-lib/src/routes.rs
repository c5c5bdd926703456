use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::city::{City, CityIndex};
use crate::error::{Error, Result};
use crate::geo::round1;
use crate::journey::JourneyEstimate;

/// Prefix of generated route identifiers.
pub const ROUTE_ID_PREFIX: &str = "EUR";

/// Whether a route crosses a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Domestic,
    International,
}

impl RouteKind {
    pub fn between(origin: &City, destination: &City) -> Self {
        if origin.country.eq_ignore_ascii_case(&destination.country) {
            RouteKind::Domestic
        } else {
            RouteKind::International
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteKind::Domestic => "Domestic",
            RouteKind::International => "International",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An origin/destination pair with its derived distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub id: String,
    pub origin: City,
    pub destination: City,
    /// Great-circle distance in kilometres, rounded to 0.1 km.
    pub distance_km: f64,
    pub kind: RouteKind,
}

impl Route {
    /// Pair two cities under `id`. Fails when both endpoints share a name.
    pub fn between(id: impl Into<String>, origin: City, destination: City) -> Result<Self> {
        if origin.same_name(&destination) {
            return Err(Error::SameEndpoints {
                name: origin.name.clone(),
            });
        }
        let distance_km = round1(origin.distance_km(&destination));
        let kind = RouteKind::between(&origin, &destination);
        Ok(Self {
            id: id.into(),
            origin,
            destination,
            distance_km,
            kind,
        })
    }

    pub fn journey(&self) -> JourneyEstimate {
        JourneyEstimate::for_distance(self.distance_km)
    }

    /// `"Origin → Destination"` label used in reports.
    pub fn label(&self) -> String {
        format!("{} → {}", self.origin.name, self.destination.name)
    }
}

/// Format the `n`th (1-based) route identifier, e.g. `EUR_007`.
pub fn route_id(n: usize) -> String {
    format!("{ROUTE_ID_PREFIX}_{n:03}")
}

/// Pairing heuristics for [`build_routes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteConfig {
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    pub max_routes: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            min_distance_km: 100.0,
            max_distance_km: 800.0,
            max_routes: 50,
        }
    }
}

impl RouteConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidRouteConfig {
                message: message.to_string(),
            })
        };
        if !self.min_distance_km.is_finite() || !self.max_distance_km.is_finite() {
            return invalid("distance bounds must be finite");
        }
        if self.min_distance_km < 0.0 {
            return invalid("minimum distance must not be negative");
        }
        if self.min_distance_km > self.max_distance_km {
            return invalid("minimum distance exceeds maximum distance");
        }
        if self.max_routes == 0 {
            return invalid("at least one route must be requested");
        }
        Ok(())
    }

    fn accepts(&self, distance_km: f64) -> bool {
        (self.min_distance_km..=self.max_distance_km).contains(&distance_km)
    }
}

/// Pair cities into routes.
///
/// Enumerates unordered pairs in input order (`i < j`) and keeps those whose
/// unrounded distance falls inside the configured window, stopping at
/// `max_routes`. Cities repeated by `(name, country)` are considered once and
/// pairs of same-named cities are never formed.
pub fn build_routes(cities: &[City], config: &RouteConfig) -> Result<Vec<Route>> {
    config.validate()?;

    let mut seen = HashSet::new();
    let unique = cities
        .iter()
        .filter(|city| seen.insert((city.name.to_lowercase(), city.country.to_lowercase())))
        .collect::<Vec<_>>();

    info!(cities = unique.len(), "generating routes");

    let mut routes = Vec::new();
    for (i, origin) in unique.iter().enumerate() {
        for destination in &unique[i + 1..] {
            if origin.same_name(destination) {
                continue;
            }
            if !config.accepts(origin.distance_km(destination)) {
                continue;
            }

            let route = Route::between(
                route_id(routes.len() + 1),
                (*origin).clone(),
                (*destination).clone(),
            )?;
            debug!(
                id = %route.id,
                origin = %route.origin.name,
                destination = %route.destination.name,
                distance = route.distance_km,
                "route generated"
            );
            routes.push(route);

            if routes.len() >= config.max_routes {
                info!(routes = routes.len(), "route limit reached");
                return Ok(routes);
            }
        }
    }

    info!(routes = routes.len(), "generated routes");
    Ok(routes)
}

/// Build the single route between two named cities of `index`.
pub fn plan_route(index: &CityIndex, id: &str, origin: &str, destination: &str) -> Result<Route> {
    let origin = index.find(origin)?.clone();
    let destination = index.find(destination)?.clone();
    Route::between(id, origin, destination)
}
