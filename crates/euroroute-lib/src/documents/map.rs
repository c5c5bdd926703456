//! Self-contained Leaflet maps, one per route.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::routes::Route;

const DEFAULT_ZOOM: u8 = 6;
const LINE_WEIGHT: u8 = 4;
const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Debug, Serialize)]
struct MapMarker {
    position: [f64; 2],
    color: &'static str,
    popup: String,
}

#[derive(Debug, Serialize)]
struct MapData {
    center: [f64; 2],
    zoom: u8,
    markers: Vec<MapMarker>,
    line: MapLine,
}

#[derive(Debug, Serialize)]
struct MapLine {
    points: Vec<[f64; 2]>,
    color: &'static str,
    weight: u8,
    popup: String,
}

fn map_data(route: &Route) -> MapData {
    let origin = route.origin.coordinates();
    let destination = route.destination.coordinates();
    let center = origin.midpoint(&destination);
    let origin_point = [origin.latitude, origin.longitude];
    let destination_point = [destination.latitude, destination.longitude];

    MapData {
        center: [center.latitude, center.longitude],
        zoom: DEFAULT_ZOOM,
        markers: vec![
            MapMarker {
                position: origin_point,
                color: "green",
                popup: format!(
                    "<b>{}</b><br>Origin<br>Route: {}",
                    escape_html(&route.origin.name),
                    escape_html(&route.id)
                ),
            },
            MapMarker {
                position: destination_point,
                color: "red",
                popup: format!(
                    "<b>{}</b><br>Destination<br>Distance: {} km",
                    escape_html(&route.destination.name),
                    route.distance_km
                ),
            },
        ],
        line: MapLine {
            points: vec![origin_point, destination_point],
            color: "blue",
            weight: LINE_WEIGHT,
            popup: format!("Route {}: {} km", escape_html(&route.id), route.distance_km),
        },
    }
}

/// Render the HTML document for `route`.
pub fn render_route_map(route: &Route) -> Result<String> {
    let data = serde_json::to_string(&map_data(route))?
        // keep the JSON inert inside <script>
        .replace("</", "<\\/");
    let title = escape_html(&format!("{} - {}", route.id, route.label()));

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
for (const marker of data.markers) {{
  L.circleMarker(marker.position, {{ radius: 9, color: marker.color, fillColor: marker.color, fillOpacity: 0.8 }})
    .bindPopup(marker.popup)
    .addTo(map);
}}
L.polyline(data.line.points, {{ color: data.line.color, weight: data.line.weight }})
  .bindPopup(data.line.popup)
  .addTo(map);
</script>
</body>
</html>
"#
    ))
}

/// Write the map for `route` to `path`, creating parent directories.
pub fn write_route_map(route: &Route, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_route_map(route)?)?;
    debug!(route = %route.id, path = %path.display(), "wrote route map");
    Ok(path.to_path_buf())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
