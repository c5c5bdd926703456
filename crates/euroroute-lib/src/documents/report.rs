use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use tracing::debug;

use super::sheet::{bold, title_format, write_header_row};
use crate::error::Result;
use crate::routes::Route;

const HEADERS: [&str; 6] = [
    "Route ID",
    "Origin",
    "Destination",
    "Distance (km)",
    "Travel Time",
    "Type",
];
const HEADER_ROW: u32 = 11;
const COLUMN_WIDTH: f64 = 20.0;

/// Discovery counters shown at the top of the analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub countries: usize,
    pub cities: usize,
    pub routes_generated: usize,
    pub routes_processed: usize,
    pub generated_at: String,
}

/// Local wall-clock time formatted for report headers.
pub fn report_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Write the analysis workbook: discovery statistics followed by one row per
/// processed route.
pub fn write_analysis_workbook(
    stats: &AnalysisStats,
    processed: &[Route],
    path: &Path,
) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Route_Analysis")?;

    worksheet.write_string_with_format(
        0,
        0,
        "EUROPEAN ROUTE AUTOMATION - COMPREHENSIVE ANALYSIS",
        &title_format(16.0),
    )?;
    worksheet.write_string_with_format(2, 0, "DISCOVERY STATISTICS:", &bold())?;
    worksheet.write_string(3, 0, format!("Countries analyzed: {}", stats.countries))?;
    worksheet.write_string(4, 0, format!("Cities discovered: {}", stats.cities))?;
    worksheet.write_string(5, 0, format!("Routes generated: {}", stats.routes_generated))?;
    worksheet.write_string(6, 0, format!("Routes processed: {}", stats.routes_processed))?;
    worksheet.write_string(7, 0, format!("Automation date: {}", stats.generated_at))?;
    worksheet.write_string_with_format(9, 0, "PROCESSED ROUTES:", &bold())?;

    write_header_row(worksheet, HEADER_ROW, &HEADERS, COLUMN_WIDTH)?;

    for (row, route) in (HEADER_ROW + 1..).zip(processed) {
        worksheet.write_string(row, 0, route.id.as_str())?;
        worksheet.write_string(row, 1, route.origin.name.as_str())?;
        worksheet.write_string(row, 2, route.destination.name.as_str())?;
        worksheet.write_number(row, 3, route.distance_km)?;
        worksheet.write_string(row, 4, route.journey().formatted())?;
        worksheet.write_string(row, 5, route.kind.label())?;
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    debug!(path = %path.display(), routes = processed.len(), "wrote analysis report");
    Ok(path.to_path_buf())
}

#[derive(Debug, Serialize)]
struct RouteRecord<'a> {
    id: &'a str,
    origin: &'a str,
    origin_country: &'a str,
    destination: &'a str,
    destination_country: &'a str,
    distance_km: f64,
    travel_time: String,
    kind: &'static str,
}

/// Dump every generated route, processed or not, as CSV.
pub fn write_routes_csv(routes: &[Route], path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for route in routes {
        writer.serialize(RouteRecord {
            id: &route.id,
            origin: &route.origin.name,
            origin_country: &route.origin.country,
            destination: &route.destination.name,
            destination_country: &route.destination.country,
            distance_km: route.distance_km,
            travel_time: route.journey().formatted(),
            kind: route.kind.label(),
        })?;
    }
    writer.flush()?;
    debug!(path = %path.display(), routes = routes.len(), "wrote route csv");
    Ok(path.to_path_buf())
}
