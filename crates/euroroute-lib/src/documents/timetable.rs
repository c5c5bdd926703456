//! Timetable workbooks: one per route, plus a combined workbook with one
//! sheet per route.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::debug;

use super::sheet::{title_format, write_header_row};
use crate::error::Result;
use crate::routes::Route;
use crate::schedule::Timetable;

const HEADERS: [&str; 5] = ["Service", "Departure", "Arrival", "Duration", "Capacity"];
const HEADER_ROW: u32 = 3;
const COLUMN_WIDTH: f64 = 18.0;
const MAX_SHEET_NAME: usize = 31;

/// Worksheet name for a route, e.g. `Route_EUR_001`.
///
/// Characters Excel forbids in sheet names are replaced and the result is
/// capped at 31 characters.
pub fn sheet_name(route_id: &str) -> String {
    format!("Route_{route_id}")
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            _ => c,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}

fn fill_sheet(worksheet: &mut Worksheet, route: &Route, timetable: &Timetable) -> Result<()> {
    let journey = route.journey();
    worksheet.write_string_with_format(
        0,
        0,
        format!("EUROPEAN ROUTE TIMETABLE - {}", route.id),
        &title_format(14.0),
    )?;
    worksheet.write_string(
        1,
        0,
        format!(
            "{} | {} km | {}",
            route.label(),
            route.distance_km,
            journey.formatted()
        ),
    )?;

    write_header_row(worksheet, HEADER_ROW, &HEADERS, COLUMN_WIDTH)?;

    for (row, entry) in (HEADER_ROW + 1..).zip(&timetable.entries) {
        let departure = entry
            .departure()
            .map(|stop| stop.time.display())
            .unwrap_or_default();
        let arrival = entry
            .arrival()
            .map(|stop| stop.time.display())
            .unwrap_or_default();
        worksheet.write_string(row, 0, entry.service.as_str())?;
        worksheet.write_string(row, 1, departure)?;
        worksheet.write_string(row, 2, arrival)?;
        worksheet.write_string(row, 3, entry.duration_label())?;
        worksheet.write_number(row, 4, entry.capacity)?;
    }
    Ok(())
}

fn add_route_sheet(workbook: &mut Workbook, route: &Route) -> Result<String> {
    let name = sheet_name(&route.id);
    let timetable = Timetable::for_route(route);
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name.as_str())?;
    fill_sheet(worksheet, route, &timetable)?;
    Ok(name)
}

fn save(workbook: &mut Workbook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    Ok(())
}

/// Write a single-sheet timetable workbook for `route`.
pub fn write_route_timetable(route: &Route, path: &Path) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    add_route_sheet(&mut workbook, route)?;
    save(&mut workbook, path)?;
    debug!(route = %route.id, path = %path.display(), "wrote route timetable");
    Ok(path.to_path_buf())
}

/// Write one workbook holding a timetable sheet per route, in order.
///
/// Returns the sheet names written.
pub fn write_all_timetables(routes: &[Route], path: &Path) -> Result<Vec<String>> {
    let mut workbook = Workbook::new();
    let mut names = Vec::with_capacity(routes.len());
    for route in routes {
        names.push(add_route_sheet(&mut workbook, route)?);
    }
    save(&mut workbook, path)?;
    debug!(sheets = names.len(), path = %path.display(), "wrote combined timetables");
    Ok(names)
}
