use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::debug;

use super::sheet::{title_format, write_header_row};
use crate::error::Result;
use crate::pricing::PriceQuote;

const HEADERS: [&str; 5] = [
    "Route",
    "Distance (km)",
    "Base Price (€)",
    "Premium Price (€)",
    "Market Position",
];
const HEADER_ROW: u32 = 3;
const COLUMN_WIDTH: f64 = 22.0;

/// Write the competitive pricing workbook, one row per quote.
pub fn write_pricing_workbook(
    quotes: &[PriceQuote],
    generated_at: &str,
    path: &Path,
) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Pricing_Analysis")?;

    worksheet.write_string_with_format(
        0,
        0,
        "EUROPEAN ROUTES - COMPETITIVE PRICING ANALYSIS",
        &title_format(14.0),
    )?;
    worksheet.write_string(1, 0, format!("Generated: {generated_at}"))?;

    write_header_row(worksheet, HEADER_ROW, &HEADERS, COLUMN_WIDTH)?;

    for (row, quote) in (HEADER_ROW + 1..).zip(quotes) {
        worksheet.write_string(row, 0, quote.label.as_str())?;
        worksheet.write_number(row, 1, quote.distance_km)?;
        worksheet.write_number(row, 2, quote.base_price)?;
        worksheet.write_number(row, 3, quote.premium_price)?;
        worksheet.write_string(row, 4, quote.market_position.label())?;
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    debug!(path = %path.display(), quotes = quotes.len(), "wrote pricing report");
    Ok(path.to_path_buf())
}
