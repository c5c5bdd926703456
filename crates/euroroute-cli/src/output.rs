//! Output formatting for command results.
//!
//! Every command result can be rendered as human-readable text or as pretty
//! JSON on stdout. Logging goes to stderr, so JSON output stays parseable.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use euroroute_lib::{CountryCities, Route, RouteKind, RoutePlanning, RunSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }

    pub fn render_cities(self, discovered: &[CountryCities]) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(discovered),
            OutputFormat::Text => print_text(&cities_text(discovered, &ColorPalette::detect())),
        }
    }

    pub fn render_plan(self, plan: &RoutePlanning) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(plan),
            OutputFormat::Text => print_text(&plan_text(plan, &ColorPalette::detect())),
        }
    }

    pub fn render_run(self, summary: &RunSummary) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(summary),
            OutputFormat::Text => print_text(&run_text(summary, &ColorPalette::detect())),
        }
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: Duration) {
    let palette = ColorPalette::detect();
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };
    println!("\n{}Completed in {}{}", palette.gray, time_str, palette.reset);
}

/// Write `value` as pretty JSON to stdout.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn print_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

fn route_line(out: &mut String, route: &Route, p: &ColorPalette) {
    let kind_color = match route.kind {
        RouteKind::Domestic => p.green,
        RouteKind::International => p.orange,
    };
    let _ = writeln!(
        out,
        "{}{}{}  {}{}{} → {}{}{}  {} km  {}  {}{}{}",
        p.cyan,
        route.id,
        p.reset,
        p.white_bold,
        route.origin.name,
        p.reset,
        p.white_bold,
        route.destination.name,
        p.reset,
        route.distance_km,
        route.journey().formatted(),
        kind_color,
        route.kind.label(),
        p.reset
    );
}

fn cities_text(discovered: &[CountryCities], p: &ColorPalette) -> String {
    let mut out = String::new();
    for entry in discovered {
        let _ = writeln!(out, "{} ({} cities):", entry.country, entry.cities.len());
        for city in &entry.cities {
            let _ = writeln!(
                out,
                " - {}{}{} {}({:.4}, {:.4}) pop. {}{}",
                p.white_bold,
                city.name,
                p.reset,
                p.gray,
                city.latitude,
                city.longitude,
                format_with_separators(city.population),
                p.reset
            );
        }
    }
    out
}

fn plan_text(plan: &RoutePlanning, p: &ColorPalette) -> String {
    let mut out = format!(
        "{} routes from {} cities in {} countries:\n",
        plan.routes.len(),
        plan.cities.len(),
        plan.countries
    );
    for route in &plan.routes {
        route_line(&mut out, route, p);
    }
    out
}

fn run_text(summary: &RunSummary, p: &ColorPalette) -> String {
    let mut out = format!(
        "Processed {} of {} generated routes ({} cities, {} countries):\n",
        summary.routes_processed,
        summary.total_routes_generated,
        summary.cities_discovered,
        summary.countries_discovered
    );
    for processed in &summary.processed {
        route_line(&mut out, &processed.route, p);
        let _ = writeln!(
            out,
            "       {}map:{} {}",
            p.gray,
            p.reset,
            processed.map.display()
        );
        let _ = writeln!(
            out,
            "       {}timetable:{} {}",
            p.gray,
            p.reset,
            processed.timetable.display()
        );
    }

    let reports = &summary.reports;
    let _ = writeln!(out, "\nReports written to {}:", summary.output_dir.display());
    for path in [
        &reports.all_timetables,
        &reports.analysis,
        &reports.routes_csv,
        &reports.pricing,
    ] {
        let _ = writeln!(out, " {}✓{} {}", p.green, p.reset, path.display());
    }
    out
}
