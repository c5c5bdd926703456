//! Artifact writers and the output directory layout they share.
//!
//! ```text
//! outputs/
//!   maps/{id}_route_map.html
//!   timetables/{id}_timetable.xlsx
//!   timetables/all_timetables.xlsx
//!   reports/european_route_analysis.xlsx
//!   reports/generated_routes.csv
//!   pricing/european_pricing_analysis.xlsx
//! ```

pub mod map;
pub mod pricing;
pub mod report;
mod sheet;
pub mod timetable;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use map::{render_route_map, write_route_map};
pub use pricing::write_pricing_workbook;
pub use report::{write_analysis_workbook, write_routes_csv, AnalysisStats};
pub use timetable::{sheet_name, write_all_timetables, write_route_timetable};

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Resolves artifact paths under an output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.root.join("maps")
    }

    pub fn timetables_dir(&self) -> PathBuf {
        self.root.join("timetables")
    }

    pub fn pricing_dir(&self) -> PathBuf {
        self.root.join("pricing")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// Create every artifact directory.
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [
            self.maps_dir(),
            self.timetables_dir(),
            self.pricing_dir(),
            self.reports_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn route_map(&self, route_id: &str) -> PathBuf {
        self.maps_dir().join(format!("{route_id}_route_map.html"))
    }

    pub fn route_timetable(&self, route_id: &str) -> PathBuf {
        self.timetables_dir()
            .join(format!("{route_id}_timetable.xlsx"))
    }

    pub fn all_timetables(&self) -> PathBuf {
        self.timetables_dir().join("all_timetables.xlsx")
    }

    pub fn analysis_report(&self) -> PathBuf {
        self.reports_dir().join("european_route_analysis.xlsx")
    }

    pub fn routes_csv(&self) -> PathBuf {
        self.reports_dir().join("generated_routes.csv")
    }

    pub fn pricing_report(&self) -> PathBuf {
        self.pricing_dir().join("european_pricing_analysis.xlsx")
    }
}
