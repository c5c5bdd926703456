use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::DiscoveryQuery;
use crate::city::City;
use crate::error::{Error, Result};

const CACHE_DIR_NAME: &str = "euroroute";
pub const CACHE_DIR_ENV: &str = "EUROROUTE_CACHE_DIR";

/// JSON files holding previously discovered cities, one per country and query.
#[derive(Debug, Clone)]
pub struct DiscoveryCache {
    dir: PathBuf,
}

impl DiscoveryCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `EUROROUTE_CACHE_DIR` when set, otherwise the platform cache directory.
    pub fn default_location() -> Result<Self> {
        if let Some(override_dir) = env::var_os(CACHE_DIR_ENV) {
            return Ok(Self::new(PathBuf::from(override_dir)));
        }

        let dirs = BaseDirs::new().ok_or(Error::CacheDirsUnavailable)?;
        Ok(Self::new(dirs.cache_dir().join(CACHE_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, country: &str, query: &DiscoveryQuery) -> PathBuf {
        self.dir.join(format!(
            "{}-p{}-n{}.json",
            sanitize_component(&country.trim().to_lowercase()),
            query.min_population,
            query.max_cities
        ))
    }

    /// Cached cities for `country`, or `None` when absent or unreadable.
    pub fn load(&self, country: &str, query: &DiscoveryQuery) -> Result<Option<Vec<City>>> {
        let path = self.entry_path(country, query);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str::<Vec<City>>(&raw) {
            Ok(cities) if !cities.is_empty() => {
                debug!(path = %path.display(), "discovery cache hit");
                Ok(Some(cities))
            }
            Ok(_) => Ok(None),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring corrupt discovery cache entry");
                Ok(None)
            }
        }
    }

    /// Atomically replace the cache entry for `country`.
    pub fn store(&self, country: &str, query: &DiscoveryQuery, cities: &[City]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(country, query);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), cities)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|err| err.error)?;
        debug!(path = %path.display(), count = cities.len(), "stored discovery cache entry");
        Ok(())
    }
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}
