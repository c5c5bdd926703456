//! Subcommand handlers.
//!
//! `main.rs` parses arguments and dispatches here. Each handler loads the
//! effective configuration through [`CommandContext`], drives the library, and
//! renders the result in the selected [`OutputFormat`].

pub mod discover;
pub mod plan;
pub mod route;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};

use euroroute_lib::{Automation, AutomationConfig, CityDiscovery};

use crate::output::OutputFormat;

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// JSON config file to start from instead of the built-in defaults.
    pub config: Option<PathBuf>,
    /// Output directory override.
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Ignore cached discovery results.
    pub refresh: bool,
}

impl CommandContext {
    /// Defaults, then the config file, then `--output-dir`.
    pub fn load_config(&self) -> Result<AutomationConfig> {
        let mut config = match &self.config {
            Some(path) => AutomationConfig::from_path(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => AutomationConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn automation(&self) -> Result<Automation> {
        let discovery = CityDiscovery::from_env()
            .context("failed to configure city discovery")?
            .refresh(self.refresh);
        Ok(Automation::new(discovery))
    }
}
