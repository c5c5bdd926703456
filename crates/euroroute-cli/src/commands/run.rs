//! Run command handler: the full discovery-to-documents pipeline.

use anyhow::{Context, Result};
use clap::Args;

use euroroute_lib::AutomationConfig;

use super::CommandContext;

/// Options that override the loaded configuration for `run` and `plan`.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Country to discover cities in; repeat for several countries.
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,
    /// Number of routes to document.
    #[arg(long)]
    pub routes: Option<usize>,
    /// Minimum city population.
    #[arg(long)]
    pub min_population: Option<u64>,
    /// Minimum route distance in kilometres.
    #[arg(long)]
    pub min_distance: Option<f64>,
    /// Maximum route distance in kilometres.
    #[arg(long)]
    pub max_distance: Option<f64>,
    /// Cap on generated routes (defaults to ten times `--routes`).
    #[arg(long)]
    pub max_routes: Option<usize>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut AutomationConfig) {
        if !self.countries.is_empty() {
            config.countries = self.countries.clone();
        }
        if let Some(routes) = self.routes {
            config.routes = routes;
        }
        if let Some(min_population) = self.min_population {
            config.min_population = min_population;
        }
        if let Some(min_distance) = self.min_distance {
            config.min_distance_km = min_distance;
        }
        if let Some(max_distance) = self.max_distance {
            config.max_distance_km = max_distance;
        }
        if self.max_routes.is_some() {
            config.max_routes = self.max_routes;
        }
    }
}

/// Handle the run subcommand.
pub fn handle_run(ctx: &CommandContext, args: &RunArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.apply(&mut config);

    let mut automation = ctx.automation()?;
    let summary = automation
        .run(&config)
        .context("route automation failed")?;
    ctx.format
        .render_run(&summary)
        .context("failed to write run summary")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_override() {
        let mut config = AutomationConfig::default();
        let args = RunArgs {
            countries: vec!["Germany".to_string()],
            max_distance: Some(900.0),
            ..RunArgs::default()
        };
        args.apply(&mut config);
        assert_eq!(config.countries, vec!["Germany"]);
        assert_eq!(config.max_distance_km, 900.0);
        assert_eq!(config.routes, 3);
        assert_eq!(config.max_routes, None);
    }
}
