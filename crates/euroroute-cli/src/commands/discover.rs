//! Discover command handler: list the cities found per country.

use anyhow::{Context, Result};
use clap::Args;

use super::CommandContext;

#[derive(Debug, Clone, Args)]
pub struct DiscoverArgs {
    /// Country to discover cities in; repeat for several countries.
    #[arg(long = "country", value_name = "COUNTRY", required = true)]
    pub countries: Vec<String>,
    /// Minimum city population.
    #[arg(long)]
    pub min_population: Option<u64>,
    /// Maximum cities kept per country.
    #[arg(long)]
    pub max_cities: Option<usize>,
}

/// Handle the discover subcommand.
pub fn handle_discover(ctx: &CommandContext, args: &DiscoverArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    config.countries = args.countries.clone();
    if let Some(min_population) = args.min_population {
        config.min_population = min_population;
    }
    if let Some(max_cities) = args.max_cities {
        config.max_cities_per_country = max_cities;
    }

    let mut automation = ctx.automation()?;
    automation
        .discover(&config)
        .context("city discovery failed")?;
    ctx.format
        .render_cities(automation.discovery().discovered())
        .context("failed to write discovered cities")
}
