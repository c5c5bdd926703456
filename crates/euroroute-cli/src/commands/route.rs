//! Route command handler: document one explicit city pair.

use anyhow::{Context, Result};
use clap::Args;

use super::CommandContext;

#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    /// Origin city name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination city name.
    #[arg(long = "to")]
    pub to: String,
    /// Country to search for the endpoints; repeat for several countries.
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,
    /// Minimum city population.
    #[arg(long)]
    pub min_population: Option<u64>,
}

/// Handle the route subcommand.
pub fn handle_route(ctx: &CommandContext, args: &RouteArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    if !args.countries.is_empty() {
        config.countries = args.countries.clone();
    }
    if let Some(min_population) = args.min_population {
        config.min_population = min_population;
    }

    let mut automation = ctx.automation()?;
    let summary = automation
        .run_between(&config, &args.from, &args.to)
        .with_context(|| format!("failed to document route {} → {}", args.from, args.to))?;
    ctx.format
        .render_run(&summary)
        .context("failed to write route summary")
}
