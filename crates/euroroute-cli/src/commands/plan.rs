//! Plan command handler: discover and pair cities without writing files.

use anyhow::{Context, Result};

use super::run::RunArgs;
use super::CommandContext;

/// Handle the plan subcommand.
pub fn handle_plan(ctx: &CommandContext, args: &RunArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    args.apply(&mut config);

    let mut automation = ctx.automation()?;
    let plan = automation
        .plan(&config)
        .context("failed to plan routes")?;
    ctx.format
        .render_plan(&plan)
        .context("failed to write route plan")
}
