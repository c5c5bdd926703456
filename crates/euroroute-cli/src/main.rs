use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use euroroute_cli::commands::discover::{handle_discover, DiscoverArgs};
use euroroute_cli::commands::plan::handle_plan;
use euroroute_cli::commands::route::{handle_route, RouteArgs};
use euroroute_cli::commands::run::{handle_run, RunArgs};
use euroroute_cli::commands::CommandContext;
use euroroute_cli::output::{print_footer, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Discover European cities and document coach routes between them")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory that receives maps, timetables, and reports.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Ignore cached discovery results.
    #[arg(long, global = true)]
    refresh: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover cities, generate routes, and write every artifact.
    Run(RunArgs),
    /// List the cities discovered for one or more countries.
    Discover(DiscoverArgs),
    /// Generate routes without writing any documents.
    Plan(RunArgs),
    /// Write documents for a single route between two named cities.
    Route(RouteArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    let ctx = CommandContext {
        config: cli.config,
        output_dir: cli.output_dir,
        format: cli.format,
        refresh: cli.refresh,
    };

    match &cli.command {
        Command::Run(args) => handle_run(&ctx, args)?,
        Command::Discover(args) => handle_discover(&ctx, args)?,
        Command::Plan(args) => handle_plan(&ctx, args)?,
        Command::Route(args) => handle_route(&ctx, args)?,
    }

    if !ctx.format.is_json() {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
