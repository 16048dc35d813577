use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fuelopt_cli::commands::{
    aircraft::handle_list_aircraft, estimate::handle_estimate, optimize::handle_optimize,
    resolve_data_dir,
};
use fuelopt_cli::output::OutputFormat;
use fuelopt_lib::FsRouteLoader;

#[derive(Parser, Debug)]
#[command(author, version, about = "Aircraft route fuel estimation and comparison")]
struct Cli {
    /// Directory holding aircraft.csv and route CSV files
    /// (default: $FUELOPT_DATA_DIR, then ./data).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the aircraft in aircraft.csv.
    Aircraft,
    /// Estimate fuel for one aircraft on one route file.
    Estimate {
        /// Aircraft type, e.g. A320 (case-insensitive).
        #[arg(long)]
        aircraft: String,
        /// Route file name inside the data directory.
        #[arg(long)]
        route: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Compare route files and report the one needing the least fuel.
    Optimize {
        #[arg(long)]
        aircraft: String,
        /// Route file name; repeat for each candidate.
        #[arg(long = "route", required = true)]
        routes: Vec<String>,
        /// Evaluate candidates concurrently.
        #[arg(long)]
        parallel: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let loader = FsRouteLoader::new(resolve_data_dir(cli.data_dir.as_deref()));

    match cli.command {
        Command::Aircraft => handle_list_aircraft(&loader),
        Command::Estimate {
            aircraft,
            route,
            format,
        } => handle_estimate(&loader, &aircraft, &route, format),
        Command::Optimize {
            aircraft,
            routes,
            parallel,
            format,
        } => handle_optimize(&loader, &aircraft, &routes, parallel, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
