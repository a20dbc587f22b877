//! Command-line interface for OptiRoute.
//!
//! Two subcommands sit on top of the core orchestrator:
//! - `optimize` loads waypoints from a JSON file, orders them with the chosen
//!   strategy and prints the route with its statistics.
//! - `geocode` searches for an address and prints the ranked candidates.
//!
//! Options are layered with `ortho_config`: defaults, then configuration
//! files, then `OPTIROUTE_*` environment variables, then command-line flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

mod error;
mod geocode;
mod optimize;
mod render;

#[cfg(test)]
mod tests;

pub use error::CliError;

use geocode::{GeocodeArgs, run_geocode};
use optimize::{OptimizeArgs, run_optimize};

pub(crate) const ARG_LOG_LEVEL: &str = "log-level";
pub(crate) const ENV_LOG_LEVEL: &str = "OPTIROUTE_LOG_LEVEL";
const DEFAULT_LOG_FILTER: &str = "warn";

pub(crate) const ARG_OPTIMIZE_WAYPOINTS: &str = "waypoints-path";
pub(crate) const ARG_OPTIMIZE_STRATEGY: &str = "strategy";
pub(crate) const ARG_OPTIMIZE_FUEL_COST: &str = "fuel-cost-per-km";
pub(crate) const ARG_OPTIMIZE_AVERAGE_SPEED: &str = "average-speed-kmh";
pub(crate) const ARG_OPTIMIZE_ROUNDTRIP: &str = "roundtrip";
pub(crate) const ARG_OPTIMIZE_ANCHOR: &str = "anchor";
pub(crate) const ARG_OPTIMIZE_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_OPTIMIZE_OSRM_PROFILE: &str = "osrm-profile";
pub(crate) const ARG_OPTIMIZE_FORMAT: &str = "format";
pub(crate) const ENV_OPTIMIZE_WAYPOINTS: &str = "OPTIROUTE_CMDS_OPTIMIZE_WAYPOINTS_PATH";

pub(crate) const ARG_GEOCODE_QUERY: &str = "query";
pub(crate) const ARG_GEOCODE_CATEGORY: &str = "category";
pub(crate) const ARG_GEOCODE_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
pub(crate) const ARG_GEOCODE_LIMIT: &str = "limit";
pub(crate) const ARG_GEOCODE_FORMAT: &str = "format";
pub(crate) const ENV_GEOCODE_QUERY: &str = "OPTIROUTE_CMDS_GEOCODE_QUERY";

/// Run the OptiRoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration merging,
/// logger installation or the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.log_level)?;
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Geocode(args) => run_geocode(args),
    }
}

/// Install `env_logger` on stderr.
///
/// Filters come from `RUST_LOG`, then `OPTIROUTE_LOG_LEVEL`, then
/// `--log-level`; later sources replace the default level set by earlier ones.
fn init_logging(level: Option<LevelFilter>) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER));
    if let Ok(filters) = std::env::var(ENV_LOG_LEVEL) {
        builder.parse_filters(&filters);
    }
    if let Some(filter) = level {
        builder.filter_level(filter);
    }
    builder
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init()
        .map_err(CliError::Logging)
}

#[derive(Debug, Parser)]
#[command(
    name = "optiroute",
    about = "Plan efficient multi-stop routes from a list of waypoints",
    version
)]
pub(crate) struct Cli {
    /// Log filter (`error`, `warn`, `info`, `debug` or `trace`).
    #[arg(long = ARG_LOG_LEVEL, value_name = "level", global = true)]
    pub(crate) log_level: Option<LevelFilter>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Order waypoints into an efficient route.
    Optimize(OptimizeArgs),
    /// Search for an address and list matching places.
    Geocode(GeocodeArgs),
}
