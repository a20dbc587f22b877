//! Optimize command implementation for the OptiRoute CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use optiroute_core::{
    AnchorPolicy, DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_FUEL_COST_PER_KM, NewWaypoint,
    OptimizedRoute, OrchestratorConfig, PlannerConfig, RouteOrchestrator, RouteStrategy,
    TripClient, TripOptions, WaypointStore,
};
use optiroute_data::routing::{
    DEFAULT_OSRM_BASE_URL, DEFAULT_PROFILE, HttpTripClient, HttpTripClientConfig,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::render::{OutputFormat, render_route_text};
use crate::{
    ARG_OPTIMIZE_ANCHOR, ARG_OPTIMIZE_AVERAGE_SPEED, ARG_OPTIMIZE_FORMAT, ARG_OPTIMIZE_FUEL_COST,
    ARG_OPTIMIZE_OSRM_BASE_URL, ARG_OPTIMIZE_OSRM_PROFILE, ARG_OPTIMIZE_ROUNDTRIP,
    ARG_OPTIMIZE_STRATEGY, ARG_OPTIMIZE_WAYPOINTS, CliError, ENV_OPTIMIZE_WAYPOINTS,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the waypoints listed in a JSON file into an efficient \
                 route. The file holds an array of objects with `lat`, `lon` \
                 and optional `name` and `address` fields. The nearest-neighbour \
                 strategy runs locally; the trip strategy asks an OSRM server.",
    about = "Optimise the visiting order of a set of waypoints"
)]
#[ortho_config(prefix = "OPTIROUTE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing the waypoints.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) waypoints_path: Option<Utf8PathBuf>,
    /// Ordering strategy (`nearest-neighbour` or `trip`).
    #[arg(long = ARG_OPTIMIZE_STRATEGY, value_name = "strategy")]
    #[serde(default)]
    pub(crate) strategy: Option<RouteStrategy>,
    /// Fuel cost per kilometre used for the cost estimate.
    #[arg(long = ARG_OPTIMIZE_FUEL_COST, value_name = "cost")]
    #[serde(default)]
    pub(crate) fuel_cost_per_km: Option<f64>,
    /// Average speed, in km/h, behind local duration estimates.
    #[arg(long = ARG_OPTIMIZE_AVERAGE_SPEED, value_name = "kmh")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Return to the starting waypoint at the end of the route.
    #[arg(
        long = ARG_OPTIMIZE_ROUNDTRIP,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) roundtrip: Option<bool>,
    /// Where the trip starts (`first` or `any`).
    #[arg(long = ARG_OPTIMIZE_ANCHOR, value_name = "policy")]
    #[serde(default)]
    pub(crate) anchor: Option<AnchorPolicy>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OPTIMIZE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile (e.g. `driving`, `foot`).
    #[arg(long = ARG_OPTIMIZE_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Output format (`text` or `json`).
    #[arg(long = ARG_OPTIMIZE_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON waypoints file.
    pub(crate) waypoints_path: Utf8PathBuf,
    /// Ordering strategy.
    pub(crate) strategy: RouteStrategy,
    /// Fuel cost per kilometre.
    pub(crate) fuel_cost_per_km: f64,
    /// Average speed for local estimates.
    pub(crate) average_speed_kmh: f64,
    /// Trip shape passed to the planners.
    pub(crate) trip: TripOptions,
    /// Base URL for the OSRM trip service.
    pub(crate) osrm_base_url: String,
    /// OSRM routing profile.
    pub(crate) osrm_profile: String,
    /// How results are printed.
    pub(crate) format: OutputFormat,
}

impl OptimizeConfig {
    pub(crate) const fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            fuel_cost_per_km: self.fuel_cost_per_km,
            trip: self.trip,
            planner: PlannerConfig {
                average_speed_kmh: self.average_speed_kmh,
            },
        }
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let waypoints_path = args.waypoints_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_WAYPOINTS,
            env: ENV_OPTIMIZE_WAYPOINTS,
        })?;

        let fuel_cost_per_km = args.fuel_cost_per_km.unwrap_or(DEFAULT_FUEL_COST_PER_KM);
        if !fuel_cost_per_km.is_finite() || fuel_cost_per_km < 0.0 {
            return Err(CliError::InvalidValue {
                field: ARG_OPTIMIZE_FUEL_COST,
                reason: "expected a finite, non-negative number",
            });
        }
        let average_speed_kmh = args.average_speed_kmh.unwrap_or(DEFAULT_AVERAGE_SPEED_KMH);
        if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
            return Err(CliError::InvalidValue {
                field: ARG_OPTIMIZE_AVERAGE_SPEED,
                reason: "expected a finite, positive number",
            });
        }

        let osrm_base_url = args
            .osrm_base_url
            .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned());
        let osrm_profile = args
            .osrm_profile
            .unwrap_or_else(|| DEFAULT_PROFILE.to_owned());

        Ok(Self {
            waypoints_path,
            strategy: args.strategy.unwrap_or_default(),
            fuel_cost_per_km,
            average_speed_kmh,
            trip: TripOptions {
                roundtrip: args.roundtrip.unwrap_or(false),
                anchor: args.anchor.unwrap_or_default(),
            },
            osrm_base_url,
            osrm_profile,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds the trip client for the current optimize invocation.
pub(crate) trait TripClientBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn TripClient>, CliError>;
}

pub(crate) struct HttpTripClientBuilder;

impl TripClientBuilder for HttpTripClientBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn TripClient>, CliError> {
        let client_config = HttpTripClientConfig::new(config.osrm_base_url.clone())
            .with_profile(config.osrm_profile.clone());
        let client = HttpTripClient::with_config(client_config).map_err(|source| {
            CliError::BuildTripClient {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(client))
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &HttpTripClientBuilder, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn TripClientBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let optimized = execute_optimize(&config, builder)?;
    write_optimized_route(writer, &optimized, config.format)
}

pub(crate) fn execute_optimize(
    config: &OptimizeConfig,
    builder: &dyn TripClientBuilder,
) -> Result<OptimizedRoute, CliError> {
    let store = load_waypoints(&config.waypoints_path)?;
    let trip_client = builder.build(config)?;
    let orchestrator = RouteOrchestrator::with_config(trip_client, config.orchestrator_config());
    Ok(orchestrator.optimize_store(&store, config.strategy)?)
}

/// Loads a JSON array of waypoints from disk into a fresh store.
///
/// Waypoints keep the file's order; the first one anchors the route.
pub(crate) fn load_waypoints(path: &Utf8Path) -> Result<WaypointStore, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenWaypoints {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let drafts: Vec<NewWaypoint> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseWaypoints {
                path: path.to_path_buf(),
                source,
            }
        })?;

    let mut store = WaypointStore::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        store.add(draft).map_err(|source| CliError::InvalidWaypoint {
            path: path.to_path_buf(),
            index,
            source,
        })?;
    }
    Ok(store)
}

fn write_optimized_route(
    writer: &mut dyn Write,
    optimized: &OptimizedRoute,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => render_route_text(optimized),
        OutputFormat::Json => {
            serde_json::to_string_pretty(optimized).map_err(CliError::SerialiseOutput)?
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
