//! Error types emitted by the OptiRoute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use optiroute_core::{GeocodeError, RouteError, WaypointError};
use optiroute_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the OptiRoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A merged option holds a value the command cannot use.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Name of the offending option.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] log::SetLoggerError),
    /// Opening the waypoints file failed.
    #[error("failed to open waypoints file at {path:?}: {source}")]
    OpenWaypoints {
        /// Path that could not be opened.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The waypoints file is not a JSON array of waypoints.
    #[error("failed to parse waypoints file at {path:?}: {source}")]
    ParseWaypoints {
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// A waypoint in the file failed validation.
    #[error("waypoint {index} in {path:?} is invalid: {source}")]
    InvalidWaypoint {
        /// Path of the waypoints file.
        path: Utf8PathBuf,
        /// Zero-based position of the waypoint in the file.
        index: usize,
        /// Validation failure.
        #[source]
        source: WaypointError,
    },
    /// Constructing the trip client failed.
    #[error("failed to build trip client for {base_url}: {source}")]
    BuildTripClient {
        /// Base URL that was configured.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the geocoder failed.
    #[error("failed to build geocoder for {base_url}: {source}")]
    BuildGeocoder {
        /// Base URL that was configured.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ClientBuildError,
    },
    /// Route optimisation failed.
    #[error("failed to optimise route: {0}")]
    Optimize(#[from] RouteError),
    /// Address search failed.
    #[error("failed to geocode query: {0}")]
    Geocode(#[from] GeocodeError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
