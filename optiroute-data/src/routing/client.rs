//! HTTP-based `TripClient` using OSRM's Trip API.
//!
//! # Example
//!
//! ```no_run
//! use optiroute_core::{NewWaypoint, TripClient, TripOptions, WaypointStore};
//! use optiroute_data::routing::HttpTripClient;
//!
//! let client = HttpTripClient::new("http://localhost:5000")?;
//! let mut store = WaypointStore::new();
//! store.add(NewWaypoint::new("MG Road", 12.9756, 77.6066))?;
//! store.add(NewWaypoint::new("Indiranagar", 12.9784, 77.6408))?;
//!
//! let route = client.solve(&store.snapshot(), &TripOptions::default())?;
//! println!("{:.0} m", route.total_distance_meters());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use optiroute_core::{RouteResult, TripClient, TripError, TripOptions, Waypoint};
use url::Url;

use super::osrm::decode_reply;
use crate::transport::{
    BlockingTransport, ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    TransportFailure, endpoint_url, parse_base_url,
};

/// Default OSRM base URL.
pub const DEFAULT_OSRM_BASE_URL: &str = "http://localhost:5000";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Configuration for [`HttpTripClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTripClientConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile, such as `driving` or `foot`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpTripClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTripClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Trip client backed by an OSRM server.
///
/// Each call to [`TripClient::solve`] performs exactly one request; failures
/// are returned as-is without retrying. The service's distance, duration and
/// geometry are passed through unchanged.
///
/// # Runtime behaviour
///
/// The client owns a current-thread Tokio runtime reused across calls. When
/// called from within a multi-threaded Tokio runtime it blocks in place on
/// that runtime instead; from a `current_thread` runtime it falls back to
/// its own runtime.
#[derive(Debug)]
pub struct HttpTripClient {
    transport: BlockingTransport,
    base_url: Url,
    config: HttpTripClientConfig,
}

impl HttpTripClient {
    /// Create a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpTripClientConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpTripClientConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let transport = BlockingTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            transport,
            base_url,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTripClientConfig {
        &self.config
    }

    /// Build the Trip API URL for `waypoints`.
    ///
    /// The URL format is
    /// `{base_url}/trip/v1/{profile}/{lon,lat;...}?roundtrip=..&source=..&overview=full&geometries=geojson`.
    fn build_trip_url(&self, waypoints: &[Waypoint], options: &TripOptions) -> Url {
        let coords = waypoints
            .iter()
            .map(|wp| format!("{},{}", wp.lon(), wp.lat()))
            .collect::<Vec<_>>()
            .join(";");
        let mut url = endpoint_url(
            &self.base_url,
            ["trip", "v1", self.config.profile.as_str(), coords.as_str()],
        );
        url.query_pairs_mut()
            .append_pair("roundtrip", if options.roundtrip { "true" } else { "false" })
            .append_pair("source", options.anchor.as_wire())
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        url
    }

    fn convert_failure(failure: TransportFailure, url: &Url) -> TripError {
        match failure {
            TransportFailure::Timeout { timeout_secs } => TripError::Timeout {
                url: url.to_string(),
                timeout_secs,
            },
            TransportFailure::Network { message } => TripError::NetworkError {
                url: url.to_string(),
                message,
            },
        }
    }
}

impl TripClient for HttpTripClient {
    fn solve(
        &self,
        waypoints: &[Waypoint],
        options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        let url = self.build_trip_url(waypoints, options);
        let reply = self
            .transport
            .get(&url)
            .map_err(|failure| Self::convert_failure(failure, &url))?;
        decode_reply(&reply, url.as_str())?.into_route(waypoints)
    }
}
