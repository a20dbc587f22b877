//! Ordered routes produced by the planners.

use std::fmt;
use std::str::FromStr;

use geo::LineString;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Waypoint;

/// How a visiting order is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RouteStrategy {
    /// Greedy nearest-neighbour ordering computed locally.
    #[default]
    #[cfg_attr(
        feature = "serde",
        serde(rename = "nearest-neighbour", alias = "nn", alias = "nearest-neighbor")
    )]
    LocalNearestNeighbour,
    /// Near-optimal ordering from a remote trip-solving service.
    #[cfg_attr(feature = "serde", serde(rename = "trip", alias = "osrm-trip"))]
    RemoteTrip,
}

impl RouteStrategy {
    /// Canonical textual form, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalNearestNeighbour => "nearest-neighbour",
            Self::RemoteTrip => "trip",
        }
    }
}

impl fmt::Display for RouteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`RouteStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route strategy {input:?} (expected \"nearest-neighbour\" or \"trip\")")]
pub struct ParseRouteStrategyError {
    /// Rejected input.
    pub input: String,
}

impl FromStr for RouteStrategy {
    type Err = ParseRouteStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest-neighbour" | "nearest-neighbor" | "nn" => Ok(Self::LocalNearestNeighbour),
            "trip" | "osrm-trip" | "osrm_trip" => Ok(Self::RemoteTrip),
            _ => Err(ParseRouteStrategyError {
                input: s.to_owned(),
            }),
        }
    }
}

/// An ordered visit through every input waypoint with aggregate metrics.
///
/// Results are built by the planners and never mutated afterwards; the next
/// optimisation replaces, rather than updates, the previous result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RouteResult {
    ordered_waypoints: Vec<Waypoint>,
    path: LineString<f64>,
    total_distance_meters: f64,
    total_duration_seconds: f64,
    source: RouteStrategy,
}

impl RouteResult {
    pub(crate) const fn new(
        ordered_waypoints: Vec<Waypoint>,
        path: LineString<f64>,
        total_distance_meters: f64,
        total_duration_seconds: f64,
        source: RouteStrategy,
    ) -> Self {
        Self {
            ordered_waypoints,
            path,
            total_distance_meters,
            total_duration_seconds,
            source,
        }
    }

    /// Waypoints in visiting order; a permutation of the input.
    #[must_use]
    pub fn ordered_waypoints(&self) -> &[Waypoint] {
        &self.ordered_waypoints
    }

    /// Drawable path as `(lon, lat)` coordinates.
    #[must_use]
    pub const fn path(&self) -> &LineString<f64> {
        &self.path
    }

    /// Total travel distance in metres.
    #[must_use]
    pub const fn total_distance_meters(&self) -> f64 {
        self.total_distance_meters
    }

    /// Total travel time in seconds.
    #[must_use]
    pub const fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    /// Strategy that produced this result.
    #[must_use]
    pub const fn source(&self) -> RouteStrategy {
        self.source
    }

    /// Whether the metrics are synthetic estimates rather than measurements.
    #[must_use]
    pub const fn is_estimate(&self) -> bool {
        matches!(self.source, RouteStrategy::LocalNearestNeighbour)
    }
}
