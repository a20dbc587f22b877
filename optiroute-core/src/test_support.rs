//! Test-only `TripClient` implementations used by unit and behaviour tests.

use geo::LineString;

use crate::distance::path_length_meters;
use crate::{RouteResult, TripClient, TripError, TripOptions, TripSolution, Waypoint};

/// Deterministic `TripClient` that visits waypoints in input order.
///
/// Distance is the great-circle length of the straight path and duration
/// assumes the configured speed in metres per second.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineTripClient {
    speed_mps: f64,
}

impl Default for StraightLineTripClient {
    fn default() -> Self {
        Self { speed_mps: 10.0 }
    }
}

impl StraightLineTripClient {
    /// Create a client reporting durations at `speed_mps`.
    #[must_use]
    pub const fn with_speed(speed_mps: f64) -> Self {
        Self { speed_mps }
    }
}

impl TripClient for StraightLineTripClient {
    #[expect(
        clippy::float_arithmetic,
        reason = "duration derives from distance and speed"
    )]
    fn solve(
        &self,
        waypoints: &[Waypoint],
        options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        let mut coords: Vec<_> = waypoints.iter().map(|wp| wp.location).collect();
        if options.roundtrip
            && let Some(start) = coords.first().copied()
        {
            coords.push(start);
        }
        let distance_meters = path_length_meters(&coords);
        TripSolution {
            distance_meters,
            duration_seconds: distance_meters / self.speed_mps,
            path: LineString::new(coords),
            positions: (0..waypoints.len()).collect(),
        }
        .into_route(waypoints)
    }
}

/// `TripClient` that always fails with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingTripClient {
    error: TripError,
}

impl FailingTripClient {
    /// Fail every request with `error`.
    #[must_use]
    pub const fn new(error: TripError) -> Self {
        Self { error }
    }

    /// Fail every request with a refused connection.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(TripError::NetworkError {
            url: "http://localhost:5000/trip/v1/driving".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

impl TripClient for FailingTripClient {
    fn solve(
        &self,
        waypoints: &[Waypoint],
        _options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        Err(self.error.clone())
    }
}
