//! OSRM API response types for the Trip service.
//!
//! The Trip service solves a travelling-salesman problem over the supplied
//! coordinates. Only the fields needed to build a route are decoded.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#trip-service>

use geo::{Coord, LineString};
use log::warn;
use optiroute_core::{TripError, TripSolution};
use serde::Deserialize;

use crate::transport::{HttpReply, body_excerpt};

/// OSRM Trip API response.
#[derive(Debug, Deserialize)]
pub(crate) struct TripResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTrips"` - No trip visiting all destinations was found
    /// - `"NotImplemented"` - Unsupported `source`/`roundtrip` combination
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate trips; the first is used.
    #[serde(default)]
    pub trips: Vec<Trip>,

    /// One entry per input coordinate, in input order.
    #[serde(default)]
    pub waypoints: Vec<TripWaypoint>,
}

/// A single solved trip.
#[derive(Debug, Deserialize)]
pub(crate) struct Trip {
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
    /// Road-following geometry, requested as GeoJSON.
    pub geometry: Geometry,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Trip assignment for one input coordinate.
#[derive(Debug, Deserialize)]
pub(crate) struct TripWaypoint {
    /// Position of this coordinate within the trip.
    pub waypoint_index: usize,
}

impl TripResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub(crate) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Convert the response into a transport-neutral solution.
    pub(crate) fn into_solution(self) -> Result<TripSolution, TripError> {
        if !self.is_ok() {
            return Err(TripError::ServiceError {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }
        let trip = self.trips.into_iter().next().ok_or(TripError::NoTrips)?;
        if !is_measurement(trip.distance) || !is_measurement(trip.duration) {
            return Err(TripError::MalformedResponse {
                message: format!(
                    "trip metrics must be non-negative, got distance {} and duration {}",
                    trip.distance, trip.duration
                ),
            });
        }
        let path: LineString<f64> = trip
            .geometry
            .coordinates
            .into_iter()
            .map(|[x, y]| Coord { x, y })
            .collect();
        Ok(TripSolution {
            distance_meters: trip.distance,
            duration_seconds: trip.duration,
            path,
            positions: self
                .waypoints
                .into_iter()
                .map(|wp| wp.waypoint_index)
                .collect(),
        })
    }
}

fn is_measurement(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Decode a raw Trip service reply.
///
/// OSRM reports request errors as JSON bodies with a non-success status, so
/// the body is decoded first and the status only matters when it is not a
/// Trip response at all.
pub(crate) fn decode_reply(reply: &HttpReply, url: &str) -> Result<TripSolution, TripError> {
    match serde_json::from_str::<TripResponse>(&reply.body) {
        Ok(response) => response.into_solution().inspect_err(|err| {
            warn!("trip request {url} failed: {err}");
        }),
        Err(_) if !reply.is_success() => Err(TripError::HttpError {
            url: url.to_owned(),
            status: reply.status,
            message: body_excerpt(&reply.body),
        }),
        Err(err) => Err(TripError::ParseError {
            message: err.to_string(),
        }),
    }
}
