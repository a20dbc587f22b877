//! Trip client trait, request options and response normalisation.

use std::fmt;
use std::str::FromStr;

use geo::LineString;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{RouteResult, RouteStrategy, Waypoint};

use super::error::TripError;

/// Whether the trip must start at the first waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnchorPolicy {
    /// Start the trip at the first supplied waypoint.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "first"))]
    FixFirst,
    /// Let the solver pick the starting waypoint.
    #[cfg_attr(feature = "serde", serde(rename = "any"))]
    Free,
}

impl AnchorPolicy {
    /// Value of the trip service's `source` parameter.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::FixFirst => "first",
            Self::Free => "any",
        }
    }
}

impl fmt::Display for AnchorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Error returned when parsing an unknown [`AnchorPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor policy {input:?} (expected \"first\" or \"any\")")]
pub struct ParseAnchorPolicyError {
    /// Rejected input.
    pub input: String,
}

impl FromStr for AnchorPolicy {
    type Err = ParseAnchorPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "fix-first" => Ok(Self::FixFirst),
            "any" | "free" => Ok(Self::Free),
            _ => Err(ParseAnchorPolicyError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Shape of the requested trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripOptions {
    /// Return to the starting waypoint at the end of the trip.
    pub roundtrip: bool,
    /// Which waypoint the trip starts from.
    pub anchor: AnchorPolicy,
}

/// Solve a visiting order with an external trip-optimisation service.
///
/// Implementations perform a single request per call with no retries and
/// must tag successful results with [`RouteStrategy::RemoteTrip`]. Build the
/// result with [`TripSolution::into_route`] so the service's assignment is
/// validated and reordered consistently.
///
/// # Examples
///
/// ```rust
/// use geo::LineString;
/// use optiroute_core::{
///     NewWaypoint, TripClient, TripError, TripOptions, TripSolution, RouteResult, Waypoint,
///     WaypointStore,
/// };
///
/// struct IdentityClient;
///
/// impl TripClient for IdentityClient {
///     fn solve(
///         &self,
///         waypoints: &[Waypoint],
///         _options: &TripOptions,
///     ) -> Result<RouteResult, TripError> {
///         let solution = TripSolution {
///             distance_meters: 1_000.0,
///             duration_seconds: 120.0,
///             path: waypoints.iter().map(|wp| wp.location).collect::<LineString<f64>>(),
///             positions: (0..waypoints.len()).collect(),
///         };
///         solution.into_route(waypoints)
///     }
/// }
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 0.0, 1.0))?;
/// let route = IdentityClient.solve(&store.snapshot(), &TripOptions::default())?;
/// assert_eq!(route.total_distance_meters(), 1_000.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TripClient {
    /// Request a trip through `waypoints`.
    ///
    /// Implementations must return `Err(TripError::InsufficientWaypoints)`
    /// when fewer than two waypoints are supplied.
    fn solve(&self, waypoints: &[Waypoint], options: &TripOptions)
    -> Result<RouteResult, TripError>;
}

impl<T: TripClient + ?Sized> TripClient for &T {
    fn solve(
        &self,
        waypoints: &[Waypoint],
        options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        (**self).solve(waypoints, options)
    }
}

impl<T: TripClient + ?Sized> TripClient for Box<T> {
    fn solve(
        &self,
        waypoints: &[Waypoint],
        options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        (**self).solve(waypoints, options)
    }
}

/// Transport-neutral view of a successful trip response.
///
/// `positions[i]` is the position of input waypoint `i` within the solved
/// trip, as declared by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSolution {
    /// Total distance reported by the service, in metres.
    pub distance_meters: f64,
    /// Total duration reported by the service, in seconds.
    pub duration_seconds: f64,
    /// Road-following geometry as `(lon, lat)` coordinates.
    pub path: LineString<f64>,
    /// Trip position of each input waypoint, in input order.
    pub positions: Vec<usize>,
}

impl TripSolution {
    /// Reorder `waypoints` by the declared positions and wrap the service's
    /// metrics, unchanged, in a [`RouteResult`].
    ///
    /// # Errors
    ///
    /// Returns [`TripError::InsufficientWaypoints`] for fewer than two
    /// waypoints and [`TripError::MalformedResponse`] when the positions are
    /// not a permutation of the input indices.
    pub fn into_route(self, waypoints: &[Waypoint]) -> Result<RouteResult, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        let ordered = order_by_trip_position(waypoints, &self.positions)?;
        Ok(RouteResult::new(
            ordered,
            self.path,
            self.distance_meters,
            self.duration_seconds,
            RouteStrategy::RemoteTrip,
        ))
    }
}

/// Sort `waypoints` by their position in a solved trip.
///
/// `positions[i]` gives the trip position of `waypoints[i]`. The service may
/// list its assignment in any order, so the declared index, not the list
/// order, decides the visiting sequence.
///
/// # Errors
///
/// Returns [`TripError::MalformedResponse`] when the lengths differ or a
/// position is duplicated or out of range.
///
/// # Examples
/// ```
/// use optiroute_core::{NewWaypoint, WaypointStore, order_by_trip_position};
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 0.0, 1.0))?;
/// let ordered = order_by_trip_position(&store.snapshot(), &[1, 0])?;
/// let names: Vec<_> = ordered.iter().map(|wp| wp.name.as_str()).collect();
/// assert_eq!(names, ["B", "A"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn order_by_trip_position(
    waypoints: &[Waypoint],
    positions: &[usize],
) -> Result<Vec<Waypoint>, TripError> {
    if positions.len() != waypoints.len() {
        return Err(TripError::MalformedResponse {
            message: format!(
                "expected {} waypoint assignments, got {}",
                waypoints.len(),
                positions.len()
            ),
        });
    }
    let mut slots: Vec<Option<&Waypoint>> = vec![None; waypoints.len()];
    for (waypoint, &position) in waypoints.iter().zip(positions) {
        let slot = slots
            .get_mut(position)
            .ok_or_else(|| TripError::MalformedResponse {
                message: format!("trip position {position} is out of range"),
            })?;
        if slot.replace(waypoint).is_some() {
            return Err(TripError::MalformedResponse {
                message: format!("trip position {position} is assigned twice"),
            });
        }
    }
    // Every slot is filled: n distinct in-range positions for n slots.
    Ok(slots.into_iter().flatten().cloned().collect())
}
