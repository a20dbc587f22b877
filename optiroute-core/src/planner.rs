//! Greedy nearest-neighbour ordering.
//!
//! The planner ranks candidates with a [`DistanceEstimator`] over raw
//! coordinates, so its metrics are estimates: distance is the great-circle
//! length of the straight-line path and duration assumes a fixed average
//! speed. Results are tagged [`RouteStrategy::LocalNearestNeighbour`].

use geo::{Coord, LineString};

use crate::distance::path_length_meters;
use crate::{
    DistanceEstimator, PlanarDistance, RouteError, RouteResult, RouteStrategy, TripOptions,
    Waypoint,
};

/// Default assumed travel speed: 6 minutes per kilometre.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 10.0;

/// Configuration for [`NearestNeighbourPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Average speed used to derive the synthetic duration.
    pub average_speed_kmh: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

/// Builds a visiting order by always moving to the closest unvisited waypoint.
///
/// # Examples
/// ```
/// use optiroute_core::{NearestNeighbourPlanner, NewWaypoint, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 0.0, 10.0))?;
/// store.add(NewWaypoint::new("C", 0.0, 1.0))?;
///
/// let order = NearestNeighbourPlanner::new().plan(&store.snapshot());
/// let names: Vec<_> = order.iter().map(|wp| wp.name.as_str()).collect();
/// assert_eq!(names, ["A", "C", "B"]);
/// # Ok::<(), optiroute_core::WaypointError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbourPlanner<E = PlanarDistance> {
    estimator: E,
    config: PlannerConfig,
}

impl NearestNeighbourPlanner {
    /// Construct a planner using planar distances and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: DistanceEstimator> NearestNeighbourPlanner<E> {
    /// Construct a planner with an explicit estimator and configuration.
    #[must_use]
    pub const fn with_estimator(estimator: E, config: PlannerConfig) -> Self {
        Self { estimator, config }
    }

    /// Planner configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Order `waypoints` greedily, starting at `waypoints[0]`.
    ///
    /// Ties are broken by the lowest original index. The output is always a
    /// permutation of the input; empty and single-element inputs come back
    /// unchanged. Runs in `O(n²)`.
    #[must_use]
    pub fn plan(&self, waypoints: &[Waypoint]) -> Vec<Waypoint> {
        let Some((first, rest)) = waypoints.split_first() else {
            return Vec::new();
        };
        let mut route = Vec::with_capacity(waypoints.len());
        route.push(first.clone());
        // Kept in input order so the first minimum found is the lowest index.
        let mut unvisited: Vec<Waypoint> = rest.to_vec();
        while let Some(current) = route.last() {
            let Some(next) = self.closest(current, &unvisited) else {
                break;
            };
            let chosen = unvisited.remove(next);
            route.push(chosen);
        }
        route
    }

    /// Plan a route and attach synthetic distance and duration estimates.
    ///
    /// The path is the straight polyline through the planned order, closed
    /// back to the start when `options.roundtrip` is set. The anchor policy
    /// does not apply: the heuristic always starts at the first waypoint.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InsufficientWaypoints`] for fewer than two
    /// waypoints.
    pub fn plan_route(
        &self,
        waypoints: &[Waypoint],
        options: &TripOptions,
    ) -> Result<RouteResult, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        let ordered = self.plan(waypoints);
        let mut coords: Vec<Coord<f64>> = ordered.iter().map(|wp| wp.location).collect();
        if options.roundtrip
            && let Some(start) = coords.first().copied()
        {
            coords.push(start);
        }
        let distance_meters = path_length_meters(&coords);
        let duration_seconds = self.estimated_duration_seconds(distance_meters);
        Ok(RouteResult::new(
            ordered,
            LineString::new(coords),
            distance_meters,
            duration_seconds,
            RouteStrategy::LocalNearestNeighbour,
        ))
    }

    fn closest(&self, current: &Waypoint, unvisited: &[Waypoint]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in unvisited.iter().enumerate() {
            let distance = self.estimator.estimate(current, candidate);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "duration derives from distance and speed"
    )]
    fn estimated_duration_seconds(&self, distance_meters: f64) -> f64 {
        let speed_mps = self.config.average_speed_kmh * 1000.0 / 3600.0;
        if speed_mps > 0.0 && speed_mps.is_finite() {
            distance_meters / speed_mps
        } else {
            0.0
        }
    }
}
