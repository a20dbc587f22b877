//! Display statistics derived from a [`RouteResult`].

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::RouteResult;
use crate::distance::spanning_tree_meters;

/// Default fuel cost per kilometre.
pub const DEFAULT_FUEL_COST_PER_KM: f64 = 8.0;

/// Human-scale summary of a route.
///
/// Recomputed from a [`RouteResult`] on demand; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RouteStats {
    /// Total distance in kilometres.
    pub distance_km: f64,
    /// Total duration in minutes.
    pub duration_minutes: f64,
    /// Estimated fuel cost, `distance_km × fuel_cost_per_km`.
    pub fuel_cost: f64,
    /// How close the route is to a lower bound, in `[0, 100]`.
    pub efficiency_percent: f64,
}

impl RouteStats {
    /// Derive statistics for `route` at the given fuel rate.
    ///
    /// # Examples
    /// ```
    /// use optiroute_core::{NearestNeighbourPlanner, NewWaypoint, RouteStats, TripOptions, WaypointStore};
    ///
    /// let mut store = WaypointStore::new();
    /// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
    /// store.add(NewWaypoint::new("B", 0.0, 0.1))?;
    /// let route = NearestNeighbourPlanner::new().plan_route(&store.snapshot(), &TripOptions::default())?;
    ///
    /// let stats = RouteStats::from_route(&route, 8.0);
    /// assert!((stats.fuel_cost - stats.distance_km * 8.0).abs() < 1e-9);
    /// assert!((0.0..=100.0).contains(&stats.efficiency_percent));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "unit conversions are floating-point"
    )]
    #[must_use]
    pub fn from_route(route: &RouteResult, fuel_cost_per_km: f64) -> Self {
        let distance_km = route.total_distance_meters() / 1000.0;
        Self {
            distance_km,
            duration_minutes: route.total_duration_seconds() / 60.0,
            fuel_cost: distance_km * fuel_cost_per_km,
            efficiency_percent: efficiency_percent(
                spanning_tree_meters(route.ordered_waypoints()),
                route.total_distance_meters(),
            ),
        }
    }
}

/// Ratio of a lower bound to the travelled distance, as a percentage
/// clamped to `[0, 100]`.
///
/// A zero-length route scores 100 when the bound is also zero. Negative or
/// non-finite inputs score 0.
#[expect(
    clippy::float_arithmetic,
    reason = "efficiency is a floating-point ratio"
)]
#[must_use]
pub fn efficiency_percent(lower_bound_meters: f64, distance_meters: f64) -> f64 {
    if !lower_bound_meters.is_finite()
        || !distance_meters.is_finite()
        || lower_bound_meters < 0.0
        || distance_meters < 0.0
    {
        return 0.0;
    }
    if distance_meters == 0.0 {
        return if lower_bound_meters == 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 * lower_bound_meters / distance_meters).clamp(0.0, 100.0)
}
