//! Entry point that dispatches an optimisation to the chosen strategy.

use log::{info, warn};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    DEFAULT_FUEL_COST_PER_KM, NearestNeighbourPlanner, PlanarDistance, PlannerConfig, RouteError,
    RouteResult, RouteStats, RouteStrategy, TripClient, TripOptions, Waypoint, WaypointStore,
};

/// Configuration for [`RouteOrchestrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Fuel cost per kilometre used for [`RouteStats::fuel_cost`].
    pub fuel_cost_per_km: f64,
    /// Trip shape forwarded to both strategies.
    pub trip: TripOptions,
    /// Local planner configuration.
    pub planner: PlannerConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fuel_cost_per_km: DEFAULT_FUEL_COST_PER_KM,
            trip: TripOptions::default(),
            planner: PlannerConfig::default(),
        }
    }
}

/// A computed route together with its display statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OptimizedRoute {
    /// The ordered route.
    pub route: RouteResult,
    /// Statistics derived from `route`.
    pub stats: RouteStats,
}

/// Computes visiting orders with either the local heuristic or a remote
/// trip service.
///
/// The orchestrator holds no state between calls; identical inputs and a
/// deterministic trip client give identical results.
///
/// # Examples
/// ```
/// use optiroute_core::test_support::FailingTripClient;
/// use optiroute_core::{NewWaypoint, RouteOrchestrator, RouteStrategy, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 0.0, 1.0))?;
///
/// let orchestrator = RouteOrchestrator::new(FailingTripClient::unreachable());
/// let optimised = orchestrator.optimize_store(&store, RouteStrategy::LocalNearestNeighbour)?;
/// assert_eq!(optimised.route.ordered_waypoints().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteOrchestrator<T> {
    trip_client: T,
    planner: NearestNeighbourPlanner<PlanarDistance>,
    config: OrchestratorConfig,
}

impl<T: TripClient> RouteOrchestrator<T> {
    /// Construct an orchestrator with default configuration.
    #[must_use]
    pub fn new(trip_client: T) -> Self {
        Self::with_config(trip_client, OrchestratorConfig::default())
    }

    /// Construct an orchestrator with explicit configuration.
    #[must_use]
    pub const fn with_config(trip_client: T, config: OrchestratorConfig) -> Self {
        Self {
            trip_client,
            planner: NearestNeighbourPlanner::with_estimator(PlanarDistance, config.planner),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Trip client used for [`RouteStrategy::RemoteTrip`].
    #[must_use]
    pub const fn trip_client(&self) -> &T {
        &self.trip_client
    }

    /// Order `waypoints` with `strategy` and derive display statistics.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InsufficientWaypoints`] for fewer than two
    /// waypoints, whichever strategy is requested, and
    /// [`RouteError::RemoteService`] when the trip client fails. Failures
    /// never fall back to the other strategy.
    pub fn optimize(
        &self,
        waypoints: &[Waypoint],
        strategy: RouteStrategy,
    ) -> Result<OptimizedRoute, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        let route = self.dispatch(waypoints, strategy).inspect_err(|err| {
            warn!("{strategy} optimisation of {} waypoints failed: {err}", waypoints.len());
        })?;
        let stats = RouteStats::from_route(&route, self.config.fuel_cost_per_km);
        info!(
            "{strategy} route through {} waypoints: {:.2} km, {:.1} min, efficiency {:.0}%",
            waypoints.len(),
            stats.distance_km,
            stats.duration_minutes,
            stats.efficiency_percent
        );
        Ok(OptimizedRoute { route, stats })
    }

    /// Optimise the current contents of `store`.
    ///
    /// # Errors
    ///
    /// See [`RouteOrchestrator::optimize`].
    pub fn optimize_store(
        &self,
        store: &WaypointStore,
        strategy: RouteStrategy,
    ) -> Result<OptimizedRoute, RouteError> {
        self.optimize(&store.snapshot(), strategy)
    }

    fn dispatch(
        &self,
        waypoints: &[Waypoint],
        strategy: RouteStrategy,
    ) -> Result<RouteResult, RouteError> {
        match strategy {
            RouteStrategy::LocalNearestNeighbour => {
                self.planner.plan_route(waypoints, &self.config.trip)
            }
            RouteStrategy::RemoteTrip => Ok(self.trip_client.solve(waypoints, &self.config.trip)?),
        }
    }
}
