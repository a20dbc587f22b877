//! Core domain types and planners for OptiRoute.
//!
//! Waypoints are collected in a [`WaypointStore`] and ordered by a
//! [`RouteOrchestrator`], either locally with the
//! [`NearestNeighbourPlanner`] or remotely through a [`TripClient`]. Every
//! computed [`RouteResult`] is summarised by [`RouteStats`]. Address search
//! lives behind the [`Geocoder`] trait.
//!
//! Transports for the remote services are provided by `optiroute-data`.

#![forbid(unsafe_code)]

pub mod distance;
mod error;
mod geocode;
mod orchestrator;
mod planner;
mod route;
mod stats;
mod store;
#[doc(hidden)]
pub mod test_support;
mod trip;
mod waypoint;

pub use distance::{DistanceEstimator, PlanarDistance};
pub use error::RouteError;
pub use geocode::{
    GeocodeCandidate, GeocodeError, GeocodeQuery, Geocoder, ParsePlaceCategoryError, PlaceCategory,
};
pub use orchestrator::{OptimizedRoute, OrchestratorConfig, RouteOrchestrator};
pub use planner::{DEFAULT_AVERAGE_SPEED_KMH, NearestNeighbourPlanner, PlannerConfig};
pub use route::{ParseRouteStrategyError, RouteResult, RouteStrategy};
pub use stats::{DEFAULT_FUEL_COST_PER_KM, RouteStats, efficiency_percent};
pub use store::WaypointStore;
pub use trip::{
    AnchorPolicy, ParseAnchorPolicyError, TripClient, TripError, TripOptions, TripSolution,
    order_by_trip_position,
};
pub use waypoint::{DEFAULT_WAYPOINT_NAME, NewWaypoint, Waypoint, WaypointError, WaypointId};
