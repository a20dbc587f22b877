//! Facade crate for the OptiRoute route optimiser.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the OSRM trip client and Nominatim geocoder.

#![forbid(unsafe_code)]

pub use optiroute_core::{
    AnchorPolicy, DistanceEstimator, GeocodeCandidate, GeocodeError, GeocodeQuery, Geocoder,
    NearestNeighbourPlanner, NewWaypoint, OptimizedRoute, OrchestratorConfig, PlaceCategory,
    PlanarDistance, PlannerConfig, RouteError, RouteOrchestrator, RouteResult, RouteStats,
    RouteStrategy, TripClient, TripError, TripOptions, Waypoint, WaypointError, WaypointId,
    WaypointStore,
};

#[cfg(feature = "http")]
pub use optiroute_data::ClientBuildError;
#[cfg(feature = "http")]
pub use optiroute_data::geocode::{NominatimGeocoder, NominatimGeocoderConfig};
#[cfg(feature = "http")]
pub use optiroute_data::routing::{HttpTripClient, HttpTripClientConfig};
