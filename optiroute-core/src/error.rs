use thiserror::Error;

use crate::TripError;

/// Errors returned by [`RouteOrchestrator::optimize`](crate::RouteOrchestrator::optimize).
///
/// Neither variant triggers a fallback to another strategy; the caller decides
/// how to proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Fewer than two waypoints were supplied.
    #[error("at least 2 waypoints are required to optimise a route, got {count}")]
    InsufficientWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
    /// The remote trip service failed.
    #[error("remote trip service failed: {0}")]
    RemoteService(#[from] TripError),
}
