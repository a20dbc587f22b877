//! Solve visiting orders with a remote trip-optimisation service.
//!
//! The [`TripClient`] trait abstracts the service. Implementations decode the
//! service's response into a [`TripSolution`] and convert it with
//! [`TripSolution::into_route`], which reorders the waypoints by the
//! service's declared positions and keeps its metrics verbatim.

mod client;
mod error;

pub use client::{
    AnchorPolicy, ParseAnchorPolicyError, TripClient, TripOptions, TripSolution,
    order_by_trip_position,
};
pub use error::TripError;
