//! HTTP collaborators for OptiRoute.
//!
//! Responsibilities:
//! - Implement the core's [`optiroute_core::TripClient`] against the OSRM
//!   Trip service and [`optiroute_core::Geocoder`] against Nominatim.
//! - Decode service replies into transport-neutral core types.
//! - Provide deterministic stub doubles for tests.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `optiroute-core`).
//! - Perform exactly one request per call; never retry.
//!
//! Invariants:
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod geocode;
pub mod routing;
mod transport;

pub use transport::{ClientBuildError, DEFAULT_USER_AGENT};
