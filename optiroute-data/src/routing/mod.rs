//! HTTP-based trip clients for routing services.
//!
//! This module provides [`HttpTripClient`], an implementation of
//! [`optiroute_core::TripClient`] that solves visiting orders with the OSRM
//! Trip service.
//!
//! # Architecture
//!
//! The client issues one `GET` per solve and decodes the reply into a
//! [`optiroute_core::TripSolution`]. The solution's waypoint assignment is
//! sorted by the declared trip position, so a service that lists its
//! assignment out of order still yields the right visiting sequence.
//!
//! # Example
//!
//! ```no_run
//! use optiroute_data::routing::{HttpTripClient, HttpTripClientConfig};
//! use std::time::Duration;
//!
//! let config = HttpTripClientConfig::new("https://router.project-osrm.org")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let client = HttpTripClient::with_config(config)?;
//! # let _ = client;
//! # Ok::<(), optiroute_data::ClientBuildError>(())
//! ```

mod client;
mod osrm;

#[doc(hidden)]
pub mod test_support;

pub use client::{DEFAULT_OSRM_BASE_URL, DEFAULT_PROFILE, HttpTripClient, HttpTripClientConfig};
