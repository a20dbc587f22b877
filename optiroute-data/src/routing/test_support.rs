//! Test utilities for trip clients.
//!
//! This module provides [`StubTripClient`], a deterministic test double for
//! [`TripClient`] that decodes pre-configured Trip service replies through
//! the same path as [`HttpTripClient`](super::HttpTripClient), without making
//! actual HTTP requests.

use std::sync::atomic::{AtomicUsize, Ordering};

use optiroute_core::{RouteResult, TripClient, TripError, TripOptions, Waypoint};

use super::osrm::decode_reply;
use crate::transport::HttpReply;

const STUB_URL: &str = "http://stub.invalid/trip/v1/driving";

/// Stub `TripClient` for testing.
///
/// # Example
///
/// ```
/// use optiroute_core::{NewWaypoint, TripClient, TripOptions, WaypointStore};
/// use optiroute_data::routing::test_support::StubTripClient;
///
/// let client = StubTripClient::with_body(
///     r#"{"code": "Ok",
///         "trips": [{"distance": 900.0, "duration": 60.0,
///                    "geometry": {"coordinates": [[0.0, 0.0], [1.0, 0.0]]}}],
///         "waypoints": [{"waypoint_index": 1}, {"waypoint_index": 0}]}"#,
/// );
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 0.0, 1.0))?;
///
/// let route = client.solve(&store.snapshot(), &TripOptions::default())?;
/// assert_eq!(route.ordered_waypoints()[0].name, "B");
/// assert_eq!(client.calls(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StubTripClient {
    response: StubResponse,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Reply(HttpReply),
    Error(TripError),
}

impl StubTripClient {
    /// Create a client answering every request with `body` and status 200.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::with_reply(200, body)
    }

    /// Create a client answering every request with `status` and `body`.
    #[must_use]
    pub fn with_reply(status: u16, body: impl Into<String>) -> Self {
        Self::from_response(StubResponse::Reply(HttpReply {
            status,
            body: body.into(),
        }))
    }

    /// Create a client failing every request with `error`.
    ///
    /// Fewer than two waypoints still yield
    /// `TripError::InsufficientWaypoints`.
    #[must_use]
    pub fn with_error(error: TripError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests the client has answered.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TripClient for StubTripClient {
    fn solve(
        &self,
        waypoints: &[Waypoint],
        _options: &TripOptions,
    ) -> Result<RouteResult, TripError> {
        if waypoints.len() < 2 {
            return Err(TripError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Reply(reply) => decode_reply(reply, STUB_URL)?.into_route(waypoints),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optiroute_core::{NewWaypoint, WaypointStore};
    use rstest::{fixture, rstest};

    #[fixture]
    fn waypoints() -> Vec<Waypoint> {
        let mut store = WaypointStore::new();
        for (name, lon) in [("A", 0.0), ("B", 1.0), ("C", 2.0)] {
            store
                .add(NewWaypoint::new(name, 0.0, lon))
                .expect("valid waypoint");
        }
        store.snapshot()
    }

    #[rstest]
    fn with_error_returns_configured_error(waypoints: Vec<Waypoint>) {
        let client = StubTripClient::with_error(TripError::NetworkError {
            url: "http://example.com".to_owned(),
            message: "connection refused".to_owned(),
        });

        let err = client
            .solve(&waypoints, &TripOptions::default())
            .expect_err("should fail");

        assert!(matches!(err, TripError::NetworkError { .. }));
        assert_eq!(client.calls(), 1);
    }

    #[rstest]
    fn short_input_is_rejected_without_a_request(waypoints: Vec<Waypoint>) {
        let client = StubTripClient::with_body(r#"{"code": "Ok"}"#);

        let err = client
            .solve(&waypoints[..1], &TripOptions::default())
            .expect_err("should fail");

        assert_eq!(err, TripError::InsufficientWaypoints { count: 1 });
        assert_eq!(client.calls(), 0);
    }

    #[rstest]
    fn assignment_length_mismatch_is_malformed(waypoints: Vec<Waypoint>) {
        let client = StubTripClient::with_body(
            r#"{"code": "Ok",
                "trips": [{"distance": 1.0, "duration": 1.0, "geometry": {"coordinates": []}}],
                "waypoints": [{"waypoint_index": 0}, {"waypoint_index": 1}]}"#,
        );

        let err = client
            .solve(&waypoints, &TripOptions::default())
            .expect_err("should fail");

        assert!(matches!(err, TripError::MalformedResponse { .. }));
    }
}
