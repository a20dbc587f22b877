use thiserror::Error;

/// Errors from [`crate::TripClient::solve`].
///
/// Every variant is surfaced to the caller unchanged; clients never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// Fewer than two waypoints were supplied.
    #[error("trip solving needs at least 2 waypoints, got {count}")]
    InsufficientWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },

    /// Network-level failure such as a refused connection or DNS error.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// URL that was requested.
        url: String,
        /// Error description.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// URL that was requested.
        url: String,
        /// Timeout that was exceeded, in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The service reported a status code other than `"Ok"`.
    #[error("trip service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Error message reported by the service.
        message: String,
    },

    /// The service succeeded but returned no candidate trips.
    #[error("trip service returned no trips")]
    NoTrips,

    /// The response body could not be decoded.
    #[error("failed to parse trip response: {message}")]
    ParseError {
        /// Error description.
        message: String,
    },

    /// The waypoint assignment does not describe a permutation of the input.
    #[error("malformed trip response: {message}")]
    MalformedResponse {
        /// Description of the inconsistency.
        message: String,
    },
}
