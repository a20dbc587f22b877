//! Test utilities for geocoders.

use std::sync::{Mutex, PoisonError};

use optiroute_core::{GeocodeCandidate, GeocodeError, GeocodeQuery, Geocoder};

use super::nominatim::decode_reply;
use crate::transport::HttpReply;

const STUB_URL: &str = "http://stub.invalid/search";

/// Stub `Geocoder` returning pre-configured results.
///
/// Blank queries are rejected exactly as the real geocoder rejects them, and
/// the last expanded search text is recorded for inspection.
///
/// # Example
///
/// ```
/// use optiroute_core::{GeocodeQuery, Geocoder, PlaceCategory};
/// use optiroute_data::geocode::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::with_body(
///     r#"[{"display_name": "Central Park, New York", "lat": "40.78", "lon": "-73.97"}]"#,
/// );
/// let query = GeocodeQuery::new("Central").with_category(PlaceCategory::Park);
///
/// let candidates = geocoder.search(&query)?;
/// assert_eq!(candidates.len(), 1);
/// assert_eq!(geocoder.last_search_text().as_deref(), Some("Central park garden"));
/// # Ok::<(), optiroute_core::GeocodeError>(())
/// ```
#[derive(Debug)]
pub struct StubGeocoder {
    response: StubResponse,
    last_search_text: Mutex<Option<String>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Candidates(Vec<GeocodeCandidate>),
    Reply(HttpReply),
    Error(GeocodeError),
}

impl StubGeocoder {
    /// Create a geocoder returning `candidates` for every query.
    #[must_use]
    pub fn with_candidates(candidates: Vec<GeocodeCandidate>) -> Self {
        Self::from_response(StubResponse::Candidates(candidates))
    }

    /// Create a geocoder decoding `body` as a successful search reply.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::from_response(StubResponse::Reply(HttpReply {
            status: 200,
            body: body.into(),
        }))
    }

    /// Create a geocoder failing every non-blank query with `error`.
    #[must_use]
    pub fn with_error(error: GeocodeError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            last_search_text: Mutex::new(None),
        }
    }

    /// Expanded search text of the most recent non-blank query.
    #[must_use]
    pub fn last_search_text(&self) -> Option<String> {
        self.last_search_text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Geocoder for StubGeocoder {
    fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let search_text = query.search_text()?;
        *self
            .last_search_text
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(search_text);
        match &self.response {
            StubResponse::Candidates(candidates) => Ok(candidates.clone()),
            StubResponse::Reply(reply) => decode_reply(reply, STUB_URL),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
