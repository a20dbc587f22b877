//! HTTP-based `Geocoder` using the Nominatim search API.

use std::time::Duration;

use optiroute_core::{GeocodeCandidate, GeocodeError, GeocodeQuery, Geocoder};
use url::Url;

use super::nominatim::decode_reply;
use crate::transport::{
    BlockingTransport, ClientBuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    TransportFailure, endpoint_url, parse_base_url,
};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default maximum number of candidates per search.
pub const DEFAULT_LIMIT: u8 = 10;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimGeocoderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Maximum number of candidates requested.
    pub limit: u8,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests; Nominatim's usage policy requires
    /// one that identifies the application.
    pub user_agent: String,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_BASE_URL.to_owned(),
            limit: DEFAULT_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of candidates.
    #[must_use]
    pub const fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Geocoder backed by a Nominatim server.
///
/// # Example
///
/// ```no_run
/// use optiroute_core::{GeocodeQuery, Geocoder, PlaceCategory};
/// use optiroute_data::geocode::NominatimGeocoder;
///
/// let geocoder = NominatimGeocoder::new("https://nominatim.openstreetmap.org")?;
/// let query = GeocodeQuery::new("Christ").with_category(PlaceCategory::College);
/// for candidate in geocoder.search(&query)? {
///     println!("{}", candidate.display_name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct NominatimGeocoder {
    transport: BlockingTransport,
    base_url: Url,
    config: NominatimGeocoderConfig,
}

impl NominatimGeocoder {
    /// Create a geocoder with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(NominatimGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let transport = BlockingTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            transport,
            base_url,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &NominatimGeocoderConfig {
        &self.config
    }

    fn build_search_url(&self, search_text: &str) -> Url {
        let mut url = endpoint_url(&self.base_url, ["search"]);
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("limit", &self.config.limit.to_string())
            .append_pair("addressdetails", "1")
            .append_pair("q", search_text);
        url
    }

    fn convert_failure(failure: TransportFailure, url: &Url) -> GeocodeError {
        match failure {
            TransportFailure::Timeout { timeout_secs } => GeocodeError::Timeout {
                url: url.to_string(),
                timeout_secs,
            },
            TransportFailure::Network { message } => GeocodeError::NetworkError {
                url: url.to_string(),
                message,
            },
        }
    }
}

impl Geocoder for NominatimGeocoder {
    fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let search_text = query.search_text()?;
        let url = self.build_search_url(&search_text);
        let reply = self
            .transport
            .get(&url)
            .map_err(|failure| Self::convert_failure(failure, &url))?;
        decode_reply(&reply, url.as_str())
    }
}
