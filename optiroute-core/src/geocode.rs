//! Address search through an external geocoding service.
//!
//! The [`Geocoder`] trait turns free-text queries into ranked
//! [`GeocodeCandidate`] values. A [`PlaceCategory`] hint widens the query
//! with related search terms, so "Christ" with the `college` category also
//! matches universities and campuses.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of place a query is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PlaceCategory {
    /// Colleges and universities.
    College,
    /// Schools.
    School,
    /// Hospitals and clinics.
    Hospital,
    /// Restaurants and cafes.
    Restaurant,
    /// Banks and ATMs.
    Bank,
    /// Hotels.
    Hotel,
    /// Parks and gardens.
    Park,
    /// Shopping malls.
    Mall,
    /// Bus stations.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "bus station", alias = "bus_station")
    )]
    BusStation,
    /// Railway stations.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "train station", alias = "train_station")
    )]
    TrainStation,
    /// Airports.
    Airport,
    /// Police stations.
    Police,
    /// Fire stations.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "fire station", alias = "fire_station")
    )]
    FireStation,
    /// Post offices.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "post office", alias = "post_office")
    )]
    PostOffice,
}

impl PlaceCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 14] = [
        Self::College,
        Self::School,
        Self::Hospital,
        Self::Restaurant,
        Self::Bank,
        Self::Hotel,
        Self::Park,
        Self::Mall,
        Self::BusStation,
        Self::TrainStation,
        Self::Airport,
        Self::Police,
        Self::FireStation,
        Self::PostOffice,
    ];

    /// Human-readable name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::College => "college",
            Self::School => "school",
            Self::Hospital => "hospital",
            Self::Restaurant => "restaurant",
            Self::Bank => "bank",
            Self::Hotel => "hotel",
            Self::Park => "park",
            Self::Mall => "mall",
            Self::BusStation => "bus station",
            Self::TrainStation => "train station",
            Self::Airport => "airport",
            Self::Police => "police",
            Self::FireStation => "fire station",
            Self::PostOffice => "post office",
        }
    }

    /// Search terms appended to queries for this category.
    #[must_use]
    pub const fn hint_terms(self) -> &'static [&'static str] {
        match self {
            Self::College => &["college", "university", "campus"],
            Self::School => &["school"],
            Self::Hospital => &["hospital", "clinic", "medical college"],
            Self::Restaurant => &["restaurant", "cafe"],
            Self::Bank => &["bank", "atm"],
            Self::Hotel => &["hotel"],
            Self::Park => &["park", "garden"],
            Self::Mall => &["mall", "shopping centre", "shopping center"],
            Self::BusStation => &["bus station", "bus stand", "bus terminal"],
            Self::TrainStation => &["railway station", "train station"],
            Self::Airport => &["airport"],
            Self::Police => &["police station"],
            Self::FireStation => &["fire station"],
            Self::PostOffice => &["post office"],
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown [`PlaceCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown place category {input:?}")]
pub struct ParsePlaceCategoryError {
    /// Rejected input.
    pub input: String,
}

impl FromStr for PlaceCategory {
    type Err = ParsePlaceCategoryError;

    /// Parse a label case-insensitively; `-` and `_` stand in for spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|category| category.label() == normalised)
            .ok_or_else(|| ParsePlaceCategoryError {
                input: s.to_owned(),
            })
    }
}

/// A free-text address search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    /// Address or place name typed by the user.
    pub text: String,
    /// Optional category hint.
    pub category: Option<PlaceCategory>,
}

impl GeocodeQuery {
    /// Build a query without a category hint.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    /// Attach a category hint.
    #[must_use]
    pub const fn with_category(mut self, category: PlaceCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Query text with the category's hint terms appended.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyQuery`] when the text is blank.
    ///
    /// # Examples
    /// ```
    /// use optiroute_core::{GeocodeQuery, PlaceCategory};
    ///
    /// let query = GeocodeQuery::new(" Christ ").with_category(PlaceCategory::College);
    /// assert_eq!(query.search_text()?, "Christ college university campus");
    /// # Ok::<(), optiroute_core::GeocodeError>(())
    /// ```
    pub fn search_text(&self) -> Result<String, GeocodeError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        let mut terms = vec![text];
        if let Some(category) = self.category {
            terms.extend_from_slice(category.hint_terms());
        }
        Ok(terms.join(" "))
    }
}

/// A candidate location returned by a [`Geocoder`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeocodeCandidate {
    /// Full display name reported by the geocoder.
    pub display_name: String,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

/// Errors from [`Geocoder::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query text was empty or whitespace.
    #[error("geocode query must not be empty")]
    EmptyQuery,
    /// Network-level failure.
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
    /// The response body could not be decoded.
    #[error("failed to parse geocode response: {message}")]
    ParseError {
        /// Error description.
        message: String,
    },
}

/// Resolve free-text addresses to candidate coordinates.
pub trait Geocoder {
    /// Return candidates for `query` in the provider's ranking order.
    ///
    /// An empty result is not an error.
    fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).search(query)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn search(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        (**self).search(query)
    }
}
