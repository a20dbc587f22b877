//! Waypoints collected for a routing session.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching the
//! convention used throughout the `geo` ecosystem.

use std::fmt;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geocode::GeocodeCandidate;

/// Name used when neither the caller nor the geocoder supplies one.
pub const DEFAULT_WAYPOINT_NAME: &str = "Waypoint";

/// Opaque identifier issued by [`WaypointStore`](crate::WaypointStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WaypointId(u64);

impl WaypointId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named location the user wants to visit.
///
/// Waypoints are only created by [`WaypointStore::add`](crate::WaypointStore::add),
/// which validates the coordinates and issues the identifier.
///
/// # Examples
/// ```
/// use optiroute_core::{NewWaypoint, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// let id = store.add(NewWaypoint::new("Depot", 51.5, -0.1))?;
/// let waypoint = store.get(id).expect("just added");
///
/// assert_eq!(waypoint.name, "Depot");
/// assert_eq!(waypoint.lat(), 51.5);
/// assert_eq!(waypoint.lon(), -0.1);
/// # Ok::<(), optiroute_core::WaypointError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    /// Identifier unique within the owning store.
    pub id: WaypointId,
    /// Short display name.
    pub name: String,
    /// Free-form address, usually the geocoder's display name.
    pub address: String,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

impl Waypoint {
    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.x
    }
}

/// Caller-supplied waypoint awaiting validation and an identifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewWaypoint {
    /// Explicit identifier; the store issues one when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<WaypointId>,
    /// Short display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Free-form address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl NewWaypoint {
    /// Describe a waypoint by name and coordinates.
    ///
    /// # Examples
    /// ```
    /// use optiroute_core::NewWaypoint;
    ///
    /// let draft = NewWaypoint::new("Office", 12.97, 77.59).with_address("MG Road");
    /// assert_eq!(draft.address, "MG Road");
    /// assert!(draft.id.is_none());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: String::new(),
            lat,
            lon,
        }
    }

    /// Attach an address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Request a specific identifier instead of a generated one.
    #[must_use]
    pub const fn with_id(mut self, id: WaypointId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a waypoint from a geocoder result.
    ///
    /// A blank `name` falls back to the first comma-separated segment of the
    /// candidate's display name; the full display name becomes the address.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use optiroute_core::{GeocodeCandidate, NewWaypoint};
    ///
    /// let candidate = GeocodeCandidate {
    ///     display_name: "Cubbon Park, Bengaluru, Karnataka".into(),
    ///     location: Coord { x: 77.59, y: 12.97 },
    /// };
    /// let draft = NewWaypoint::from_candidate(&candidate, None);
    /// assert_eq!(draft.name, "Cubbon Park");
    /// assert_eq!(draft.address, "Cubbon Park, Bengaluru, Karnataka");
    /// ```
    #[must_use]
    pub fn from_candidate(candidate: &GeocodeCandidate, name: Option<&str>) -> Self {
        let explicit = name.map(str::trim).filter(|value| !value.is_empty());
        let name = explicit.map_or_else(|| short_name(&candidate.display_name), str::to_owned);
        Self {
            id: None,
            name,
            address: candidate.display_name.clone(),
            lat: candidate.location.y,
            lon: candidate.location.x,
        }
    }

    /// Check that the coordinates are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidLatitude`] or
    /// [`WaypointError::InvalidLongitude`] for NaN, infinite or out-of-range
    /// values.
    pub fn validate(&self) -> Result<(), WaypointError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(WaypointError::InvalidLatitude { value: self.lat });
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(WaypointError::InvalidLongitude { value: self.lon });
        }
        Ok(())
    }

    pub(crate) fn into_waypoint(self, id: WaypointId) -> Waypoint {
        Waypoint {
            id,
            name: self.name,
            address: self.address,
            location: Coord {
                x: self.lon,
                y: self.lat,
            },
        }
    }
}

fn short_name(display_name: &str) -> String {
    display_name
        .split(',')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_WAYPOINT_NAME)
        .to_owned()
}

/// Errors returned by [`WaypointStore::add`](crate::WaypointStore::add).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaypointError {
    /// Latitude was NaN, infinite or outside `[-90, 90]`.
    #[error("latitude {value} is not a finite value in [-90, 90]")]
    InvalidLatitude {
        /// Rejected latitude.
        value: f64,
    },
    /// Longitude was NaN, infinite or outside `[-180, 180]`.
    #[error("longitude {value} is not a finite value in [-180, 180]")]
    InvalidLongitude {
        /// Rejected longitude.
        value: f64,
    },
    /// The requested identifier is already in use.
    #[error("waypoint id {id} is already in use")]
    DuplicateId {
        /// Conflicting identifier.
        id: WaypointId,
    },
    /// `u64::MAX` is taken, so no fresh identifier can be generated.
    #[error("no waypoint identifiers remain")]
    IdSpaceExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-90.0, -180.0)]
    #[case(90.0, 180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_coordinates(#[case] lat: f64, #[case] lon: f64) {
        assert!(NewWaypoint::new("edge", lat, lon).validate().is_ok());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(90.5)]
    #[case(-91.0)]
    fn rejects_invalid_latitude(#[case] lat: f64) {
        let err = NewWaypoint::new("bad", lat, 0.0)
            .validate()
            .expect_err("latitude should be rejected");
        assert!(matches!(err, WaypointError::InvalidLatitude { .. }));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    #[case(180.1)]
    #[case(-200.0)]
    fn rejects_invalid_longitude(#[case] lon: f64) {
        let err = NewWaypoint::new("bad", 0.0, lon)
            .validate()
            .expect_err("longitude should be rejected");
        assert!(matches!(err, WaypointError::InvalidLongitude { .. }));
    }

    #[rstest]
    #[case(Some("  Home  "), "Home")]
    #[case(Some("   "), "Lalbagh")]
    #[case(None, "Lalbagh")]
    fn candidate_name_prefers_explicit_value(#[case] name: Option<&str>, #[case] expected: &str) {
        let candidate = GeocodeCandidate {
            display_name: "Lalbagh, Bengaluru".into(),
            location: Coord { x: 77.58, y: 12.95 },
        };
        let draft = NewWaypoint::from_candidate(&candidate, name);
        assert_eq!(draft.name, expected);
        assert_eq!(draft.lat, 12.95);
        assert_eq!(draft.lon, 77.58);
    }

    #[rstest]
    fn candidate_without_display_name_uses_default() {
        let candidate = GeocodeCandidate {
            display_name: String::new(),
            location: Coord { x: 0.0, y: 0.0 },
        };
        let draft = NewWaypoint::from_candidate(&candidate, None);
        assert_eq!(draft.name, DEFAULT_WAYPOINT_NAME);
    }

    #[rstest]
    fn accessors_map_axes() {
        let waypoint = NewWaypoint::new("A", 10.0, 20.0).into_waypoint(WaypointId::new(3));
        assert_eq!(waypoint.lat(), 10.0);
        assert_eq!(waypoint.lon(), 20.0);
        assert_eq!(waypoint.id.to_string(), "3");
    }
}
