//! HTTP-based geocoders.
//!
//! [`NominatimGeocoder`] implements [`optiroute_core::Geocoder`] on top of
//! the Nominatim search API. Category hints are expanded by
//! [`optiroute_core::GeocodeQuery::search_text`] before the request is made.

mod geocoder;
mod nominatim;

#[doc(hidden)]
pub mod test_support;

pub use geocoder::{
    DEFAULT_LIMIT, DEFAULT_NOMINATIM_BASE_URL, NominatimGeocoder, NominatimGeocoderConfig,
};
