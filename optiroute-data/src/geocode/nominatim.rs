//! Nominatim search API response types.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use geo::Coord;
use log::warn;
use optiroute_core::{GeocodeCandidate, GeocodeError};
use serde::Deserialize;

use crate::transport::{HttpReply, body_excerpt};

/// A single search hit in `format=json`.
///
/// Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl Place {
    /// Convert to a candidate, or `None` if the coordinates are unusable.
    fn into_candidate(self) -> Option<GeocodeCandidate> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
        in_range.then(|| GeocodeCandidate {
            display_name: self.display_name,
            location: Coord { x: lon, y: lat },
        })
    }
}

/// Decode a raw search reply, keeping the provider's ranking.
///
/// Entries with unparsable or out-of-range coordinates are skipped.
pub(crate) fn decode_reply(
    reply: &HttpReply,
    url: &str,
) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    if !reply.is_success() {
        return Err(GeocodeError::HttpError {
            url: url.to_owned(),
            status: reply.status,
            message: body_excerpt(&reply.body),
        });
    }
    let places: Vec<Place> =
        serde_json::from_str(&reply.body).map_err(|err| GeocodeError::ParseError {
            message: err.to_string(),
        })?;
    Ok(places
        .into_iter()
        .filter_map(|place| {
            let label = place.display_name.clone();
            let candidate = place.into_candidate();
            if candidate.is_none() {
                warn!("skipping geocode result {label:?} with unusable coordinates");
            }
            candidate
        })
        .collect())
}
