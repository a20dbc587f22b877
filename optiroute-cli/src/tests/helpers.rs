//! Test helpers for writing waypoint files and stubbing collaborators.

use camino::{Utf8Path, Utf8PathBuf};
use optiroute_core::test_support::{FailingTripClient, StraightLineTripClient};
use optiroute_core::{GeocodeCandidate, Geocoder, TripClient};
use optiroute_data::geocode::test_support::StubGeocoder;
use tempfile::TempDir;

use crate::CliError;
use crate::geocode::{GeocodeConfig, GeocoderBuilder};
use crate::optimize::{OptimizeConfig, TripClientBuilder};

/// Three waypoints along the equator: A at 0°, B at 10°E and C at 1°E.
pub(super) const EQUATOR_WAYPOINTS: &str = r#"[
    {"name": "A", "lat": 0.0, "lon": 0.0},
    {"name": "B", "lat": 0.0, "lon": 10.0},
    {"name": "C", "lat": 0.0, "lon": 1.0}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Trip service behaviour handed to the optimize command under test.
#[derive(Debug, Clone, Copy, Default)]
pub(super) enum TripService {
    /// Visits waypoints in input order along straight lines.
    #[default]
    StraightLine,
    /// Fails every request with a network error.
    Unreachable,
}

#[derive(Debug, Default)]
pub(super) struct StubTripClientBuilder {
    pub(super) service: TripService,
}

impl TripClientBuilder for StubTripClientBuilder {
    fn build(&self, _config: &OptimizeConfig) -> Result<Box<dyn TripClient>, CliError> {
        Ok(match self.service {
            TripService::StraightLine => Box::new(StraightLineTripClient::default()),
            TripService::Unreachable => Box::new(FailingTripClient::unreachable()),
        })
    }
}

#[derive(Debug)]
pub(super) struct StubGeocoderBuilder {
    pub(super) candidates: Vec<GeocodeCandidate>,
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(StubGeocoder::with_candidates(
            self.candidates.clone(),
        )))
    }
}
