//! Behavioural tests for geocoding through [`StubGeocoder`].

use optiroute_core::{GeocodeCandidate, GeocodeError, GeocodeQuery, Geocoder, PlaceCategory};
use optiroute_data::geocode::test_support::StubGeocoder;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

type GeocoderCell = RefCell<Option<StubGeocoder>>;
type ResultCell = RefCell<Option<Result<Vec<GeocodeCandidate>, GeocodeError>>>;

const TWO_COLLEGES: &str = r#"[
    {"display_name": "Christ University, Hosur Road, Bengaluru", "lat": "12.9346", "lon": "77.6061"},
    {"display_name": "Christ College, Irinjalakuda, Thrissur", "lat": "10.3587", "lon": "76.2135"}
]"#;

#[fixture]
fn geocoder() -> GeocoderCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn run(geocoder: &GeocoderCell, result: &ResultCell, query: &GeocodeQuery) {
    let borrow = geocoder.borrow();
    let active = borrow.as_ref().expect("geocoder configured");
    *result.borrow_mut() = Some(active.search(query));
}

#[given("a geocoder answering with two colleges")]
fn two_colleges(#[from(geocoder)] geocoder: &GeocoderCell) {
    *geocoder.borrow_mut() = Some(StubGeocoder::with_body(TWO_COLLEGES));
}

#[when("I search for Christ in the college category")]
fn search_college(#[from(geocoder)] geocoder: &GeocoderCell, #[from(result)] result: &ResultCell) {
    let query = GeocodeQuery::new("Christ").with_category(PlaceCategory::College);
    run(geocoder, result, &query);
}

#[when("I search for a blank query")]
fn search_blank(#[from(geocoder)] geocoder: &GeocoderCell, #[from(result)] result: &ResultCell) {
    run(geocoder, result, &GeocodeQuery::new("   "));
}

#[then("the search text is Christ college university campus")]
fn search_text(#[from(geocoder)] geocoder: &GeocoderCell) {
    let text = geocoder
        .borrow()
        .as_ref()
        .and_then(StubGeocoder::last_search_text);
    assert_eq!(text.as_deref(), Some("Christ college university campus"));
}

#[then("{count} candidates are returned in rank order")]
fn candidates_in_order(count: usize, #[from(result)] result: &ResultCell) {
    let borrow = result.borrow();
    let candidates = borrow
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .expect("expected Ok result");
    assert_eq!(candidates.len(), count);
    assert!(
        candidates
            .first()
            .is_some_and(|first| first.display_name.starts_with("Christ University"))
    );
}

#[then("an empty query error is returned")]
fn empty_query(#[from(result)] result: &ResultCell) {
    assert!(matches!(
        result.borrow().as_ref(),
        Some(Err(GeocodeError::EmptyQuery))
    ));
}

#[scenario(path = "tests/features/geocoder.feature", index = 0)]
fn category_hints(geocoder: GeocoderCell, result: ResultCell) {
    let _ = (geocoder, result);
}

#[scenario(path = "tests/features/geocoder.feature", index = 1)]
fn blank_query(geocoder: GeocoderCell, result: ResultCell) {
    let _ = (geocoder, result);
}
