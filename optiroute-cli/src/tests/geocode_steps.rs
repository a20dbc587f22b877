//! Behaviour-driven step definitions driving the geocode CLI scenarios.

use super::helpers::StubGeocoderBuilder;
use super::*;
use crate::geocode::run_geocode_with;
use geo::Coord;
use optiroute_core::{GeocodeCandidate, GeocodeError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct GeocodeWorld {
    candidates: RefCell<Vec<GeocodeCandidate>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

#[fixture]
fn world() -> GeocodeWorld {
    GeocodeWorld::default()
}

#[given("a geocoder knowing two colleges named Christ")]
fn two_colleges(#[from(world)] world: &GeocodeWorld) {
    *world.candidates.borrow_mut() = vec![
        GeocodeCandidate {
            display_name: "Christ University, Hosur Road, Bengaluru".to_owned(),
            location: Coord {
                x: 77.6061,
                y: 12.9346,
            },
        },
        GeocodeCandidate {
            display_name: "Christ College, Irinjalakuda, Thrissur".to_owned(),
            location: Coord {
                x: 76.2135,
                y: 10.3587,
            },
        },
    ];
}

#[when("I search for {text} in the college category")]
fn search_college(text: String, #[from(world)] world: &GeocodeWorld) {
    let mut query = text;
    query.retain(|ch| ch != '"');
    let invocation = ["optiroute", "geocode", query.as_str(), "--category", "college"];
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Geocode(args) => {
            let builder = StubGeocoderBuilder {
                candidates: world.candidates.borrow().clone(),
            };
            let mut buffer = world.stdout.borrow_mut();
            run_geocode_with(args, &builder, &mut *buffer)
        }
        Command::Optimize(_) => panic!("expected geocode command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the search succeeds")]
fn search_succeeds(#[from(world)] world: &GeocodeWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");
}

#[then("the output lists {count} candidates with Christ University first")]
fn output_lists_candidates(count: usize, #[from(world)] world: &GeocodeWorld) {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), count);
    assert!(
        lines
            .first()
            .is_some_and(|line| line.starts_with("1. Christ University"))
    );
}

#[then("the command fails because the query is empty")]
fn command_fails_empty_query(#[from(world)] world: &GeocodeWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::Geocode(GeocodeError::EmptyQuery) => {}
        other => panic!("expected EmptyQuery, found {other:?}"),
    }
}

#[scenario(path = "tests/features/geocode_command.feature", index = 0)]
fn geocode_lists_candidates(#[from(world)] world: GeocodeWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geocode_command.feature", index = 1)]
fn geocode_rejects_blank_query(#[from(world)] world: GeocodeWorld) {
    let _ = world;
}
