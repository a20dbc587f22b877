//! Focused unit tests covering geocode CLI configuration.

use super::*;
use crate::geocode::{GeocodeArgs, GeocodeConfig, config_from_layers_for_test};
use crate::render::OutputFormat;
use optiroute_core::PlaceCategory;
use rstest::rstest;

#[rstest]
fn converting_geocode_without_query_errors() {
    let err = GeocodeConfig::try_from(GeocodeArgs::default())
        .expect_err("missing query should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_GEOCODE_QUERY);
            assert_eq!(env, ENV_GEOCODE_QUERY);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn geocode_config_applies_defaults() {
    let config = GeocodeConfig::try_from(GeocodeArgs {
        query: Some("MG Road".to_owned()),
        ..GeocodeArgs::default()
    })
    .expect("config should build");

    assert_eq!(config.query.text, "MG Road");
    assert_eq!(config.query.category, None);
    assert_eq!(
        config.nominatim_base_url,
        "https://nominatim.openstreetmap.org"
    );
    assert_eq!(config.limit, 10);
    assert_eq!(config.format, OutputFormat::Text);
}

#[rstest]
fn geocode_config_rejects_zero_limit() {
    let err = GeocodeConfig::try_from(GeocodeArgs {
        query: Some("MG Road".to_owned()),
        limit: Some(0),
        ..GeocodeArgs::default()
    })
    .expect_err("zero limit should error");
    match err {
        CliError::InvalidValue { field, .. } => assert_eq!(field, ARG_GEOCODE_LIMIT),
        other => panic!("expected InvalidValue, found {other:?}"),
    }
}

#[rstest]
#[case("college", PlaceCategory::College)]
#[case("train-station", PlaceCategory::TrainStation)]
#[case("Post_Office", PlaceCategory::PostOffice)]
fn category_flag_parses_labels(#[case] label: &str, #[case] expected: PlaceCategory) {
    let cli = Cli::try_parse_from(["optiroute", "geocode", "Christ", "--category", label])
        .expect("arguments should parse");
    let Command::Geocode(args) = cli.command else {
        panic!("expected geocode command");
    };
    assert_eq!(args.category, Some(expected));
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "query": "from file",
            "limit": 3,
            "nominatim_base_url": "http://from-file:8080",
        }),
        None,
    );
    composer.push_environment(json!({ "limit": 5, "category": "hospital" }));
    composer.push_cli(json!({ "query": "from cli" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.query.text, "from cli");
    assert_eq!(config.query.category, Some(PlaceCategory::Hospital));
    assert_eq!(config.limit, 5);
    assert_eq!(config.nominatim_base_url, "http://from-file:8080");
}
