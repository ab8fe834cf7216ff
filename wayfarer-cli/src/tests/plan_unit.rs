//! Unit tests covering `plan` configuration and query resolution.

use super::helpers::workspace;
use super::*;
use crate::plan::{
    LiteralCoordinates, PlanArgs, PlanConfig, config_from_layers_for_test, parse_lon_lat,
};
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::json;
use wayfarer_core::test_support::StubGeocoder;
use wayfarer_core::{Coordinate, Geocoder, Location};

#[fixture]
fn args() -> PlanArgs {
    PlanArgs {
        origin: Some("Denver".to_owned()),
        destination: Some("Moab".to_owned()),
        ..PlanArgs::default()
    }
}

#[rstest]
#[case::origin(ARG_ORIGIN, ENV_PLAN_ORIGIN)]
#[case::destination(ARG_DESTINATION, ENV_PLAN_DESTINATION)]
fn converting_plan_without_endpoint_errors(
    args: PlanArgs,
    #[case] missing: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = if missing == ARG_ORIGIN {
        PlanArgs { origin: None, ..args }
    } else {
        PlanArgs {
            destination: None,
            ..args
        }
    };
    let err = PlanConfig::try_from(args).expect_err("missing endpoint");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, missing);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_service_defaults(args: PlanArgs) {
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.osrm_base_url, "http://localhost:5000");
    assert_eq!(config.nominatim_base_url, "https://nominatim.openstreetmap.org");
    assert_eq!(config.target.hours(), 5.0);
    assert_eq!(config.max_waypoints, 23);
    assert!(config.places.is_none());
}

#[rstest]
fn plan_config_rejects_oversized_waypoint_caps(args: PlanArgs) {
    let args = PlanArgs {
        max_waypoints: Some(30),
        ..args
    };
    let err = PlanConfig::try_from(args).expect_err("cap too large");
    assert!(matches!(err, CliError::TooManyWaypoints { requested: 30, .. }));
}

#[rstest]
fn planner_skips_recommendations_without_a_payload(args: PlanArgs) {
    let config = PlanConfig::try_from(args).expect("config should build");
    let planner = config.planner_config();
    assert_eq!(planner.max_waypoints, 0);
    assert_eq!(planner.max_destination_pois, 0);
}

#[rstest]
fn planner_requests_recommendations_with_a_payload(args: PlanArgs) {
    let args = PlanArgs {
        places: Some("places.json".into()),
        max_waypoints: Some(4),
        target_hours: Some(3.0),
        ..args
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    let planner = config.planner_config();
    assert_eq!(planner.max_waypoints, 4);
    assert_eq!(planner.max_destination_pois, 5);
    assert_eq!(planner.target.hours(), 3.0);
}

#[rstest]
fn validate_sources_reports_missing_places(args: PlanArgs) {
    let (_tmp, root) = workspace();
    let places = root.join("places.json");
    let args = PlanArgs {
        places: Some(places.clone()),
        ..args
    };
    let config = PlanConfig::try_from(args).expect("config should build");

    let err = config.validate_sources().expect_err("missing places file");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_PLACES);
            assert_eq!(path, places);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
#[case::plain("-109.55,38.57", Some((-109.55, 38.57)))]
#[case::spaced(" -109.55 , 38.57 ", Some((-109.55, 38.57)))]
#[case::place_name("Moab, Utah", None)]
#[case::out_of_range("10.0,95.0", None)]
#[case::single_number("42", None)]
fn parse_lon_lat_accepts_only_valid_pairs(
    #[case] query: &str,
    #[case] expected: Option<(f64, f64)>,
) {
    let parsed = parse_lon_lat(query).map(|c| (c.longitude(), c.latitude()));
    assert_eq!(parsed, expected);
}

#[rstest]
fn literal_coordinates_bypass_the_geocoder() {
    let inner = StubGeocoder::default();
    let geocoder = LiteralCoordinates::new(&inner);

    let matches = geocoder.search("-109.55,38.57").expect("literal resolves");
    let location = matches.first().expect("one match");
    assert_eq!(location.display_name, "-109.55,38.57");
    assert_eq!(location.coordinate.longitude(), -109.55);
}

#[rstest]
fn place_names_are_delegated_to_the_geocoder() {
    let moab = Coordinate::new(-109.55, 38.57).expect("valid coordinate");
    let inner = StubGeocoder::default().with_location("Moab", Location::new("moab", "Moab, UT", moab));
    let geocoder = LiteralCoordinates::new(&inner);

    let matches = geocoder.search("Moab").expect("lookup succeeds");
    assert_eq!(matches.first().map(|l| l.id.as_str()), Some("moab"));
    assert!(geocoder.search("Atlantis").expect("lookup succeeds").is_empty());
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "origin": "Denver",
            "destination": "Moab",
            "osrm_base_url": "http://from-file:5000",
            "nominatim_base_url": "http://from-file:8080",
        }),
        None,
    );
    composer.push_environment(json!({ "osrm_base_url": "http://from-env:5000" }));
    composer.push_cli(json!({ "destination": "Arches" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.origin, "Denver");
    assert_eq!(config.destination, "Arches");
    assert_eq!(config.osrm_base_url, "http://from-env:5000");
    assert_eq!(config.nominatim_base_url, "http://from-file:8080");
}
