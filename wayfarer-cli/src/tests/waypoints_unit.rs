//! Unit tests covering `waypoints` configuration and output.

use super::helpers::{MOAB_RECOMMENDATIONS, workspace, write_utf8};
use super::*;
use crate::waypoints::{WaypointsArgs, WaypointsConfig, resolve_max_waypoints, run_waypoints_with};
use rstest::rstest;
use serde_json::Value;
use wayfarer_core::DEFAULT_MAX_WAYPOINTS;

#[rstest]
fn converting_waypoints_without_places_errors() {
    let err = WaypointsConfig::try_from(WaypointsArgs::default()).expect_err("missing places");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLACES);
            assert_eq!(env, ENV_WAYPOINTS_PLACES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::default(None, DEFAULT_MAX_WAYPOINTS)]
#[case::zero(Some(0), 0)]
#[case::at_limit(Some(23), 23)]
fn resolve_max_waypoints_accepts_caps_within_the_router_limit(
    #[case] requested: Option<usize>,
    #[case] expected: usize,
) {
    assert_eq!(resolve_max_waypoints(requested).expect("valid cap"), expected);
}

#[rstest]
fn resolve_max_waypoints_rejects_caps_above_the_router_limit() {
    let err = resolve_max_waypoints(Some(24)).expect_err("cap too large");
    match err {
        CliError::TooManyWaypoints { requested, max } => {
            assert_eq!(requested, 24);
            assert_eq!(max, DEFAULT_MAX_WAYPOINTS);
        }
        other => panic!("expected TooManyWaypoints, found {other:?}"),
    }
}

#[rstest]
fn waypoints_command_prints_usable_coordinates() {
    let (_tmp, root) = workspace();
    let path = root.join("places.json");
    write_utf8(&path, MOAB_RECOMMENDATIONS.as_bytes());

    let args = WaypointsArgs {
        places_path: Some(path),
        max_waypoints: None,
    };
    let mut buffer = Vec::new();
    run_waypoints_with(args, &mut buffer).expect("command succeeds");

    let output: Value = serde_json::from_slice(&buffer).expect("JSON output");
    assert_eq!(output, serde_json::json!([[-108.55, 39.06]]));
}

#[rstest]
fn waypoints_command_reports_unparsable_payloads() {
    let (_tmp, root) = workspace();
    let path = root.join("places.json");
    write_utf8(&path, b"Sure! Here are some places:");

    let args = WaypointsArgs {
        places_path: Some(path.clone()),
        max_waypoints: None,
    };
    let err = run_waypoints_with(args, &mut Vec::new()).expect_err("invalid payload");
    match err {
        CliError::Recommendations { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Recommendations, found {other:?}"),
    }
}
