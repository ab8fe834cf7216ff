//! Behaviour-driven step definitions driving the segment CLI scenarios.

use super::helpers::{EQUATOR_ROUTE, workspace, write_utf8};
use super::*;
use crate::segment::run_segment_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;
use wayfarer_core::RouteSegment;

#[derive(Debug)]
struct SegmentWorld {
    _tmp: TempDir,
    route_path: Utf8PathBuf,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SegmentWorld {
    fn new() -> Self {
        let (tmp, root) = workspace();
        Self {
            _tmp: tmp,
            route_path: root.join("route.json"),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "wayfarer".to_owned(),
            "segment".to_owned(),
            self.route_path.as_str().to_owned(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> SegmentWorld {
    SegmentWorld::new()
}

#[given("a three hour route exists on disk")]
fn route_exists(#[from(world)] world: &SegmentWorld) {
    write_utf8(&world.route_path, EQUATOR_ROUTE.as_bytes());
}

#[given("no route exists on disk")]
fn no_route_exists(#[from(world)] world: &SegmentWorld) {
    assert!(!world.route_path.exists());
}

#[given("I request a target shorter than the route")]
fn request_short_target(#[from(world)] world: &SegmentWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_TARGET_HOURS}"), "1.5".to_owned()]);
}

#[given("I request a zero hour target")]
fn request_zero_target(#[from(world)] world: &SegmentWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_TARGET_HOURS}"), "0".to_owned()]);
}

#[when("I run the segment command")]
fn run_segment_command(#[from(world)] world: &SegmentWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Segment(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_segment_with(args, &mut *buffer)
        }
        other => panic!("expected segment command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command prints 2 segments ending at the last coordinate")]
fn command_prints_segments(#[from(world)] world: &SegmentWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let segments: Vec<RouteSegment> =
        serde_json::from_str(&stdout).expect("output should be JSON segments");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments.last().map(|segment| segment.end_index), Some(3));
}

#[then("the command fails because the route file is missing")]
fn command_fails_missing_route(#[from(world)] world: &SegmentWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(*field, ARG_ROUTE);
            assert_eq!(path, &world.route_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the command fails because the target is invalid")]
fn command_fails_invalid_target(#[from(world)] world: &SegmentWorld) {
    match &*world.error() {
        CliError::InvalidTarget(_) => {}
        other => panic!("expected InvalidTarget, found {other:?}"),
    }
}

macro_rules! register_segment_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/segment_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SegmentWorld) {
            let _ = world;
        }
    };
}

register_segment_scenario!(segment_happy_path, "splitting a stored route");
register_segment_scenario!(segment_missing_route, "rejecting a missing route file");
register_segment_scenario!(segment_invalid_target, "rejecting a non-positive target");
