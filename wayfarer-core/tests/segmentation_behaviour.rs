//! Behavioural tests for `segment_route`.

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfarer_core::{Coordinate, Route, RouteSegment, TargetDuration, segment_route};

fn coordinate(longitude: f64, latitude: f64) -> Coordinate {
    Coordinate::new(longitude, latitude).expect("valid coordinate")
}

fn hours(value: f64) -> TargetDuration {
    TargetDuration::from_hours(value).expect("valid target")
}

#[fixture]
fn route() -> RefCell<Option<Route>> {
    RefCell::new(None)
}

#[fixture]
fn segments() -> RefCell<Vec<RouteSegment>> {
    RefCell::new(Vec::new())
}

#[given("a six hour route from San Francisco to Los Angeles")]
fn given_california(#[from(route)] route: &RefCell<Option<Route>>) {
    let california = Route::new(
        vec![
            coordinate(-122.42, 37.77),
            coordinate(-119.5, 36.5),
            coordinate(-118.24, 34.05),
        ],
        600_000.0,
        Duration::from_secs(21_600),
    )
    .expect("valid route");
    *route.borrow_mut() = Some(california);
}

#[given("a route with a single coordinate")]
fn given_single_point(#[from(route)] route: &RefCell<Option<Route>>) {
    *route.borrow_mut() = Some(Route {
        coordinates: vec![coordinate(-100.0, 40.0)],
        distance: 1_000.0,
        duration: Duration::from_secs(60),
    });
}

fn segment_with(route: &RefCell<Option<Route>>, segments: &RefCell<Vec<RouteSegment>>, target: f64) {
    let borrow = route.borrow();
    let route = borrow.as_ref().expect("route should be set");
    *segments.borrow_mut() = segment_route(route, hours(target));
}

#[when("I segment the route with a five hour target")]
fn segment_five(
    #[from(route)] route: &RefCell<Option<Route>>,
    #[from(segments)] segments: &RefCell<Vec<RouteSegment>>,
) {
    segment_with(route, segments, 5.0);
}

#[when("I segment the route with an eight hour target")]
fn segment_eight(
    #[from(route)] route: &RefCell<Option<Route>>,
    #[from(segments)] segments: &RefCell<Vec<RouteSegment>>,
) {
    segment_with(route, segments, 8.0);
}

#[then("the final segment ends at the last coordinate")]
fn then_final_boundary(#[from(segments)] segments: &RefCell<Vec<RouteSegment>>) {
    let borrow = segments.borrow();
    let last = borrow.last().expect("at least one segment");
    assert_eq!(last.end_index, 2);
    assert_eq!(last.end_coordinate, coordinate(-118.24, 34.05));
}

#[then("the segments cover the route contiguously")]
fn then_contiguous(#[from(segments)] segments: &RefCell<Vec<RouteSegment>>) {
    let borrow = segments.borrow();
    assert_eq!(borrow.first().map(|segment| segment.start_index), Some(0));
    for pair in borrow.windows(2) {
        if let [left, right] = pair {
            assert_eq!(left.end_index, right.start_index);
        }
    }
}

#[then("a single segment spans the whole route")]
fn then_single(#[from(segments)] segments: &RefCell<Vec<RouteSegment>>) {
    let borrow = segments.borrow();
    assert_eq!(borrow.len(), 1);
    assert_eq!((borrow[0].start_index, borrow[0].end_index), (0, 2));
}

#[then("the segment carries the route totals")]
fn then_totals(#[from(segments)] segments: &RefCell<Vec<RouteSegment>>) {
    let borrow = segments.borrow();
    assert_eq!(borrow[0].distance, 600_000.0);
    assert_eq!(borrow[0].duration, Duration::from_secs(21_600));
    assert_eq!(borrow[0].coordinates.len(), 3);
}

#[then("no segments are returned")]
fn then_empty(#[from(segments)] segments: &RefCell<Vec<RouteSegment>>) {
    assert!(segments.borrow().is_empty());
}

#[scenario(path = "tests/features/segmentation.feature", index = 0)]
fn long_route_is_walked(route: RefCell<Option<Route>>, segments: RefCell<Vec<RouteSegment>>) {
    let _ = (route, segments);
}

#[scenario(path = "tests/features/segmentation.feature", index = 1)]
fn short_route_is_whole(route: RefCell<Option<Route>>, segments: RefCell<Vec<RouteSegment>>) {
    let _ = (route, segments);
}

#[scenario(path = "tests/features/segmentation.feature", index = 2)]
fn malformed_route_is_empty(route: RefCell<Option<Route>>, segments: RefCell<Vec<RouteSegment>>) {
    let _ = (route, segments);
}
