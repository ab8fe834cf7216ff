//! Behavioural tests for `FileRecommender` feeding the trip planner.

use std::cell::RefCell;
use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use wayfarer_core::test_support::StubRouter;
use wayfarer_core::{
    Coordinate, Location, PlannerConfig, RecommendedPlace, Route, TripPlan, TripPlanner,
};
use wayfarer_data::recommendation::FileRecommender;

fn coordinate(longitude: f64, latitude: f64) -> Coordinate {
    Coordinate::new(longitude, latitude).expect("valid coordinate")
}

fn destination() -> Location {
    Location::new("moab", "Moab, UT", coordinate(-109.55, 38.57))
}

fn payload_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("recommendations.json")).expect("utf-8 temp path")
}

#[fixture]
fn workspace() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[fixture]
fn router() -> StubRouter {
    let route = Route::new(
        vec![
            coordinate(-104.99, 39.74),
            coordinate(-108.55, 39.06),
            coordinate(-109.55, 38.57),
        ],
        570_000.0,
        Duration::from_secs(19_800),
    )
    .expect("valid route");
    StubRouter::with_route(route)
}

#[fixture]
fn plan() -> RefCell<Option<TripPlan>> {
    RefCell::new(None)
}

#[given("a recommendations file with an unset, a valid and a missing coordinate")]
fn given_file(#[from(workspace)] workspace: &TempDir) {
    let payload = r#"{
        "places": [
            {"name": "Nowhere", "coordinates": [0, 0]},
            {"name": "Grand Junction", "description": "Colorado National Monument", "coordinates": [-108.55, 39.06]},
            {"name": "Somewhere scenic"}
        ],
        "destination_pois": [
            {"name": "Arches National Park", "category": "park", "coordinates": [-109.59, 38.73]}
        ]
    }"#;
    fs::write(payload_path(workspace), payload).expect("write payload");
}

#[given("no recommendations file")]
fn given_no_file(#[from(workspace)] workspace: &TempDir) {
    assert!(!payload_path(workspace).exists());
}

#[when("I plan a trip with the file recommender")]
fn plan_trip(
    #[from(workspace)] workspace: &TempDir,
    #[from(router)] router: &StubRouter,
    #[from(plan)] plan: &RefCell<Option<TripPlan>>,
) {
    let origin = Location::new("den", "Denver, CO", coordinate(-104.99, 39.74));
    let planner = TripPlanner::new(
        router,
        FileRecommender::new(payload_path(workspace)),
        PlannerConfig::default(),
    );
    let planned = planner.plan(&origin, &destination()).expect("plan should succeed");
    *plan.borrow_mut() = Some(planned);
}

#[then("the router receives only the valid waypoint")]
fn then_valid_waypoint(#[from(router)] router: &StubRouter) {
    let requests = router.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].waypoints, vec![coordinate(-108.55, 39.06)]);
}

#[then("the destination points of interest come from the file")]
fn then_file_pois(#[from(plan)] plan: &RefCell<Option<TripPlan>>) {
    let borrow = plan.borrow();
    let plan = borrow.as_ref().expect("plan should be set");
    let names: Vec<_> = plan
        .destination_pois
        .iter()
        .map(|place| place.name.as_str())
        .collect();
    assert_eq!(names, ["Arches National Park"]);
}

#[then("the router receives no waypoints")]
fn then_no_waypoints(#[from(router)] router: &StubRouter) {
    let requests = router.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].waypoints.is_empty());
}

#[then("the destination has a placeholder point of interest")]
fn then_placeholder(#[from(plan)] plan: &RefCell<Option<TripPlan>>) {
    let borrow = plan.borrow();
    let plan = borrow.as_ref().expect("plan should be set");
    assert_eq!(
        plan.destination_pois,
        vec![RecommendedPlace::placeholder(&destination())]
    );
}

#[scenario(path = "tests/features/recommendation_payloads.feature", index = 0)]
fn usable_recommendations_become_waypoints(
    workspace: TempDir,
    router: StubRouter,
    plan: RefCell<Option<TripPlan>>,
) {
    let _ = (workspace, router, plan);
}

#[scenario(path = "tests/features/recommendation_payloads.feature", index = 1)]
fn missing_file_does_not_block_planning(
    workspace: TempDir,
    router: StubRouter,
    plan: RefCell<Option<TripPlan>>,
) {
    let _ = (workspace, router, plan);
}
