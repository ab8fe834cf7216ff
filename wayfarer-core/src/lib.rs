//! Core domain logic for the Wayfarer trip planner.
//!
//! The crate partitions driving routes into legs of bounded estimated
//! duration and folds recommended stops into routing requests as waypoints.
//! Everything here is pure and synchronous; geocoding, routing and
//! recommendation services are reached through the traits in
//! [`collaborators`], with HTTP adapters provided by `wayfarer-data`.
//!
//! Constructors validate their input and return `Result` so that invalid
//! coordinates, routes and targets surface early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod collaborators;
mod coordinate;
mod distance;
mod location;
mod place;
mod planner;
mod route;
mod segment;
#[cfg(feature = "serde")]
mod serde_support;
#[doc(hidden)]
pub mod test_support;
mod waypoint;

pub use collaborators::{
    GeocodeError, Geocoder, RecommendError, RecommendationContext, RecommendationKind,
    Recommender, Router, RoutingError,
};
pub use coordinate::{Coordinate, CoordinateError};
pub use distance::{EARTH_RADIUS_METRES, haversine_distance, polyline_length};
pub use location::Location;
pub use place::RecommendedPlace;
pub use planner::{
    DEFAULT_MAX_DESTINATION_POIS, PlanError, PlanTicket, PlannerConfig, PlanningSession,
    RecommendationStatus, TripPlan, TripPlanner,
};
pub use route::{Route, RouteError};
pub use segment::{
    BOUNDARY_PRECISION_DECIMALS, DEFAULT_TARGET_HOURS, RouteSegment, SegmentError,
    TargetDuration, segment_route, segments_equivalent,
};
pub use waypoint::{
    DEFAULT_MAX_WAYPOINTS, MAX_ROUTING_STOPS, RouteRequest, select_waypoint_places,
    select_waypoints,
};
