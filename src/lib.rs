//! Facade crate for the Wayfarer road-trip planner.
//!
//! This crate re-exports the core domain types and exposes the HTTP-backed
//! collaborators behind the `http` feature flag.
//!
//! ```
//! use wayfarer::{Coordinate, haversine_distance};
//!
//! let denver = Coordinate::new(-104.99, 39.74)?;
//! let moab = Coordinate::new(-109.55, 38.57)?;
//! assert!(haversine_distance(denver, moab) > 400_000.0);
//! # Ok::<(), wayfarer::CoordinateError>(())
//! ```

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    Coordinate, CoordinateError, GeocodeError, Geocoder, Location, PlanError, PlannerConfig,
    PlanningSession, RecommendError, RecommendationContext, RecommendationKind,
    RecommendationStatus, RecommendedPlace, Recommender, Route, RouteError, RouteRequest,
    RouteSegment, Router, RoutingError, SegmentError, TargetDuration, TripPlan, TripPlanner,
    haversine_distance, segment_route, select_waypoints,
};

#[cfg(feature = "http")]
pub use wayfarer_data::{
    ProviderBuildError,
    geocoding::{HttpGeocoder, HttpGeocoderConfig},
    recommendation::{FileRecommender, parse_recommendations},
    routing::{HttpRouter, HttpRouterConfig},
};
