//! Interfaces to the external services the planner depends on.
//!
//! Geocoding, routing and recommendation are network services. The core
//! only sees them through these synchronous traits so that it stays
//! embeddable and testable without I/O; adapters live in `wayfarer-data`.

mod geocode;
mod recommend;
mod routing;

pub use geocode::{GeocodeError, Geocoder};
pub use recommend::{RecommendError, RecommendationContext, RecommendationKind, Recommender};
pub use routing::{Router, RoutingError};
