//! Turn recommended places into routing waypoints.
//!
//! The recommender's ranking is preserved and never optimised; the list is
//! capped so that origin and destination still fit within the routing
//! engine's stop limit.

use log::debug;

use crate::{Coordinate, RecommendedPlace};

/// Maximum number of stops, including origin and destination, accepted by the
/// routing engine.
pub const MAX_ROUTING_STOPS: usize = 25;

/// Default cap on recommended waypoints: the stop limit minus origin and
/// destination.
pub const DEFAULT_MAX_WAYPOINTS: usize = MAX_ROUTING_STOPS - 2;

fn promoted(
    places: &[RecommendedPlace],
    max_waypoints: usize,
) -> impl Iterator<Item = (&RecommendedPlace, Coordinate)> {
    places
        .iter()
        .filter_map(|place| place.waypoint().map(|coordinate| (place, coordinate)))
        .take(max_waypoints)
}

/// Select usable waypoint coordinates from `places` in ranking order.
///
/// Places without a usable coordinate are skipped silently and at most
/// `max_waypoints` coordinates are returned; the lowest-ranked are dropped
/// first.
///
/// # Examples
/// ```
/// use wayfarer_core::{DEFAULT_MAX_WAYPOINTS, RecommendedPlace, select_waypoints};
///
/// let places = vec![
///     RecommendedPlace::new("Null Island", "").with_coordinate(0.0, 0.0),
///     RecommendedPlace::new("Kansas", "").with_coordinate(-100.0, 40.0),
///     RecommendedPlace::new("Unknown", ""),
/// ];
/// let waypoints = select_waypoints(&places, DEFAULT_MAX_WAYPOINTS);
/// assert_eq!(waypoints.len(), 1);
/// assert_eq!(waypoints[0].longitude(), -100.0);
/// ```
#[must_use]
pub fn select_waypoints(places: &[RecommendedPlace], max_waypoints: usize) -> Vec<Coordinate> {
    let waypoints: Vec<_> = promoted(places, max_waypoints)
        .map(|(_, coordinate)| coordinate)
        .collect();
    debug!(
        "selected {} of {} recommended places as waypoints",
        waypoints.len(),
        places.len()
    );
    waypoints
}

/// The places behind [`select_waypoints`], in the same order.
#[must_use]
pub fn select_waypoint_places(
    places: &[RecommendedPlace],
    max_waypoints: usize,
) -> Vec<RecommendedPlace> {
    promoted(places, max_waypoints)
        .map(|(place, _)| place.clone())
        .collect()
}

/// An ordered routing request: origin, intermediate waypoints, destination.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, RouteRequest};
///
/// let request = RouteRequest::new(Coordinate::new(-122.42, 37.77)?, Coordinate::new(-118.24, 34.05)?)
///     .with_waypoints(vec![Coordinate::new(-119.5, 36.5)?]);
/// let stops: Vec<_> = request.stops().collect();
/// assert_eq!(stops.len(), 3);
/// assert_eq!(request.stop_count(), 3);
/// # Ok::<(), wayfarer_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Starting point.
    pub origin: Coordinate,
    /// End point.
    pub destination: Coordinate,
    /// Intermediate stops in visiting order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Coordinate>,
}

impl RouteRequest {
    /// Construct a direct origin to destination request.
    #[must_use]
    pub const fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
        }
    }

    /// Replace the intermediate waypoints.
    #[must_use]
    pub fn with_waypoints(mut self, waypoints: Vec<Coordinate>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Build a request whose waypoints come from recommended places.
    #[must_use]
    pub fn with_recommendations(
        origin: Coordinate,
        destination: Coordinate,
        places: &[RecommendedPlace],
        max_waypoints: usize,
    ) -> Self {
        Self::new(origin, destination).with_waypoints(select_waypoints(places, max_waypoints))
    }

    /// Every stop in travel order, origin first and destination last.
    pub fn stops(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.origin)
            .chain(self.waypoints.iter().copied())
            .chain(std::iter::once(self.destination))
    }

    /// Number of stops including origin and destination.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.waypoints.len().saturating_add(2)
    }
}
