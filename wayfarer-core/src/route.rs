//! Routes returned by the routing collaborator.
//!
//! A route carries the full polyline in travel order plus the aggregate
//! distance and duration reported by the routing engine. Per-point timing is
//! never available.

use std::time::Duration;

use thiserror::Error;

use crate::Coordinate;

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The polyline had fewer than two coordinates.
    #[error("route geometry needs at least two coordinates, found {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// Distance was zero, negative or non-finite.
    #[error("route distance must be positive")]
    NonPositiveDistance,
    /// Duration was zero.
    #[error("route duration must be positive")]
    NonPositiveDuration,
}

/// A driving route from origin to destination.
///
/// Fields are public so that geometry decoded from an external service can be
/// held as-is; [`Route::is_well_formed`] reports whether the invariants hold.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfarer_core::{Coordinate, Route};
///
/// let route = Route::new(
///     vec![
///         Coordinate::new(-122.42, 37.77)?,
///         Coordinate::new(-118.24, 34.05)?,
///     ],
///     600_000.0,
///     Duration::from_secs(6 * 3_600),
/// )?;
/// assert_eq!(route.duration_hours(), 6.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Polyline in travel order.
    pub coordinates: Vec<Coordinate>,
    /// Total path length in metres.
    pub distance: f64,
    /// Total estimated travel time.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_support::seconds"))]
    pub duration: Duration,
}

impl Route {
    /// Validate and construct a [`Route`].
    ///
    /// # Errors
    /// Returns [`RouteError`] when the geometry has fewer than two
    /// coordinates or either aggregate is not positive.
    pub fn new(
        coordinates: Vec<Coordinate>,
        distance: f64,
        duration: Duration,
    ) -> Result<Self, RouteError> {
        let route = Self {
            coordinates,
            distance,
            duration,
        };
        route.validate()?;
        Ok(route)
    }

    /// Check the route invariants.
    ///
    /// # Errors
    /// Returns the first violated invariant as a [`RouteError`].
    pub fn validate(&self) -> Result<(), RouteError> {
        let count = self.coordinates.len();
        if count < 2 {
            return Err(RouteError::TooFewCoordinates { count });
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(RouteError::NonPositiveDistance);
        }
        if self.duration.is_zero() {
            return Err(RouteError::NonPositiveDuration);
        }
        Ok(())
    }

    /// Whether the route satisfies every invariant checked by [`Route::new`].
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// First coordinate of the polyline.
    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    /// Last coordinate of the polyline.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }

    /// Total duration expressed in hours.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn duration_hours(&self) -> f64 {
        self.duration.as_secs_f64() / SECONDS_PER_HOUR
    }

    /// Mean speed over the whole route in metres per second.
    ///
    /// Returns `None` for routes with a zero duration.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "ratio of route aggregates")]
    pub fn average_speed(&self) -> Option<f64> {
        if self.duration.is_zero() {
            return None;
        }
        Some(self.distance / self.duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn coordinate(longitude: f64, latitude: f64) -> Coordinate {
        Coordinate::new(longitude, latitude).expect("valid coordinate")
    }

    #[fixture]
    fn endpoints() -> Vec<Coordinate> {
        vec![coordinate(-122.42, 37.77), coordinate(-118.24, 34.05)]
    }

    #[rstest]
    fn route_exposes_endpoints(endpoints: Vec<Coordinate>) {
        let route =
            Route::new(endpoints.clone(), 600_000.0, Duration::from_secs(21_600)).expect("valid");
        assert_eq!(route.origin(), endpoints.first().copied());
        assert_eq!(route.destination(), endpoints.last().copied());
        assert_eq!(route.duration_hours(), 6.0);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn route_requires_two_coordinates(#[case] count: usize) {
        let coordinates = vec![coordinate(-100.0, 40.0); count];
        let err = Route::new(coordinates, 1_000.0, Duration::from_secs(60))
            .expect_err("too few coordinates");
        assert_eq!(err, RouteError::TooFewCoordinates { count });
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn route_requires_positive_distance(endpoints: Vec<Coordinate>, #[case] distance: f64) {
        let err = Route::new(endpoints, distance, Duration::from_secs(60))
            .expect_err("non-positive distance");
        assert_eq!(err, RouteError::NonPositiveDistance);
    }

    #[rstest]
    fn route_requires_positive_duration(endpoints: Vec<Coordinate>) {
        let err = Route::new(endpoints, 1_000.0, Duration::ZERO).expect_err("zero duration");
        assert_eq!(err, RouteError::NonPositiveDuration);
    }

    #[rstest]
    fn unvalidated_routes_report_malformed_geometry() {
        let route = Route {
            coordinates: Vec::new(),
            distance: 1_000.0,
            duration: Duration::from_secs(60),
        };
        assert!(!route.is_well_formed());
        assert_eq!(route.origin(), None);
    }

    #[rstest]
    fn average_speed_divides_distance_by_duration(endpoints: Vec<Coordinate>) {
        let route = Route::new(endpoints, 36_000.0, Duration::from_secs(3_600)).expect("valid");
        assert_eq!(route.average_speed(), Some(10.0));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_from_seconds_and_lon_lat_pairs() {
        let json = r#"{
            "coordinates": [[-122.42, 37.77], [-118.24, 34.05]],
            "distance": 600000.0,
            "duration": 21600.0
        }"#;
        let route: Route = serde_json::from_str(json).expect("valid route JSON");
        assert_eq!(route.duration, Duration::from_secs(21_600));
        assert_eq!(route.coordinates.len(), 2);
        assert!(route.is_well_formed());
    }
}
