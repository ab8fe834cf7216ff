//! Partition a route into segments of bounded estimated driving time.
//!
//! Routing engines only report aggregate distance and duration, so the
//! segmenter estimates per-edge durations with a single average speed taken
//! from the whole route. Each edge's Haversine length divided by that speed
//! is accumulated until the target is reached, and segment boundaries always
//! land on existing polyline coordinates.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::{Coordinate, Route, haversine_distance};

/// Default target driving time per segment, in hours.
pub const DEFAULT_TARGET_HOURS: f64 = 5.0;

/// Decimal places used when comparing segment boundaries.
pub const BOUNDARY_PRECISION_DECIMALS: i32 = 4;

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Errors returned by [`TargetDuration::from_hours`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SegmentError {
    /// The target was zero, negative or non-finite.
    #[error("target driving hours must be a positive number, got {hours}")]
    InvalidTargetHours {
        /// Rejected value.
        hours: f64,
    },
}

/// Target driving time per segment.
///
/// # Examples
/// ```
/// use wayfarer_core::TargetDuration;
///
/// let target = TargetDuration::from_hours(4.5)?;
/// assert_eq!(target.hours(), 4.5);
/// assert_eq!(TargetDuration::default().hours(), 5.0);
/// assert!(TargetDuration::from_hours(0.0).is_err());
/// # Ok::<(), wayfarer_core::SegmentError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct TargetDuration {
    hours: f64,
}

impl TargetDuration {
    /// Validate and construct a target from a number of hours.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidTargetHours`] unless `hours` is finite
    /// and strictly positive.
    pub fn from_hours(hours: f64) -> Result<Self, SegmentError> {
        if hours.is_finite() && hours > 0.0 {
            Ok(Self { hours })
        } else {
            Err(SegmentError::InvalidTargetHours { hours })
        }
    }

    /// Target expressed in hours.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.hours
    }

    /// Target expressed in seconds.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn as_secs_f64(self) -> f64 {
        self.hours * SECONDS_PER_HOUR
    }
}

impl Default for TargetDuration {
    fn default() -> Self {
        Self {
            hours: DEFAULT_TARGET_HOURS,
        }
    }
}

impl TryFrom<f64> for TargetDuration {
    type Error = SegmentError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
    }
}

impl From<TargetDuration> for f64 {
    fn from(value: TargetDuration) -> Self {
        value.hours
    }
}

/// A contiguous slice of a route approximating one driving leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    /// Index of the first coordinate in the parent route.
    pub start_index: usize,
    /// Index of the last coordinate in the parent route.
    pub end_index: usize,
    /// Coordinate at `start_index`.
    pub start_coordinate: Coordinate,
    /// Coordinate at `end_index`.
    pub end_coordinate: Coordinate,
    /// Estimated length in metres.
    pub distance: f64,
    /// Estimated driving time.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_support::seconds"))]
    pub duration: Duration,
    /// Coordinates `start_index..=end_index` of the parent route.
    pub coordinates: Vec<Coordinate>,
}

impl RouteSegment {
    fn from_slice(
        coordinates: &[Coordinate],
        start_index: usize,
        end_index: usize,
        distance: f64,
        duration: Duration,
    ) -> Option<Self> {
        let slice = coordinates.get(start_index..=end_index)?;
        Some(Self {
            start_index,
            end_index,
            start_coordinate: *slice.first()?,
            end_coordinate: *slice.last()?,
            distance,
            duration,
            coordinates: slice.to_vec(),
        })
    }

    /// Estimated driving time in hours.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn duration_hours(&self) -> f64 {
        self.duration.as_secs_f64() / SECONDS_PER_HOUR
    }
}

/// Split `route` into segments whose estimated duration approaches `target`.
///
/// Routes that fit within the target come back as a single segment carrying
/// the route's own totals. Malformed routes yield no segments.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfarer_core::{Coordinate, Route, TargetDuration, segment_route};
///
/// let route = Route::new(
///     vec![
///         Coordinate::new(-122.42, 37.77)?,
///         Coordinate::new(-119.5, 36.5)?,
///         Coordinate::new(-118.24, 34.05)?,
///     ],
///     600_000.0,
///     Duration::from_secs(21_600),
/// )?;
///
/// let segments = segment_route(&route, TargetDuration::from_hours(8.0)?);
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].end_index, 2);
/// assert_eq!(segments[0].distance, 600_000.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn segment_route(route: &Route, target: TargetDuration) -> Vec<RouteSegment> {
    if let Err(err) = route.validate() {
        debug!("skipping segmentation: {err}");
        return Vec::new();
    }
    if route.duration_hours() <= target.hours() {
        return whole_route(route).into_iter().collect();
    }
    partition(route, target)
}

fn whole_route(route: &Route) -> Option<RouteSegment> {
    let last = route.coordinates.len().checked_sub(1)?;
    RouteSegment::from_slice(
        &route.coordinates,
        0,
        last,
        route.distance,
        route.duration,
    )
}

/// Running totals since the last segment boundary.
#[derive(Debug, Default)]
struct Leg {
    start: usize,
    distance: f64,
    seconds: f64,
}

impl Leg {
    #[expect(clippy::float_arithmetic, reason = "accumulating edge estimates")]
    fn extend(&mut self, metres: f64, speed: f64) {
        self.distance += metres;
        self.seconds += metres / speed;
    }

    fn close(&mut self, coordinates: &[Coordinate], end: usize) -> Option<RouteSegment> {
        let duration = Duration::try_from_secs_f64(self.seconds).unwrap_or(Duration::MAX);
        let segment = RouteSegment::from_slice(coordinates, self.start, end, self.distance, duration);
        *self = Self {
            start: end,
            ..Self::default()
        };
        segment
    }
}

fn partition(route: &Route, target: TargetDuration) -> Vec<RouteSegment> {
    let Some(speed) = route.average_speed() else {
        return Vec::new();
    };
    let Some(last) = route.coordinates.len().checked_sub(1) else {
        return Vec::new();
    };
    let target_seconds = target.as_secs_f64();

    let mut segments = Vec::new();
    let mut leg = Leg::default();
    for (offset, pair) in route.coordinates.windows(2).enumerate() {
        let [from, to] = pair else { continue };
        let index = offset.saturating_add(1);
        leg.extend(haversine_distance(*from, *to), speed);
        if leg.seconds >= target_seconds || index == last {
            segments.extend(leg.close(&route.coordinates, index));
        }
    }
    debug!(
        "split {:.1} h route into {} segments of about {:.1} h",
        route.duration_hours(),
        segments.len(),
        target.hours()
    );
    segments
}

/// Whether two segment lists describe the same boundaries.
///
/// Lists are equivalent when they have the same length and every pair of
/// corresponding end coordinates matches to
/// [`BOUNDARY_PRECISION_DECIMALS`] decimal degrees.
#[must_use]
pub fn segments_equivalent(left: &[RouteSegment], right: &[RouteSegment]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|(a, b)| {
            a.end_coordinate
                .approx_eq(b.end_coordinate, BOUNDARY_PRECISION_DECIMALS)
        })
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point totals within tolerances"
)]
mod tests {
    use super::*;
    use crate::polyline_length;
    use rstest::{fixture, rstest};

    fn coordinate(longitude: f64, latitude: f64) -> Coordinate {
        Coordinate::new(longitude, latitude).expect("valid coordinate")
    }

    fn hours(value: f64) -> TargetDuration {
        TargetDuration::from_hours(value).expect("valid target")
    }

    #[fixture]
    fn california() -> Route {
        Route::new(
            vec![
                coordinate(-122.42, 37.77),
                coordinate(-119.5, 36.5),
                coordinate(-118.24, 34.05),
            ],
            600_000.0,
            Duration::from_secs(21_600),
        )
        .expect("valid route")
    }

    /// Four points one degree of longitude apart along the 40th parallel,
    /// timed so each edge takes one hour at the route's average speed.
    #[fixture]
    fn parallel() -> Route {
        let coordinates: Vec<_> = (0..4)
            .map(|step| coordinate(-100.0 + f64::from(step), 40.0))
            .collect();
        let distance = polyline_length(&coordinates);
        Route::new(coordinates, distance, Duration::from_secs(3 * 3_600)).expect("valid route")
    }

    #[rstest]
    fn short_route_is_a_single_segment(california: Route) {
        let segments = segment_route(&california, hours(8.0));
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!((segment.start_index, segment.end_index), (0, 2));
        assert_eq!(segment.distance, 600_000.0);
        assert_eq!(segment.duration, Duration::from_secs(21_600));
        assert_eq!(segment.coordinates, california.coordinates);
    }

    #[rstest]
    fn route_exactly_on_target_is_not_split(california: Route) {
        let segments = segment_route(&california, hours(6.0));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].distance, 600_000.0);
    }

    #[rstest]
    fn long_route_walks_edges_until_the_final_coordinate(california: Route) {
        let segments = segment_route(&california, hours(5.0));
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert_eq!((segment.start_index, segment.end_index), (0, 2));
        // Distances come from Haversine edges rather than the route total.
        assert!((segment.distance - 590_298.069).abs() < 0.01);
        assert!((segment.duration_hours() - 5.903).abs() < 0.001);
    }

    #[rstest]
    fn boundaries_close_once_the_target_is_reached(parallel: Route) {
        let segments = segment_route(&parallel, hours(1.5));
        let bounds: Vec<_> = segments
            .iter()
            .map(|segment| (segment.start_index, segment.end_index))
            .collect();
        assert_eq!(bounds, vec![(0, 2), (2, 3)]);
        assert!((segments[0].duration_hours() - 2.0).abs() < 1e-9);
        assert!((segments[1].duration_hours() - 1.0).abs() < 1e-9);
        assert_eq!(segments[1].start_coordinate, segments[0].end_coordinate);
    }

    #[rstest]
    fn each_edge_becomes_a_segment_when_the_target_is_shorter(parallel: Route) {
        let segments = segment_route(&parallel, hours(0.9));
        assert_eq!(segments.len(), 3);
        let total: f64 = segments.iter().map(|segment| segment.distance).sum();
        assert!((total - parallel.distance).abs() < 1e-6);
        for segment in &segments {
            assert_eq!(segment.coordinates.len(), 2);
        }
    }

    #[rstest]
    fn two_point_route_over_target_yields_one_segment() {
        let route = Route::new(
            vec![coordinate(-100.0, 40.0), coordinate(-90.0, 40.0)],
            850_000.0,
            Duration::from_secs(12 * 3_600),
        )
        .expect("valid route");
        let segments = segment_route(&route, hours(5.0));
        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start_index, segments[0].end_index), (0, 1));
    }

    #[rstest]
    #[case(Vec::new(), 1_000.0, Duration::from_secs(60))]
    #[case(vec![coordinate(-100.0, 40.0)], 1_000.0, Duration::from_secs(60))]
    #[case(vec![coordinate(-100.0, 40.0), coordinate(-99.0, 40.0)], 0.0, Duration::from_secs(60))]
    #[case(vec![coordinate(-100.0, 40.0), coordinate(-99.0, 40.0)], 1_000.0, Duration::ZERO)]
    fn malformed_routes_have_no_segments(
        #[case] coordinates: Vec<Coordinate>,
        #[case] distance: f64,
        #[case] duration: Duration,
    ) {
        let route = Route {
            coordinates,
            distance,
            duration,
        };
        assert!(segment_route(&route, TargetDuration::default()).is_empty());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::INFINITY)]
    #[case(f64::NAN)]
    fn target_must_be_positive_and_finite(#[case] value: f64) {
        assert!(TargetDuration::from_hours(value).is_err());
    }

    #[rstest]
    fn equivalence_ignores_sub_precision_noise(parallel: Route) {
        let original = segment_route(&parallel, hours(1.5));
        let mut nudged = original.clone();
        for segment in &mut nudged {
            segment.end_coordinate = coordinate(
                segment.end_coordinate.longitude() + 0.000_01,
                segment.end_coordinate.latitude(),
            );
        }
        assert!(segments_equivalent(&original, &nudged));
    }

    #[rstest]
    fn retargeting_changes_equivalence(parallel: Route) {
        let coarse = segment_route(&parallel, hours(1.5));
        let fine = segment_route(&parallel, hours(0.9));
        assert!(!segments_equivalent(&coarse, &fine));
        assert!(segments_equivalent(&fine, &segment_route(&parallel, hours(0.9))));
        assert!(segments_equivalent(&[], &[]));
    }
}
