//! Great-circle distances between coordinates.
//!
//! Distances use the Haversine formula against a spherical Earth of radius
//! [`EARTH_RADIUS_METRES`]. This is adequate for trip planning, not for
//! survey-grade measurement.

use crate::Coordinate;

/// Mean Earth radius in metres used by [`haversine_distance`].
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Great-circle surface distance between `a` and `b` in metres.
///
/// The result is non-negative, symmetric and exactly zero for identical
/// coordinates.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, haversine_distance};
///
/// let san_francisco = Coordinate::new(-122.4194, 37.7749)?;
/// let los_angeles = Coordinate::new(-118.2437, 34.0522)?;
/// let metres = haversine_distance(san_francisco, los_angeles);
/// assert!((559_000.0..560_000.0).contains(&metres));
/// assert_eq!(haversine_distance(los_angeles, los_angeles), 0.0);
/// # Ok::<(), wayfarer_core::CoordinateError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the Haversine formula is floating-point trigonometry"
)]
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `h` fractionally above one for antipodal points.
    let central_angle = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_METRES * central_angle
}

/// Total Haversine length of a polyline in metres.
///
/// Polylines with fewer than two coordinates have zero length.
#[must_use]
pub fn polyline_length(coordinates: &[Coordinate]) -> f64 {
    coordinates
        .windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_distance(*from, *to),
            _ => 0.0,
        })
        .sum()
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point distances within tolerances"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn coordinate(longitude: f64, latitude: f64) -> Coordinate {
        Coordinate::new(longitude, latitude).expect("valid coordinate")
    }

    #[fixture]
    fn california() -> Vec<Coordinate> {
        vec![
            coordinate(-122.42, 37.77),
            coordinate(-119.5, 36.5),
            coordinate(-118.24, 34.05),
        ]
    }

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = coordinate(-100.0, 40.0);
        assert_eq!(haversine_distance(point, point), 0.0);
    }

    #[rstest]
    fn one_degree_of_latitude_matches_arc_length() {
        let metres = haversine_distance(coordinate(0.0, 0.0), coordinate(0.0, 1.0));
        let expected = EARTH_RADIUS_METRES * 1.0_f64.to_radians();
        assert!((metres - expected).abs() < 1e-6, "got {metres}");
    }

    #[rstest]
    #[case(coordinate(-122.4194, 37.7749), coordinate(-118.2437, 34.0522), 559_120.577)]
    #[case(coordinate(-122.42, 37.77), coordinate(-119.5, 36.5), 294_841.510)]
    #[case(coordinate(-100.0, 40.0), coordinate(-99.0, 40.0), 85_179.809)]
    fn matches_reference_distances(
        #[case] a: Coordinate,
        #[case] b: Coordinate,
        #[case] expected: f64,
    ) {
        let metres = haversine_distance(a, b);
        assert!((metres - expected).abs() < 0.01, "got {metres}");
        assert_eq!(metres, haversine_distance(b, a));
    }

    #[rstest]
    fn antipodal_points_are_half_a_circumference_apart() {
        let metres = haversine_distance(coordinate(0.0, 0.0), coordinate(180.0, 0.0));
        let expected = EARTH_RADIUS_METRES * std::f64::consts::PI;
        assert!((metres - expected).abs() < 1e-3, "got {metres}");
    }

    #[rstest]
    fn polyline_length_sums_edges(california: Vec<Coordinate>) {
        let total = polyline_length(&california);
        let manual = california
            .windows(2)
            .map(|pair| haversine_distance(pair[0], pair[1]))
            .sum::<f64>();
        assert_eq!(total, manual);
        assert!((590_000.0..591_000.0).contains(&total), "got {total}");
    }

    #[rstest]
    #[case(Vec::new())]
    #[case(vec![coordinate(-100.0, 40.0)])]
    fn short_polylines_have_zero_length(#[case] coordinates: Vec<Coordinate>) {
        assert_eq!(polyline_length(&coordinates), 0.0);
    }
}
