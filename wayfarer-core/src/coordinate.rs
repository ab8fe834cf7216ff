//! Validated WGS84 coordinates.
//!
//! Coordinates are stored as [`geo::Coord`] with `x = longitude` and
//! `y = latitude`, matching GeoJSON ordering.

use geo::{Coord, Point};
use thiserror::Error;

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Longitude or latitude was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {value} is outside the range [-180, 180]")]
    LongitudeOutOfRange {
        /// Rejected longitude in decimal degrees.
        value: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {value} is outside the range [-90, 90]")]
    LatitudeOutOfRange {
        /// Rejected latitude in decimal degrees.
        value: f64,
    },
}

/// A longitude/latitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use wayfarer_core::Coordinate;
///
/// let san_francisco = Coordinate::new(-122.42, 37.77)?;
/// assert_eq!(san_francisco.longitude(), -122.42);
/// assert_eq!(san_francisco.latitude(), 37.77);
/// assert!(Coordinate::new(-200.0, 0.0).is_err());
/// # Ok::<(), wayfarer_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Coordinate(Coord<f64>);

impl Coordinate {
    /// Validate and construct a coordinate from longitude and latitude.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when either component is non-finite or out
    /// of range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange { value: longitude });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange { value: latitude });
        }
        Ok(Self(Coord {
            x: longitude,
            y: latitude,
        }))
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.0.x
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.0.y
    }

    /// Borrow the underlying `geo` coordinate.
    #[must_use]
    pub const fn as_coord(self) -> Coord<f64> {
        self.0
    }

    /// Whether both components match `other` once rounded to `decimals`
    /// decimal places.
    ///
    /// ```
    /// use wayfarer_core::Coordinate;
    ///
    /// let a = Coordinate::new(-100.00001, 40.0)?;
    /// let b = Coordinate::new(-100.00002, 40.0)?;
    /// assert!(a.approx_eq(b, 4));
    /// assert!(!a.approx_eq(b, 5));
    /// # Ok::<(), wayfarer_core::CoordinateError>(())
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::float_cmp,
        reason = "fixed-precision comparison scales and rounds both axes"
    )]
    pub fn approx_eq(self, other: Self, decimals: i32) -> bool {
        let scale = 10.0_f64.powi(decimals);
        let round = |value: f64| (value * scale).round();
        round(self.longitude()) == round(other.longitude())
            && round(self.latitude()) == round(other.latitude())
    }

    /// Whether this is exactly `[0, 0]`, the recommender's "unset" marker.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "the unset marker is an exact pair of zeroes"
    )]
    pub(crate) fn is_unset_marker(self) -> bool {
        self.longitude() == 0.0 && self.latitude() == 0.0
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        value.0
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self(value.0)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude(), value.latitude()]
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl TryFrom<Coord<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(value.x, value.y)
    }
}
