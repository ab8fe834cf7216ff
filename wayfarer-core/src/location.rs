//! Geocoded locations.

use crate::Coordinate;

/// A place resolved by a geocoder.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, Location};
///
/// let denver = Location::new("denver", "Denver, Colorado", Coordinate::new(-104.99, 39.74)?);
/// assert_eq!(denver.display_name, "Denver, Colorado");
/// # Ok::<(), wayfarer_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Identifier assigned by the geocoder.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Position of the place.
    pub coordinate: Coordinate,
}

impl Location {
    /// Construct a location.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            coordinate,
        }
    }
}
