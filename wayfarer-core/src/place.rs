//! Places suggested by an external recommender.
//!
//! Every field originates from untrusted, loosely structured output, so the
//! coordinate is kept exactly as received and only promoted to a
//! [`Coordinate`] through [`RecommendedPlace::waypoint`].

use crate::{Coordinate, Location};

const PLACEHOLDER_DESCRIPTION: &str =
    "Recommendations are unavailable right now. Explore the area around your destination.";

/// A point of interest proposed by the recommender.
///
/// # Examples
/// ```
/// use wayfarer_core::RecommendedPlace;
///
/// let diner = RecommendedPlace::new("Route 66 Diner", "Classic roadside stop")
///     .with_category("food")
///     .with_coordinate(-106.6, 35.08);
/// assert!(diner.waypoint().is_some());
///
/// let unplaced = RecommendedPlace::new("Somewhere", "No location given");
/// assert!(unplaced.waypoint().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendedPlace {
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Optional category label such as "food" or "park".
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<String>,
    /// Raw `[longitude, latitude]` as supplied; may be malformed.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub coordinate: Option<Vec<f64>>,
}

impl RecommendedPlace {
    /// Construct a place without category or coordinate.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: None,
            coordinate: None,
        }
    }

    /// Attach a category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a `[longitude, latitude]` coordinate.
    #[must_use]
    pub fn with_coordinate(self, longitude: f64, latitude: f64) -> Self {
        self.with_raw_coordinate(vec![longitude, latitude])
    }

    /// Attach a coordinate exactly as received, without validation.
    #[must_use]
    pub fn with_raw_coordinate(mut self, coordinate: Vec<f64>) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// The single POI shown for `location` when recommendations fail.
    #[must_use]
    pub fn placeholder(location: &Location) -> Self {
        Self::new(location.display_name.clone(), PLACEHOLDER_DESCRIPTION).with_coordinate(
            location.coordinate.longitude(),
            location.coordinate.latitude(),
        )
    }

    /// The place's coordinate if it can be used as a routing waypoint.
    ///
    /// Absent coordinates, anything other than exactly two components,
    /// out-of-range values and the `[0, 0]` "unset" marker are rejected.
    #[must_use]
    pub fn waypoint(&self) -> Option<Coordinate> {
        let [longitude, latitude] = self.coordinate.as_deref()? else {
            return None;
        };
        Coordinate::new(*longitude, *latitude)
            .ok()
            .filter(|coordinate| !coordinate.is_unset_marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(vec![]))]
    #[case(Some(vec![-100.0]))]
    #[case(Some(vec![-100.0, 40.0, 12.0]))]
    #[case(Some(vec![0.0, 0.0]))]
    #[case(Some(vec![-200.0, 40.0]))]
    #[case(Some(vec![f64::NAN, 40.0]))]
    fn rejects_unusable_coordinates(#[case] coordinate: Option<Vec<f64>>) {
        let place = RecommendedPlace {
            coordinate,
            ..RecommendedPlace::new("Nowhere", "")
        };
        assert_eq!(place.waypoint(), None);
    }

    #[rstest]
    #[case(vec![-100.0, 40.0])]
    #[case(vec![0.0, 51.48])]
    #[case(vec![-78.5, 0.0])]
    fn accepts_well_formed_coordinates(#[case] raw: Vec<f64>) {
        let place = RecommendedPlace::new("Somewhere", "").with_raw_coordinate(raw.clone());
        let waypoint = place.waypoint().expect("usable coordinate");
        assert_eq!([waypoint.longitude(), waypoint.latitude()], [raw[0], raw[1]]);
    }

    #[rstest]
    fn placeholder_points_at_the_location() {
        let coordinate = Coordinate::new(-104.99, 39.74).expect("valid coordinate");
        let location = Location::new("denver", "Denver, Colorado", coordinate);
        let placeholder = RecommendedPlace::placeholder(&location);
        assert_eq!(placeholder.name, "Denver, Colorado");
        assert_eq!(placeholder.waypoint(), Some(coordinate));
        assert!(placeholder.category.is_none());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn optional_fields_default_when_absent() {
        let place: RecommendedPlace =
            serde_json::from_str(r#"{"name": "Arches"}"#).expect("minimal place");
        assert_eq!(place, RecommendedPlace::new("Arches", ""));
    }
}
