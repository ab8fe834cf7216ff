//! Recommender trait, request context and errors.
//!
//! Recommenders backed by a language model are expected to send
//! [`RecommendationContext::prompt`] as their request and hand the reply to a
//! tolerant payload parser such as `wayfarer_data::recommendation`. Structured
//! sources like a payload file read the context fields directly.

use thiserror::Error;

use crate::{Location, RecommendedPlace};

/// Errors from [`Recommender::recommend`].
///
/// Recommendations are optional enrichment; callers degrade to an empty or
/// placeholder list instead of failing the plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The service could not be reached or refused the request.
    #[error("recommendations unavailable: {message}")]
    Unavailable {
        /// Underlying failure.
        message: String,
    },
    /// The service answered with something that could not be interpreted.
    #[error("failed to parse recommendations: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}

/// What the recommender is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecommendationKind {
    /// Stops worth visiting between origin and destination.
    AlongRoute,
    /// Points of interest at the destination.
    AtDestination,
}

/// Inputs describing a recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationContext {
    /// Trip origin.
    pub origin: Location,
    /// Trip destination.
    pub destination: Location,
    /// Kind of suggestions wanted.
    pub kind: RecommendationKind,
    /// Maximum number of suggestions wanted.
    pub limit: usize,
}

impl RecommendationContext {
    /// Ask for stops between `origin` and `destination`.
    #[must_use]
    pub const fn along_route(origin: Location, destination: Location, limit: usize) -> Self {
        Self {
            origin,
            destination,
            kind: RecommendationKind::AlongRoute,
            limit,
        }
    }

    /// Ask for points of interest at `destination`.
    #[must_use]
    pub const fn at_destination(origin: Location, destination: Location, limit: usize) -> Self {
        Self {
            origin,
            destination,
            kind: RecommendationKind::AtDestination,
            limit,
        }
    }

    /// Natural-language prompt for text-based recommenders.
    ///
    /// The reply format it asks for is the one the payload parser in
    /// `wayfarer-data` accepts.
    ///
    /// ```
    /// use wayfarer_core::{Coordinate, Location, RecommendationContext};
    ///
    /// let sf = Location::new("sf", "San Francisco, CA", Coordinate::new(-122.42, 37.77)?);
    /// let la = Location::new("la", "Los Angeles, CA", Coordinate::new(-118.24, 34.05)?);
    /// let prompt = RecommendationContext::along_route(sf, la, 5).prompt();
    /// assert!(prompt.contains("San Francisco, CA"));
    /// assert!(prompt.contains("up to 5"));
    /// # Ok::<(), wayfarer_core::CoordinateError>(())
    /// ```
    #[must_use]
    pub fn prompt(&self) -> String {
        let request = match self.kind {
            RecommendationKind::AlongRoute => format!(
                "Suggest up to {} interesting stops, in visiting order, for a road trip \
                 in the USA from {} to {}.",
                self.limit, self.origin.display_name, self.destination.display_name
            ),
            RecommendationKind::AtDestination => format!(
                "Suggest up to {} points of interest to visit in {}.",
                self.limit, self.destination.display_name
            ),
        };
        format!(
            "{request} Reply with a JSON array of objects with the fields name, \
             description, category and coordinates as [longitude, latitude]."
        )
    }
}

/// Suggest places to stop at or visit.
pub trait Recommender: Send + Sync {
    /// Return suggestions for `context`, best first.
    ///
    /// # Errors
    /// Returns [`RecommendError`] when the service fails or replies with
    /// unusable data.
    fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<RecommendedPlace>, RecommendError>;
}

impl<T: Recommender + ?Sized> Recommender for &T {
    fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<RecommendedPlace>, RecommendError> {
        (**self).recommend(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn trip() -> (Location, Location) {
        let denver = Coordinate::new(-104.99, 39.74).expect("valid coordinate");
        let moab = Coordinate::new(-109.55, 38.57).expect("valid coordinate");
        (
            Location::new("den", "Denver, CO", denver),
            Location::new("moab", "Moab, UT", moab),
        )
    }

    #[rstest]
    fn along_route_prompt_names_both_endpoints(trip: (Location, Location)) {
        let (origin, destination) = trip;
        let prompt = RecommendationContext::along_route(origin, destination, 7).prompt();
        assert!(prompt.contains("from Denver, CO to Moab, UT"));
        assert!(prompt.contains("up to 7"));
        assert!(prompt.contains("[longitude, latitude]"));
    }

    #[rstest]
    fn destination_prompt_names_only_the_destination(trip: (Location, Location)) {
        let (origin, destination) = trip;
        let context = RecommendationContext::at_destination(origin, destination, 3);
        assert_eq!(context.kind, RecommendationKind::AtDestination);
        let prompt = context.prompt();
        assert!(prompt.contains("visit in Moab, UT"));
        assert!(!prompt.contains("Denver"));
    }
}
