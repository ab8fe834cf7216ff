//! Deterministic collaborator doubles used by unit and behaviour tests.
//!
//! The stubs return pre-configured responses and record what they were asked
//! so tests can assert on the requests the planner issues.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::{
    GeocodeError, Geocoder, Location, RecommendError, RecommendationContext, RecommendedPlace,
    Recommender, Route, RouteRequest, Router, RoutingError,
};

fn record<T: Clone>(log: &Mutex<Vec<T>>, entry: &T) {
    log.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(entry.clone());
}

fn snapshot<T: Clone>(log: &Mutex<Vec<T>>) -> Vec<T> {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// `Router` returning a fixed outcome for every request.
#[derive(Debug)]
pub struct StubRouter {
    response: Result<Option<Route>, RoutingError>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl StubRouter {
    /// Always return `route`.
    #[must_use]
    pub const fn with_route(route: Route) -> Self {
        Self::responding(Ok(Some(route)))
    }

    /// Always report that no route exists.
    #[must_use]
    pub const fn without_route() -> Self {
        Self::responding(Ok(None))
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn with_error(error: RoutingError) -> Self {
        Self::responding(Err(error))
    }

    const fn responding(response: Result<Option<Route>, RoutingError>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RouteRequest> {
        snapshot(&self.requests)
    }
}

impl Router for StubRouter {
    fn route(&self, request: &RouteRequest) -> Result<Option<Route>, RoutingError> {
        record(&self.requests, request);
        self.response.clone()
    }
}

/// `Recommender` returning a fixed outcome for every context.
#[derive(Debug)]
pub struct StubRecommender {
    response: Result<Vec<RecommendedPlace>, RecommendError>,
    contexts: Mutex<Vec<RecommendationContext>>,
}

impl StubRecommender {
    /// Always return `places`.
    #[must_use]
    pub const fn with_places(places: Vec<RecommendedPlace>) -> Self {
        Self::responding(Ok(places))
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn with_error(error: RecommendError) -> Self {
        Self::responding(Err(error))
    }

    const fn responding(response: Result<Vec<RecommendedPlace>, RecommendError>) -> Self {
        Self {
            response,
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Contexts received so far, in arrival order.
    #[must_use]
    pub fn contexts(&self) -> Vec<RecommendationContext> {
        snapshot(&self.contexts)
    }
}

impl Recommender for StubRecommender {
    fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<RecommendedPlace>, RecommendError> {
        record(&self.contexts, context);
        self.response.clone()
    }
}

/// `Geocoder` backed by an exact-match lookup table.
#[derive(Debug, Default, Clone)]
pub struct StubGeocoder {
    locations: HashMap<String, Location>,
}

impl StubGeocoder {
    /// Resolve `query` to `location`.
    #[must_use]
    pub fn with_location(mut self, query: impl Into<String>, location: Location) -> Self {
        self.locations.insert(query.into(), location);
        self
    }
}

impl Geocoder for StubGeocoder {
    fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        Ok(self.locations.get(trimmed).cloned().into_iter().collect())
    }
}
