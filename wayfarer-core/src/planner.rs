//! Compose the collaborators into a trip plan.
//!
//! Only a failed route lookup is fatal. Recommendations are enrichment: when
//! the recommender fails the route is planned without waypoints and the
//! destination gets a single placeholder POI.
//!
//! The stop recommendations feed the route request, so those two calls run in
//! sequence. The destination lookup has no dependents and runs on a scoped
//! thread alongside them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    Coordinate, DEFAULT_MAX_WAYPOINTS, GeocodeError, Geocoder, Location, RecommendationContext,
    RecommendedPlace, Recommender, Route, RouteRequest, RouteSegment, Router, RoutingError,
    TargetDuration, segment_route, segments_equivalent, select_waypoint_places,
};

/// Default number of destination POIs requested.
pub const DEFAULT_MAX_DESTINATION_POIS: usize = 5;

/// Tunables for [`TripPlanner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Target driving time per segment.
    pub target: TargetDuration,
    /// Cap on recommended waypoints forwarded to the router. Values above
    /// [`DEFAULT_MAX_WAYPOINTS`] are clamped to it when planning.
    pub max_waypoints: usize,
    /// Number of destination POIs to request; zero disables the lookup.
    pub max_destination_pois: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            target: TargetDuration::default(),
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            max_destination_pois: DEFAULT_MAX_DESTINATION_POIS,
        }
    }
}

impl PlannerConfig {
    /// Set the target driving time per segment.
    #[must_use]
    pub const fn with_target(mut self, target: TargetDuration) -> Self {
        self.target = target;
        self
    }

    /// Set the waypoint cap.
    #[must_use]
    pub const fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    /// Set the number of destination POIs to request.
    #[must_use]
    pub const fn with_max_destination_pois(mut self, max_destination_pois: usize) -> Self {
        self.max_destination_pois = max_destination_pois;
        self
    }
}

/// Outcome of an optional recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecommendationStatus {
    /// The recommender answered.
    Available,
    /// The recommender failed; a fallback was used.
    Unavailable,
    /// No recommendations were requested.
    Skipped,
}

/// Errors returned by [`TripPlanner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The router found no route between the stops.
    #[error("no route found between the requested locations")]
    NoRouteFound,
    /// The router failed.
    #[error("route lookup failed: {0}")]
    Routing(#[from] RoutingError),
    /// Geocoding a query failed.
    #[error("failed to geocode {query:?}: {source}")]
    Geocode {
        /// Query being resolved.
        query: String,
        /// Underlying geocoder error.
        #[source]
        source: GeocodeError,
    },
    /// The geocoder returned no match.
    #[error("no location found for {query:?}")]
    LocationNotFound {
        /// Query being resolved.
        query: String,
    },
    /// The geocoder panicked while resolving a query.
    #[error("geocoding {query:?} aborted unexpectedly")]
    GeocodeAborted {
        /// Query being resolved.
        query: String,
    },
}

/// A planned trip: the route, its segments and the recommended places.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    /// Resolved origin.
    pub origin: Location,
    /// Resolved destination.
    pub destination: Location,
    /// Route through every waypoint.
    pub route: Route,
    /// Waypoints forwarded to the router, in order.
    pub waypoints: Vec<Coordinate>,
    /// Recommended places behind `waypoints`.
    pub stops: Vec<RecommendedPlace>,
    /// Points of interest at the destination.
    pub destination_pois: Vec<RecommendedPlace>,
    /// Target used for `segments`.
    pub target: TargetDuration,
    /// Route segments for `target`.
    pub segments: Vec<RouteSegment>,
    /// Outcome of the along-route recommendation request.
    pub route_recommendations: RecommendationStatus,
    /// Outcome of the destination recommendation request.
    pub destination_recommendations: RecommendationStatus,
}

impl TripPlan {
    /// Recompute the segments for a new target from the original route.
    ///
    /// The segment list is replaced wholesale. Returns `true` when the new
    /// boundaries differ from the previous ones.
    pub fn retarget(&mut self, target: TargetDuration) -> bool {
        let segments = segment_route(&self.route, target);
        let changed = !segments_equivalent(&self.segments, &segments);
        self.target = target;
        self.segments = segments;
        changed
    }
}

/// Plans trips using a router and a recommender.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfarer_core::test_support::{StubRecommender, StubRouter};
/// use wayfarer_core::{Coordinate, Location, PlannerConfig, Route, TripPlanner};
///
/// let origin = Location::new("sf", "San Francisco", Coordinate::new(-122.42, 37.77)?);
/// let destination = Location::new("la", "Los Angeles", Coordinate::new(-118.24, 34.05)?);
/// let route = Route::new(
///     vec![origin.coordinate, destination.coordinate],
///     600_000.0,
///     Duration::from_secs(21_600),
/// )?;
///
/// let planner = TripPlanner::new(
///     StubRouter::with_route(route),
///     StubRecommender::with_places(Vec::new()),
///     PlannerConfig::default(),
/// );
/// let plan = planner.plan(&origin, &destination)?;
/// assert_eq!(plan.segments.len(), 1);
/// assert!(plan.waypoints.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TripPlanner<R, C> {
    router: R,
    recommender: C,
    config: PlannerConfig,
}

impl<R: Router, C: Recommender> TripPlanner<R, C> {
    /// Construct a planner.
    pub const fn new(router: R, recommender: C, config: PlannerConfig) -> Self {
        Self {
            router,
            recommender,
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a trip between two resolved locations.
    ///
    /// # Errors
    /// Returns [`PlanError::NoRouteFound`] when the router finds no route and
    /// [`PlanError::Routing`] when it fails. Recommendation failures are not
    /// errors.
    pub fn plan(&self, origin: &Location, destination: &Location) -> Result<TripPlan, PlanError> {
        thread::scope(|scope| {
            let lookup = scope.spawn(|| self.destination_pois(origin, destination));
            let routed = self.route_via_stops(origin, destination);
            let (destination_pois, destination_recommendations) =
                lookup.join().unwrap_or_else(|_| {
                    warn!("destination recommendation lookup panicked");
                    (
                        vec![RecommendedPlace::placeholder(destination)],
                        RecommendationStatus::Unavailable,
                    )
                });
            let (route, stops, route_recommendations) = routed?;

            let waypoints = stops.iter().filter_map(RecommendedPlace::waypoint).collect();
            let segments = segment_route(&route, self.config.target);
            Ok(TripPlan {
                origin: origin.clone(),
                destination: destination.clone(),
                route,
                waypoints,
                stops,
                destination_pois,
                target: self.config.target,
                segments,
                route_recommendations,
                destination_recommendations,
            })
        })
    }

    /// Geocode both queries, then plan the trip.
    ///
    /// The two lookups are independent and run concurrently; the first
    /// match for each query is used.
    ///
    /// # Errors
    /// Returns [`PlanError::Geocode`] or [`PlanError::LocationNotFound`] when
    /// either query cannot be resolved, then anything [`Self::plan`] returns.
    pub fn plan_from_queries(
        &self,
        geocoder: &dyn Geocoder,
        origin_query: &str,
        destination_query: &str,
    ) -> Result<TripPlan, PlanError> {
        let (origin, destination) = thread::scope(|scope| {
            let destination = scope.spawn(|| resolve(geocoder, destination_query));
            let origin = resolve(geocoder, origin_query);
            let destination = destination.join().unwrap_or_else(|_| {
                warn!("destination geocoding for {destination_query:?} panicked");
                Err(PlanError::GeocodeAborted {
                    query: destination_query.to_owned(),
                })
            });
            (origin, destination)
        });
        self.plan(&origin?, &destination?)
    }

    fn route_via_stops(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<(Route, Vec<RecommendedPlace>, RecommendationStatus), PlanError> {
        let (stops, status) = self.recommend_stops(origin, destination);
        let waypoints = stops.iter().filter_map(RecommendedPlace::waypoint).collect();
        let request =
            RouteRequest::new(origin.coordinate, destination.coordinate).with_waypoints(waypoints);
        debug!("requesting route through {} stops", request.stop_count());
        let route = self
            .router
            .route(&request)?
            .ok_or(PlanError::NoRouteFound)?;
        Ok((route, stops, status))
    }

    fn recommend_stops(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> (Vec<RecommendedPlace>, RecommendationStatus) {
        let max_waypoints = self.waypoint_cap();
        if max_waypoints == 0 {
            return (Vec::new(), RecommendationStatus::Skipped);
        }
        let context =
            RecommendationContext::along_route(origin.clone(), destination.clone(), max_waypoints);
        match self.recommender.recommend(&context) {
            Ok(places) => (
                select_waypoint_places(&places, max_waypoints),
                RecommendationStatus::Available,
            ),
            Err(err) => {
                warn!("planning without waypoints: {err}");
                (Vec::new(), RecommendationStatus::Unavailable)
            }
        }
    }

    /// Configured waypoint cap, bounded by what the router accepts.
    fn waypoint_cap(&self) -> usize {
        let requested = self.config.max_waypoints;
        if requested > DEFAULT_MAX_WAYPOINTS {
            warn!("clamping waypoint cap {requested} to {DEFAULT_MAX_WAYPOINTS}");
            DEFAULT_MAX_WAYPOINTS
        } else {
            requested
        }
    }

    fn destination_pois(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> (Vec<RecommendedPlace>, RecommendationStatus) {
        let limit = self.config.max_destination_pois;
        if limit == 0 {
            return (Vec::new(), RecommendationStatus::Skipped);
        }
        let context =
            RecommendationContext::at_destination(origin.clone(), destination.clone(), limit);
        match self.recommender.recommend(&context) {
            Ok(mut places) => {
                places.truncate(limit);
                (places, RecommendationStatus::Available)
            }
            Err(err) => {
                warn!("using placeholder destination POI: {err}");
                (
                    vec![RecommendedPlace::placeholder(destination)],
                    RecommendationStatus::Unavailable,
                )
            }
        }
    }
}

fn resolve(geocoder: &dyn Geocoder, query: &str) -> Result<Location, PlanError> {
    geocoder
        .search(query)
        .map_err(|source| PlanError::Geocode {
            query: query.to_owned(),
            source,
        })?
        .into_iter()
        .next()
        .ok_or_else(|| PlanError::LocationNotFound {
            query: query.to_owned(),
        })
}

/// A submission issued by [`PlanningSession::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTicket {
    generation: u64,
}

/// Last-submission-wins guard for concurrent planning requests.
///
/// Each submission takes a ticket; results for superseded tickets are
/// discarded so a slow, stale response never replaces a newer plan.
///
/// # Examples
/// ```
/// use wayfarer_core::PlanningSession;
///
/// let session = PlanningSession::default();
/// let first = session.begin();
/// let second = session.begin();
/// assert_eq!(session.accept(first, "stale"), None);
/// assert_eq!(session.accept(second, "fresh"), Some("fresh"));
/// ```
#[derive(Debug, Default)]
pub struct PlanningSession {
    latest: AtomicU64,
}

impl PlanningSession {
    /// Start a new submission, superseding every earlier ticket.
    pub fn begin(&self) -> PlanTicket {
        let previous = self.latest.fetch_add(1, Ordering::AcqRel);
        PlanTicket {
            generation: previous.wrapping_add(1),
        }
    }

    /// Whether `ticket` belongs to the most recent submission.
    #[must_use]
    pub fn is_current(&self, ticket: PlanTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.generation
    }

    /// Pass `result` through only if `ticket` is still current.
    pub fn accept<T>(&self, ticket: PlanTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!("discarding result of superseded planning request");
            None
        }
    }
}
