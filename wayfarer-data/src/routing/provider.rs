//! HTTP `Router` using OSRM's Route API.
//!
//! The [`Router`] trait is synchronous to keep the core embeddable; this
//! provider bridges to async `reqwest` by blocking on a Tokio runtime.

use std::time::Duration;

use log::{debug, warn};
use wayfarer_core::{Coordinate, MAX_ROUTING_STOPS, Route, RouteRequest, Router, RoutingError};

use super::osrm::{OsrmRoute, RouteResponse};
use crate::ProviderBuildError;
use crate::http::{BlockingClient, Fetched};

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "wayfarer-routing/0.1";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRouterConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile segment of the URL.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpRouterConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP router backed by the OSRM Route API.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the router drives requests on its own
/// current-thread runtime. Inside a multi-threaded runtime it borrows that
/// runtime through `block_in_place`. Inside a `current_thread` runtime it
/// falls back to its own runtime, which blocks the caller's executor for the
/// duration of the request.
///
/// # Example
///
/// ```no_run
/// use wayfarer_core::{Coordinate, RouteRequest, Router};
/// use wayfarer_data::routing::HttpRouter;
///
/// let router = HttpRouter::new("http://localhost:5000")?;
/// let request = RouteRequest::new(
///     Coordinate::new(-122.42, 37.77)?,
///     Coordinate::new(-118.24, 34.05)?,
/// );
/// if let Some(route) = router.route(&request)? {
///     println!("{:.0} km", route.distance / 1000.0);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpRouter {
    client: BlockingClient,
    config: HttpRouterConfig,
}

impl HttpRouter {
    /// Create a new router with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouterConfig::new(base_url))
    }

    /// Create a new router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRouterConfig) -> Result<Self, ProviderBuildError> {
        let client = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRouterConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for the given request.
    ///
    /// The URL format is
    /// `{base_url}/route/v1/{profile}/{coordinates}?overview=full&geometries=geojson`
    /// where coordinates are semicolon-separated `lon,lat` pairs in visiting
    /// order.
    fn build_route_url(&self, request: &RouteRequest) -> String {
        let coords = request
            .stops()
            .map(|stop| format!("{},{}", stop.longitude(), stop.latitude()))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Interpret a fetched body, falling back to the HTTP status when the
    /// body is not an OSRM document.
    fn interpret(fetched: &Fetched, url: &str) -> Result<Option<Route>, RoutingError> {
        match serde_json::from_str::<RouteResponse>(&fetched.body) {
            Ok(response) => convert_response(response),
            Err(_) if !fetched.status.is_success() => Err(RoutingError::Http {
                url: url.to_owned(),
                status: fetched.status.as_u16(),
                message: fetched
                    .status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned(),
            }),
            Err(err) => Err(RoutingError::Parse {
                message: err.to_string(),
            }),
        }
    }
}

/// Convert an OSRM response into the best route, if any.
fn convert_response(response: RouteResponse) -> Result<Option<Route>, RoutingError> {
    if response.is_unroutable() {
        debug!("OSRM found no route: {}", response.code);
        return Ok(None);
    }
    if !response.is_ok() {
        return Err(RoutingError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let Some(best) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    convert_route(best)
}

fn convert_route(route: OsrmRoute) -> Result<Option<Route>, RoutingError> {
    let coordinates = route
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinate::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| RoutingError::Parse {
            message: format!("invalid route geometry: {err}"),
        })?;
    let duration = Duration::try_from_secs_f64(route.duration).map_err(|err| {
        RoutingError::Parse {
            message: format!("invalid route duration {}: {err}", route.duration),
        }
    })?;
    match Route::new(coordinates, route.distance, duration) {
        Ok(route) => Ok(Some(route)),
        Err(err) => {
            warn!("discarding unusable OSRM route: {err}");
            Ok(None)
        }
    }
}

impl Router for HttpRouter {
    /// Fetch a route through every stop of `request`.
    ///
    /// Requests with more than [`MAX_ROUTING_STOPS`] stops are rejected
    /// before any I/O.
    fn route(&self, request: &RouteRequest) -> Result<Option<Route>, RoutingError> {
        let count = request.stop_count();
        if count > MAX_ROUTING_STOPS {
            return Err(RoutingError::TooManyStops {
                count,
                max: MAX_ROUTING_STOPS,
            });
        }

        let url = self.build_route_url(request);
        debug!("requesting OSRM route through {count} stops");
        let fetched = self
            .client
            .get(&url)
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        Self::interpret(&fetched, &url)
    }
}
