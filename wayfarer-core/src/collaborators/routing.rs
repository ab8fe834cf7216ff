//! Router trait and its errors.

use thiserror::Error;

use crate::{Route, RouteRequest};

/// Errors from [`Router::route`].
///
/// "No route between these stops" is not an error; routers report it as
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request exceeds the engine's stop limit.
    #[error("route request has {count} stops but the router accepts at most {max}")]
    TooManyStops {
        /// Stops in the request, including origin and destination.
        count: usize,
        /// Engine limit.
        max: usize,
    },
    /// The request could not be sent or the connection failed.
    #[error("routing request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
    },
    /// The service did not answer in time.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service replied with a non-success status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Status description.
        message: String,
    },
    /// The service reported an error code.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Engine status code.
        code: String,
        /// Engine message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}

/// Produce one continuous driving route through the stops of a request.
///
/// Implementations must visit the waypoints in the given order and return a
/// [`Route`] whose geometry, distance and duration cover every stop.
pub trait Router: Send + Sync {
    /// Route through `request`, or `Ok(None)` when no route exists.
    ///
    /// # Errors
    /// Returns [`RoutingError`] when the request is rejected or the service
    /// cannot be reached.
    fn route(&self, request: &RouteRequest) -> Result<Option<Route>, RoutingError>;
}

impl<T: Router + ?Sized> Router for &T {
    fn route(&self, request: &RouteRequest) -> Result<Option<Route>, RoutingError> {
        (**self).route(request)
    }
}
