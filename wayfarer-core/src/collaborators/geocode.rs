//! Geocoder trait and its errors.

use thiserror::Error;

use crate::Location;

/// Errors from [`Geocoder::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query was empty after trimming whitespace.
    #[error("geocoding query must not be empty")]
    EmptyQuery,
    /// The request could not be sent or the connection failed.
    #[error("geocoding request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
    },
    /// The service did not answer in time.
    #[error("geocoding request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service replied with a non-success status.
    #[error("geocoding service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Status description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}

/// Resolve free-text queries into locations, best match first.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{Coordinate, GeocodeError, Geocoder, Location};
///
/// struct Fixed;
///
/// impl Geocoder for Fixed {
///     fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError> {
///         if query.trim().is_empty() {
///             return Err(GeocodeError::EmptyQuery);
///         }
///         let coordinate = Coordinate::new(-104.99, 39.74).expect("valid coordinate");
///         Ok(vec![Location::new("1", query, coordinate)])
///     }
/// }
///
/// let matches = Fixed.search("Denver")?;
/// assert_eq!(matches[0].display_name, "Denver");
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Return candidate locations for `query`.
    ///
    /// # Errors
    /// Implementations return [`GeocodeError::EmptyQuery`] for blank queries
    /// and the remaining variants for transport or decoding failures.
    fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError> {
        (**self).search(query)
    }
}
