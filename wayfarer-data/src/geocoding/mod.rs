//! Free-text geocoding through Nominatim.
//!
//! [`HttpGeocoder`] implements [`wayfarer_core::Geocoder`] against the
//! Nominatim `search` endpoint, restricted to the United States by default.

mod nominatim;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_LIMIT, DEFAULT_USER_AGENT, HttpGeocoder, HttpGeocoderConfig,
};
