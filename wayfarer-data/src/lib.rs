//! Adapters connecting `wayfarer-core` to external services.
//!
//! Responsibilities:
//! - Route through an OSRM server ([`routing`]).
//! - Geocode free-text queries through Nominatim ([`geocoding`]).
//! - Parse untrusted recommender payloads and serve them from files
//!   ([`recommendation`]).
//!
//! Boundaries:
//! - Do not encode domain rules (live in `wayfarer-core`).
//! - Keep blocking I/O off async executors; the HTTP adapters own a
//!   current-thread runtime and only borrow a multi-thread one.
//!
//! Invariants:
//! - Adapters are `Send + Sync` and hold no global mutable state.

mod http;

pub mod geocoding;
pub mod recommendation;
pub mod routing;

pub use http::ProviderBuildError;
