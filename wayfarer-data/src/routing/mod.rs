//! HTTP routing through an OSRM server.
//!
//! This module provides [`HttpRouter`], an implementation of
//! [`wayfarer_core::Router`] that fetches driving routes, including
//! intermediate waypoints, from the OSRM Route API.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use wayfarer_data::routing::{HttpRouter, HttpRouterConfig};
//!
//! let config = HttpRouterConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let router = HttpRouter::with_config(config)?;
//! # Ok::<(), wayfarer_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouter, HttpRouterConfig};
