//! HTTP `Geocoder` using the Nominatim search API.

use std::time::Duration;

use log::{debug, warn};
use url::Url;
use wayfarer_core::{GeocodeError, Geocoder, Location};

use super::nominatim::SearchResult;
use crate::ProviderBuildError;
use crate::http::{BlockingClient, Fetched};

/// Default user agent for Nominatim requests.
///
/// The public Nominatim usage policy requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "wayfarer-geocoding/0.1";

/// Default Nominatim endpoint.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default number of candidates requested per query.
pub const DEFAULT_LIMIT: usize = 5;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGeocoderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Comma-separated ISO 3166-1 country codes to restrict results to.
    pub country_codes: Option<String>,
    /// Maximum number of candidates per query.
    pub limit: usize,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country_codes: Some("us".to_string()),
            limit: DEFAULT_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Restrict results to the given country codes, or lift the restriction.
    #[must_use]
    pub fn with_country_codes(mut self, country_codes: Option<String>) -> Self {
        self.country_codes = country_codes;
        self
    }

    /// Set the maximum number of candidates per query.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
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

/// HTTP geocoder backed by Nominatim.
///
/// Blocking behaviour matches [`crate::routing::HttpRouter`].
///
/// # Example
///
/// ```no_run
/// use wayfarer_core::Geocoder;
/// use wayfarer_data::geocoding::HttpGeocoder;
///
/// let geocoder = HttpGeocoder::new("https://nominatim.openstreetmap.org")?;
/// let matches = geocoder.search("Moab, UT")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    client: BlockingClient,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a new geocoder with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a new geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let client = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpGeocoderConfig {
        &self.config
    }

    /// Build the search URL for `query`, percent-encoding the parameters.
    fn build_search_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let endpoint = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let limit = self.config.limit.to_string();
        let mut params = vec![("q", query), ("format", "jsonv2"), ("limit", limit.as_str())];
        if let Some(codes) = self.config.country_codes.as_deref() {
            params.push(("countrycodes", codes));
        }
        Url::parse_with_params(&endpoint, &params).map_err(|err| GeocodeError::Network {
            url: endpoint.clone(),
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `GeocodeError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GeocodeError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GeocodeError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Decode a search response, skipping entries with unusable coordinates.
fn convert_response(fetched: &Fetched, url: &str) -> Result<Vec<Location>, GeocodeError> {
    if !fetched.status.is_success() {
        return Err(GeocodeError::Http {
            url: url.to_owned(),
            status: fetched.status.as_u16(),
            message: fetched
                .status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned(),
        });
    }
    let results: Vec<SearchResult> =
        serde_json::from_str(&fetched.body).map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })?;
    Ok(results
        .into_iter()
        .filter_map(|result| {
            let name = result.display_name.clone();
            result
                .into_location()
                .map_err(|reason| warn!("skipping geocoding result {name:?}: {reason}"))
                .ok()
        })
        .collect())
}

impl Geocoder for HttpGeocoder {
    fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        let url = self.build_search_url(trimmed)?;
        debug!("geocoding {trimmed:?}");
        let fetched = self
            .client
            .get(url.as_str())
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        convert_response(&fetched, url.as_str())
    }
}
