//! Nominatim-backed `Geocoder`.
//!
//! [`NominatimGeocoder`] issues one `GET /search?q=<name>&format=jsonv2&limit=1`
//! request per lookup and takes the top match.

use std::time::Duration;

use geo::Coord;
use haulplan_core::{GeocodeError, Geocoder};
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use crate::response::SearchHit;

/// Default user agent for Nominatim requests.
///
/// The public Nominatim usage policy requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "haulplan/0.1";

/// Default Nominatim base URL.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while constructing a [`NominatimGeocoder`].
#[derive(Debug, Error)]
pub enum GeocoderBuildError {
    /// The base URL could not be parsed.
    #[error("invalid geocoder base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        base_url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatimGeocoderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimGeocoderConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

/// Geocoder backed by a Nominatim search endpoint.
///
/// The provider owns a current-thread Tokio runtime reused across lookups.
/// When called from inside a multi-threaded Tokio runtime it blocks on that
/// runtime's handle via [`tokio::task::block_in_place`] instead; inside a
/// `current_thread` runtime it falls back to its own runtime, which may
/// deadlock if the caller's runtime drives IO this request depends on.
///
/// Timeouts come from [`NominatimGeocoderConfig::timeout`]; the provider does
/// not retry.
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimGeocoderConfig,
    search_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("search_url", &self.search_url.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocoderBuildError> {
        Self::with_config(NominatimGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, GeocoderBuildError> {
        let search_url = Url::parse(&format!(
            "{}/search",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|source| GeocoderBuildError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(GeocoderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GeocoderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            search_url,
            runtime,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &NominatimGeocoderConfig {
        &self.config
    }

    /// Build the search URL for `name`.
    fn build_search_url(&self, name: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", name)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        url
    }

    async fn resolve_async(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        let url = self.build_search_url(name);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let hits: Vec<SearchHit> = response.json().await.map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })?;

        Self::convert_response(name, &hits)
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
            };
        }

        GeocodeError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Take the top match, or report the name as not found.
    fn convert_response(name: &str, hits: &[SearchHit]) -> Result<Coord<f64>, GeocodeError> {
        let Some(top) = hits.first() else {
            return Err(GeocodeError::NotFound {
                name: name.to_owned(),
            });
        };
        let coord = top.coordinate()?;
        debug!(
            "Geocoded {name:?} to ({}, {}) via {:?}",
            coord.y, coord.x, top.display_name
        );
        Ok(coord)
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        if name.trim().is_empty() {
            return Err(GeocodeError::NotFound {
                name: name.to_owned(),
            });
        }

        // block_in_place requires a multi-threaded runtime; current_thread
        // callers fall back to the owned runtime.
        let future = self.resolve_async(name);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
