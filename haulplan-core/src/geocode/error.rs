use thiserror::Error;

/// Errors from [`crate::geocode::Geocoder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service has no match for the requested name.
    ///
    /// Planning always drops such locations, regardless of the configured
    /// [`ResolutionPolicy`](crate::ResolutionPolicy).
    #[error("no coordinates found for {name:?}")]
    NotFound {
        /// The name that failed to resolve.
        name: String,
    },
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Underlying transport error message.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The service response could not be interpreted.
    #[error("failed to parse geocoder response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

impl GeocodeError {
    /// Return `true` when the error means the name simply has no match.
    ///
    /// # Examples
    /// ```
    /// use haulplan_core::GeocodeError;
    ///
    /// let err = GeocodeError::NotFound { name: "Atlantis".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
