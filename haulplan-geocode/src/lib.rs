//! HTTP geocoding adapters for the Haulplan engine.
//!
//! This crate provides [`NominatimGeocoder`], an implementation of
//! [`haulplan_core::Geocoder`] that resolves location names through a
//! Nominatim-compatible search API.
//!
//! # Architecture
//!
//! The [`Geocoder`](haulplan_core::Geocoder) trait is synchronous so the
//! planner stays embeddable in synchronous contexts. The provider bridges its
//! async HTTP client to that interface by blocking on a Tokio runtime.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use haulplan_core::{CargoDetails, RoutePlanner};
//! use haulplan_geocode::{NominatimGeocoder, NominatimGeocoderConfig};
//!
//! let config = NominatimGeocoderConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("depot-planner/1.0");
//! let geocoder = NominatimGeocoder::with_config(config)?;
//!
//! let planner = RoutePlanner::new(geocoder);
//! let plan = planner.plan(&["Hamburg", "Bremen", "Hannover"], &CargoDetails::default())?;
//! println!("{} km", plan.total_distance_meters / 1000.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod provider;
mod response;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GeocoderBuildError, NominatimGeocoder,
    NominatimGeocoderConfig,
};
