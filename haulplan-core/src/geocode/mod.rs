//! Resolve free-text location names to coordinates.
//!
//! The [`Geocoder`] trait abstracts a name lookup service. Callers supply a
//! location name and receive a WGS84 [`Coord`](geo::Coord) or a
//! [`GeocodeError`] explaining why the name could not be resolved.
//!
//! [`CachedGeocoder`] wraps any implementation with an opt-in memo table for
//! callers that want repeated names resolved once.

mod cache;
mod error;
mod provider;

pub use cache::CachedGeocoder;
pub use error::GeocodeError;
pub use provider::Geocoder;
