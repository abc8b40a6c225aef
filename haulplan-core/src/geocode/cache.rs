//! Memoising geocoder wrapper.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use geo::Coord;

use super::{GeocodeError, Geocoder};

/// Wrap a [`Geocoder`] so each name is looked up at most once successfully.
///
/// Only successful lookups are cached; failures are retried on the next call.
/// Once a name has a coordinate the cached value is returned for every later
/// call, so repeated queries cannot change an already-chosen coordinate.
///
/// The planner never caches on its own. Callers that reuse a geocoder across
/// many plans own this wrapper and its lifetime.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::{CachedGeocoder, GeocodeError, Geocoder};
///
/// struct Fixed;
///
/// impl Geocoder for Fixed {
///     fn resolve(&self, _name: &str) -> Result<Coord<f64>, GeocodeError> {
///         Ok(Coord { x: 1.0, y: 1.0 })
///     }
/// }
///
/// let cached = CachedGeocoder::new(Fixed);
/// cached.resolve("Depot")?;
/// assert_eq!(cached.cached_len(), 1);
/// # Ok::<(), GeocodeError>(())
/// ```
#[derive(Debug)]
pub struct CachedGeocoder<G> {
    inner: G,
    entries: Mutex<HashMap<String, Coord<f64>>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of names currently cached.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Borrow the wrapped geocoder.
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    /// Unwrap the geocoder, discarding the cache.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        if let Some(hit) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(*hit);
        }
        // The lock is released during the lookup so slow services do not
        // serialise unrelated names.
        let coord = self.inner.resolve(name)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(*entries.entry(name.to_owned()).or_insert(coord))
    }
}
