//! Test-only, in-memory `Geocoder` implementation used by unit and behaviour
//! tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;

use crate::{GeocodeError, Geocoder};

/// In-memory `Geocoder` backed by a fixed lookup table.
///
/// Names missing from the table resolve to [`GeocodeError::NotFound`]. Names
/// registered with [`MemoryGeocoder::with_failure`] return the configured
/// error instead. Every call is counted so tests can assert how often the
/// planner queried the service.
#[derive(Debug, Default)]
pub struct MemoryGeocoder {
    locations: HashMap<String, Coord<f64>>,
    failures: HashMap<String, GeocodeError>,
    lookups: AtomicUsize,
}

impl MemoryGeocoder {
    /// Create a geocoder from `(name, coordinate)` pairs.
    pub fn with_locations<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        Self {
            locations: locations
                .into_iter()
                .map(|(name, coord)| (name.into(), coord))
                .collect(),
            ..Self::default()
        }
    }

    /// Register a single location.
    #[must_use]
    pub fn with_location(mut self, name: impl Into<String>, coord: Coord<f64>) -> Self {
        self.locations.insert(name.into(), coord);
        self
    }

    /// Make lookups of `name` fail with `error`.
    #[must_use]
    pub fn with_failure(mut self, name: impl Into<String>, error: GeocodeError) -> Self {
        self.failures.insert(name.into(), error);
        self
    }

    /// Number of `resolve` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl Geocoder for MemoryGeocoder {
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = self.failures.get(name) {
            return Err(error.clone());
        }
        self.locations
            .get(name)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                name: name.to_owned(),
            })
    }
}

/// Build a coordinate `meters` east of `origin` along the equator.
///
/// Moving along the equator keeps the great-circle distance proportional to
/// the longitude delta, which makes leg lengths easy to engineer in tests.
pub fn east_of(origin: Coord<f64>, meters: f64) -> Coord<f64> {
    let delta_degrees = (meters / crate::distance::MEAN_EARTH_RADIUS_METERS).to_degrees();
    Coord {
        x: origin.x + delta_degrees,
        y: origin.y,
    }
}
