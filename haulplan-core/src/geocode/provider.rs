//! Geocoder trait for location-name lookups.

use geo::Coord;

use super::error::GeocodeError;

/// Resolve a location name to a coordinate.
///
/// Implementations return WGS84 coordinates with `x = longitude` and
/// `y = latitude`. A name with no match must produce
/// [`GeocodeError::NotFound`]; transport or service failures use the other
/// variants so callers can choose whether to tolerate them.
///
/// Geocoders must be `Send + Sync` so a single planner can serve concurrent
/// callers.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use haulplan_core::{GeocodeError, Geocoder};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
///         if name == "origin" {
///             Ok(Coord { x: 0.0, y: 0.0 })
///         } else {
///             Err(GeocodeError::NotFound { name: name.to_owned() })
///         }
///     }
/// }
///
/// let coord = Origin.resolve("origin")?;
/// assert_eq!(coord, Coord { x: 0.0, y: 0.0 });
/// assert!(Origin.resolve("elsewhere").is_err());
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Look up the coordinate for `name`.
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).resolve(name)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).resolve(name)
    }
}
