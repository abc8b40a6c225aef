//! Nominatim search API response types.
//!
//! The `/search` endpoint with `format=jsonv2` returns a JSON array of
//! matches ordered by relevance. Coordinates are encoded as decimal strings.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use geo::Coord;
use haulplan_core::GeocodeError;
use serde::Deserialize;

/// One match from the Nominatim search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    /// Latitude in decimal degrees, as a string.
    pub lat: String,
    /// Longitude in decimal degrees, as a string.
    pub lon: String,
    /// Human-readable address of the match.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchHit {
    /// Parse the hit into a WGS84 coordinate.
    ///
    /// Non-numeric, non-finite or out-of-range values are reported as
    /// [`GeocodeError::Parse`].
    pub fn coordinate(&self) -> Result<Coord<f64>, GeocodeError> {
        let lat = parse_degrees("lat", &self.lat, 90.0)?;
        let lon = parse_degrees("lon", &self.lon, 180.0)?;
        Ok(Coord { x: lon, y: lat })
    }
}

fn parse_degrees(field: &str, raw: &str, limit: f64) -> Result<f64, GeocodeError> {
    let value: f64 = raw.trim().parse().map_err(|_| GeocodeError::Parse {
        message: format!("{field} {raw:?} is not a number"),
    })?;
    if !value.is_finite() || value.abs() > limit {
        return Err(GeocodeError::Parse {
            message: format!("{field} {raw:?} is outside ±{limit}°"),
        });
    }
    Ok(value)
}
