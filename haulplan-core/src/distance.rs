//! Great-circle distance between WGS84 coordinates.

use geo::{Coord, Distance, Haversine, Point};

/// Mean earth radius used by [`great_circle_distance`], in meters.
///
/// Matches the GRS80 mean radius `geo` uses for its haversine measure.
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Spherical-earth distance between `from` and `to`, in meters.
///
/// Coordinates use `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::great_circle_distance;
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let meters = great_circle_distance(london, paris);
/// assert!((meters - 343_500.0).abs() < 2_000.0);
/// ```
#[must_use]
pub fn great_circle_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Sum of consecutive great-circle distances along `path`, in meters.
///
/// Paths with fewer than two coordinates have zero length.
pub fn path_length<I>(path: I) -> f64
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut coords = path.into_iter();
    let Some(mut previous) = coords.next() else {
        return 0.0;
    };
    coords.fold(0.0, |total, next| {
        let leg = great_circle_distance(previous, next);
        previous = next;
        total + leg
    })
}
