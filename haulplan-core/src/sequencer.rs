//! Nearest-neighbour sequencing of resolved stops.

use geo::Coord;

use crate::distance::great_circle_distance;

/// Order `coords` by a greedy nearest-neighbour walk from the first entry.
///
/// Returns indices into `coords`. From the current stop the walk moves to the
/// closest unvisited stop by great-circle distance; ties go to the lowest
/// index, so the result is deterministic for a given input. The walk makes
/// O(n²) distance evaluations and does not guarantee the shortest tour.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::nearest_neighbour_order;
///
/// let coords = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 3.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
/// ];
/// assert_eq!(nearest_neighbour_order(&coords), vec![0, 2, 1]);
/// ```
#[must_use]
pub fn nearest_neighbour_order(coords: &[Coord<f64>]) -> Vec<usize> {
    let Some(&start) = coords.first() else {
        return Vec::new();
    };
    let mut order = Vec::with_capacity(coords.len());
    order.push(0);
    // Kept in ascending index order so the first minimum wins ties.
    let mut unvisited: Vec<(usize, Coord<f64>)> =
        coords.iter().copied().enumerate().skip(1).collect();
    let mut current = start;
    while let Some(slot) = closest(current, &unvisited) {
        let (index, coord) = unvisited.remove(slot);
        order.push(index);
        current = coord;
    }
    order
}

/// Slot of the candidate nearest to `from`, preferring earlier slots on ties.
fn closest(from: Coord<f64>, candidates: &[(usize, Coord<f64>)]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .map(|(slot, (_, coord))| (slot, great_circle_distance(from, *coord)))
        .min_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs))
        .map(|(slot, _)| slot)
}
