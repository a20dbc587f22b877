//! Distance measures between waypoints.
//!
//! [`DistanceEstimator`] ranks candidates for the nearest-neighbour heuristic
//! and is deliberately cheap. [`haversine_meters`] measures great-circle
//! distance and backs every distance reported to users.

use geo::Coord;

use crate::Waypoint;

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Pairwise distance used to rank candidate waypoints.
///
/// Implementations must be symmetric and return zero only for identical
/// coordinates. The value is a ranking key, never a reported distance.
pub trait DistanceEstimator {
    /// Estimate the distance between `a` and `b`.
    fn estimate(&self, a: &Waypoint, b: &Waypoint) -> f64;
}

/// Euclidean distance in the raw `(lat, lon)` plane, in degrees.
///
/// # Examples
/// ```
/// use optiroute_core::{DistanceEstimator, NewWaypoint, PlanarDistance, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// store.add(NewWaypoint::new("B", 3.0, 4.0))?;
/// let [a, b] = <[_; 2]>::try_from(store.snapshot()).expect("two waypoints");
///
/// assert_eq!(PlanarDistance.estimate(&a, &b), 5.0);
/// # Ok::<(), optiroute_core::WaypointError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanarDistance;

impl DistanceEstimator for PlanarDistance {
    #[expect(
        clippy::float_arithmetic,
        reason = "planar distance is a floating-point computation"
    )]
    fn estimate(&self, a: &Waypoint, b: &Waypoint) -> f64 {
        (a.lat() - b.lat()).hypot(a.lon() - b.lon())
    }
}

/// Great-circle distance in metres between two WGS84 coordinates.
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula requires floating-point trigonometry"
)]
#[must_use]
pub fn haversine_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_dlat = (b.y - a.y).to_radians() / 2.0;
    let half_dlon = (b.x - a.x).to_radians() / 2.0;
    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Total haversine length of a polyline in metres.
#[must_use]
pub fn path_length_meters(coords: &[Coord<f64>]) -> f64 {
    coords
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(haversine_meters(*from, *to)),
            _ => None,
        })
        .sum()
}

/// Weight of a minimum spanning tree over the haversine distances between
/// `waypoints`, in metres.
///
/// Any path or tour through every waypoint is at least this long, which makes
/// the value a lower bound for route efficiency. Uses Prim's algorithm in
/// `O(n²)`.
#[expect(
    clippy::float_arithmetic,
    reason = "accumulates floating-point edge weights"
)]
#[must_use]
pub fn spanning_tree_meters(waypoints: &[Waypoint]) -> f64 {
    let Some((first, rest)) = waypoints.split_first() else {
        return 0.0;
    };
    let mut outside: Vec<(&Waypoint, f64)> = rest
        .iter()
        .map(|wp| (wp, haversine_meters(first.location, wp.location)))
        .collect();
    let mut total = 0.0;
    while let Some(next) = closest_outside(&outside) {
        let (joined, weight) = outside.swap_remove(next);
        total += weight;
        for (candidate, best) in &mut outside {
            let via_joined = haversine_meters(joined.location, candidate.location);
            if via_joined < *best {
                *best = via_joined;
            }
        }
    }
    total
}

fn closest_outside(outside: &[(&Waypoint, f64)]) -> Option<usize> {
    outside
        .iter()
        .enumerate()
        .min_by(|(_, (_, lhs)), (_, (_, rhs))| lhs.total_cmp(rhs))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewWaypoint, WaypointId};
    use rstest::rstest;

    fn waypoint(raw_id: u64, lat: f64, lon: f64) -> Waypoint {
        NewWaypoint::new(format!("wp{raw_id}"), lat, lon).into_waypoint(WaypointId::new(raw_id))
    }

    #[rstest]
    fn planar_distance_is_symmetric() {
        let a = waypoint(1, 12.9, 77.5);
        let b = waypoint(2, 13.1, 77.7);
        assert_eq!(PlanarDistance.estimate(&a, &b), PlanarDistance.estimate(&b, &a));
    }

    #[rstest]
    fn planar_distance_zero_for_identical_coordinates() {
        let a = waypoint(1, 12.9, 77.5);
        let b = waypoint(2, 12.9, 77.5);
        assert_eq!(PlanarDistance.estimate(&a, &b), 0.0);
    }

    #[rstest]
    fn haversine_one_degree_of_latitude() {
        let meters = haversine_meters(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((meters - 111_195.0).abs() < 10.0, "got {meters}");
    }

    #[rstest]
    fn path_length_sums_legs() {
        let coords = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 2.0 },
        ];
        let direct = haversine_meters(coords[0], coords[2]);
        assert!((path_length_meters(&coords) - direct).abs() < 1e-6);
        assert_eq!(path_length_meters(&coords[..1]), 0.0);
    }

    #[rstest]
    fn spanning_tree_of_collinear_points_is_their_span() {
        let points = [waypoint(1, 0.0, 0.0), waypoint(2, 2.0, 0.0), waypoint(3, 1.0, 0.0)];
        let span = haversine_meters(points[0].location, points[1].location);
        assert!((spanning_tree_meters(&points) - span).abs() < 1e-6);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn spanning_tree_of_trivial_sets_is_zero(#[case] count: usize) {
        let points: Vec<_> = (0..count).map(|i| waypoint(i as u64, 0.0, 0.0)).collect();
        assert_eq!(spanning_tree_meters(&points), 0.0);
    }
}
