//! Unit tests for plain-text rendering of routes and candidates.

use crate::render::{render_candidates_text, render_route_text};
use geo::Coord;
use optiroute_core::test_support::StraightLineTripClient;
use optiroute_core::{
    GeocodeCandidate, NewWaypoint, OptimizedRoute, RouteOrchestrator, RouteStrategy,
    WaypointStore,
};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> WaypointStore {
    let mut store = WaypointStore::new();
    for (name, lon) in [("A", 0.0), ("B", 10.0), ("C", 1.0)] {
        store
            .add(NewWaypoint::new(name, 0.0, lon))
            .expect("valid waypoint");
    }
    store
}

fn optimise(store: &WaypointStore, strategy: RouteStrategy) -> OptimizedRoute {
    RouteOrchestrator::new(StraightLineTripClient::default())
        .optimize_store(store, strategy)
        .expect("optimisation should succeed")
}

#[rstest]
fn local_route_is_rendered_as_estimate(store: WaypointStore) {
    let text = render_route_text(&optimise(&store, RouteStrategy::LocalNearestNeighbour));
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(
        lines.get(..6),
        Some(
            &[
                "Strategy: nearest-neighbour",
                "Status: Optimized (estimate)",
                "Order:",
                "  1. A (0.000000, 0.000000)",
                "  2. C (0.000000, 1.000000)",
                "  3. B (0.000000, 10.000000)",
            ][..]
        )
    );
    assert!(lines.iter().any(|line| line.starts_with("Distance: ")));
    assert!(lines.iter().any(|line| line.ends_with(" min")));
    assert_eq!(lines.last(), Some(&"Efficiency: 100%"));
}

#[rstest]
fn trip_route_is_not_marked_as_estimate(store: WaypointStore) {
    let optimized = optimise(&store, RouteStrategy::RemoteTrip);
    let text = render_route_text(&optimized);

    assert!(text.contains("Strategy: trip\nStatus: Optimized\n"));
    let distance = format!("Distance: {:.2} km", optimized.stats.distance_km);
    assert!(text.contains(&distance));
}

#[rstest]
fn candidates_are_numbered_in_rank_order() {
    let candidates = vec![
        GeocodeCandidate {
            display_name: "Cubbon Park, Bengaluru".to_owned(),
            location: Coord { x: 77.59, y: 12.97 },
        },
        GeocodeCandidate {
            display_name: "Lalbagh, Bengaluru".to_owned(),
            location: Coord { x: 77.58, y: 12.95 },
        },
    ];

    assert_eq!(
        render_candidates_text(&candidates),
        "1. Cubbon Park, Bengaluru (12.970000, 77.590000)\n\
         2. Lalbagh, Bengaluru (12.950000, 77.580000)"
    );
}

#[rstest]
fn empty_candidates_render_a_notice() {
    assert_eq!(render_candidates_text(&[]), "No matches found.");
}
