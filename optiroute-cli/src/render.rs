//! Plain-text and JSON rendering of command results.

use clap::ValueEnum;
use optiroute_core::{GeocodeCandidate, OptimizedRoute};
use serde::{Deserialize, Serialize};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render an optimised route as a human-readable summary.
///
/// Distances print to two decimals, times to one, fuel cost and efficiency
/// as whole numbers.
pub(crate) fn render_route_text(optimized: &OptimizedRoute) -> String {
    let route = &optimized.route;
    let stats = &optimized.stats;
    let status = if route.is_estimate() {
        "Optimized (estimate)"
    } else {
        "Optimized"
    };

    let mut lines = vec![
        format!("Strategy: {}", route.source()),
        format!("Status: {status}"),
        "Order:".to_owned(),
    ];
    lines.extend(
        route
            .ordered_waypoints()
            .iter()
            .enumerate()
            .map(|(position, waypoint)| {
                format!(
                    "  {}. {} ({:.6}, {:.6})",
                    position.saturating_add(1),
                    waypoint.name,
                    waypoint.lat(),
                    waypoint.lon()
                )
            }),
    );
    lines.extend([
        format!("Distance: {:.2} km", stats.distance_km),
        format!("Time: {:.1} min", stats.duration_minutes),
        format!("Fuel cost: {:.0}", stats.fuel_cost),
        format!("Efficiency: {:.0}%", stats.efficiency_percent),
    ]);
    lines.join("\n")
}

/// Render geocode candidates as a numbered list in rank order.
pub(crate) fn render_candidates_text(candidates: &[GeocodeCandidate]) -> String {
    if candidates.is_empty() {
        return "No matches found.".to_owned();
    }
    candidates
        .iter()
        .enumerate()
        .map(|(position, candidate)| {
            format!(
                "{}. {} ({:.6}, {:.6})",
                position.saturating_add(1),
                candidate.display_name,
                candidate.location.y,
                candidate.location.x
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
