//! Behavioural tests for `RouteOrchestrator` strategy dispatch.

use optiroute_core::test_support::{FailingTripClient, StraightLineTripClient};
use optiroute_core::{
    NewWaypoint, OptimizedRoute, RouteError, RouteOrchestrator, RouteStrategy, TripClient,
    WaypointStore,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

type ClientCell = RefCell<Option<Box<dyn TripClient>>>;
type ResultCell = RefCell<Option<Result<OptimizedRoute, RouteError>>>;

#[fixture]
fn store() -> RefCell<WaypointStore> {
    RefCell::new(WaypointStore::new())
}

#[fixture]
fn client() -> ClientCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn add(store: &RefCell<WaypointStore>, name: &str, lat: f64, lon: f64) {
    store
        .borrow_mut()
        .add(NewWaypoint::new(name, lat, lon))
        .expect("valid waypoint");
}

fn visiting_order(result: &ResultCell) -> Vec<String> {
    let borrow = result.borrow();
    let optimised = borrow
        .as_ref()
        .expect("optimisation ran")
        .as_ref()
        .expect("expected Ok result");
    optimised
        .route
        .ordered_waypoints()
        .iter()
        .map(|wp| wp.name.clone())
        .collect()
}

// --- Given steps ---

#[given("three collinear waypoints A, B and C")]
fn three_waypoints(#[from(store)] store: &RefCell<WaypointStore>) {
    add(store, "A", 0.0, 0.0);
    add(store, "B", 0.0, 10.0);
    add(store, "C", 0.0, 1.0);
}

#[given("a single waypoint")]
fn single_waypoint(#[from(store)] store: &RefCell<WaypointStore>) {
    add(store, "A", 12.97, 77.59);
}

#[given("a trip service that is unreachable")]
fn unreachable_service(#[from(client)] client: &ClientCell) {
    *client.borrow_mut() = Some(Box::new(FailingTripClient::unreachable()));
}

#[given("a trip service that follows the input order")]
fn straight_line_service(#[from(client)] client: &ClientCell) {
    *client.borrow_mut() = Some(Box::new(StraightLineTripClient::default()));
}

// --- When steps ---

#[when("I optimise with the {strategy} strategy")]
fn optimise(
    strategy: RouteStrategy,
    #[from(store)] store: &RefCell<WaypointStore>,
    #[from(client)] client: &ClientCell,
    #[from(result)] result: &ResultCell,
) {
    let trip_client = client.borrow_mut().take().expect("trip service configured");
    let orchestrator = RouteOrchestrator::new(trip_client);
    *result.borrow_mut() = Some(orchestrator.optimize_store(&store.borrow(), strategy));
}

// --- Then steps ---

#[then("the visiting order is A, C, B")]
fn order_acb(#[from(result)] result: &ResultCell) {
    assert_eq!(visiting_order(result), ["A", "C", "B"]);
}

#[then("the visiting order is A, B, C")]
fn order_abc(#[from(result)] result: &ResultCell) {
    assert_eq!(visiting_order(result), ["A", "B", "C"]);
}

#[then("the route metrics are estimates")]
fn metrics_are_estimates(#[from(result)] result: &ResultCell) {
    let borrow = result.borrow();
    let optimised = borrow
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .expect("expected Ok result");
    assert!(optimised.route.is_estimate());
    assert_eq!(
        optimised.route.source(),
        RouteStrategy::LocalNearestNeighbour
    );
}

#[then("the route came from the trip service")]
fn route_from_trip_service(#[from(result)] result: &ResultCell) {
    let borrow = result.borrow();
    let optimised = borrow
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .expect("expected Ok result");
    assert_eq!(optimised.route.source(), RouteStrategy::RemoteTrip);
    assert!(!optimised.route.is_estimate());
}

#[then("an insufficient waypoints error is returned")]
fn insufficient_waypoints(#[from(result)] result: &ResultCell) {
    let borrow = result.borrow();
    assert!(matches!(
        borrow.as_ref(),
        Some(Err(RouteError::InsufficientWaypoints { count: 1 }))
    ));
}

#[then("a remote service error is returned")]
fn remote_service_error(#[from(result)] result: &ResultCell) {
    let borrow = result.borrow();
    assert!(matches!(
        borrow.as_ref(),
        Some(Err(RouteError::RemoteService(_)))
    ));
}

#[then("the store still holds {count} waypoints")]
fn store_holds(count: usize, #[from(store)] store: &RefCell<WaypointStore>) {
    assert_eq!(store.borrow().len(), count);
}

#[scenario(path = "tests/features/route_orchestration.feature", index = 0)]
fn nearest_neighbour_order(store: RefCell<WaypointStore>, client: ClientCell, result: ResultCell) {
    let _ = (store, client, result);
}

#[scenario(path = "tests/features/route_orchestration.feature", index = 1)]
fn single_waypoint_rejected(
    store: RefCell<WaypointStore>,
    client: ClientCell,
    result: ResultCell,
) {
    let _ = (store, client, result);
}

#[scenario(path = "tests/features/route_orchestration.feature", index = 2)]
fn remote_failure_reported(store: RefCell<WaypointStore>, client: ClientCell, result: ResultCell) {
    let _ = (store, client, result);
}

#[scenario(path = "tests/features/route_orchestration.feature", index = 3)]
fn remote_order_used(store: RefCell<WaypointStore>, client: ClientCell, result: ResultCell) {
    let _ = (store, client, result);
}
