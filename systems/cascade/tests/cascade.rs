use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use road_placer_core::{
    Command, Direction, Event, GridCoord, OccupancyProbe, Orientation, PlacementError,
    RemovalError, RoadStore, Rotation, TileId, TileRenderer, Variant,
};
use road_placer_system_cascade::CascadeController;
use road_placer_world::{RoadGrid, WaypointSet};

type Controller = CascadeController<RoadGrid, WaypointSet, RecordingRenderer>;

#[derive(Debug, Default)]
struct RecordingRenderer {
    visuals: BTreeMap<TileId, Orientation>,
    applied: usize,
}

impl TileRenderer for RecordingRenderer {
    fn apply_variant(&mut self, tile: TileId, _cell: GridCoord, orientation: Orientation) {
        let _ = self.visuals.insert(tile, orientation);
        self.applied += 1;
    }

    fn release(&mut self, tile: TileId) {
        let _ = self.visuals.remove(&tile);
    }
}

fn controller() -> Controller {
    CascadeController::new(
        RoadGrid::default(),
        WaypointSet::new(),
        RecordingRenderer::default(),
    )
}

fn cell(x: i32, z: i32) -> GridCoord {
    GridCoord::new(x, z)
}

fn place_all(controller: &mut Controller, cells: &[(i32, i32)]) {
    let mut events = Vec::new();
    for &(x, z) in cells {
        controller
            .place(cell(x, z), &mut events)
            .expect("placement on free cell");
    }
}

fn orientation(controller: &Controller, x: i32, z: i32) -> Orientation {
    controller
        .store()
        .orientation_at(cell(x, z))
        .expect("tile present")
}

fn assert_waypoint_invariant(controller: &Controller) {
    let grid = controller.store();
    for snapshot in grid.snapshots() {
        assert_eq!(
            controller.waypoints().contains(snapshot.cell),
            snapshot.orientation.variant.is_waypoint(),
            "waypoint membership mismatch at {}",
            snapshot.cell,
        );
    }
    for waypoint in controller.waypoints().iter() {
        assert!(
            grid.tile_at(waypoint).is_some(),
            "waypoint {waypoint} left on an empty cell"
        );
    }
}

fn scenario_c() -> Controller {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0), (1, 0), (0, 1), (0, -1), (-1, 0)]);
    controller
}

#[test]
fn scenario_a_pair_forms_facing_deadends() {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0), (1, 0)]);

    assert_eq!(
        orientation(&controller, 0, 0),
        Orientation::new(Variant::Deadend, Rotation::Yaw90)
    );
    assert_eq!(
        orientation(&controller, 1, 0),
        Orientation::new(Variant::Deadend, Rotation::YawNeg90)
    );
    assert!(controller.waypoints().contains(cell(0, 0)));
    assert!(controller.waypoints().contains(cell(1, 0)));
    assert_waypoint_invariant(&controller);
}

#[test]
fn scenario_b_missing_left_is_three_way() {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0), (1, 0), (0, 1), (0, -1)]);

    assert_eq!(
        orientation(&controller, 0, 0),
        Orientation::new(Variant::ThreeWay, Rotation::Yaw90)
    );
    assert!(controller.waypoints().contains(cell(0, 0)));
    assert_eq!(
        orientation(&controller, 0, 1),
        Orientation::new(Variant::Deadend, Rotation::Yaw180)
    );
    assert_eq!(
        orientation(&controller, 0, -1),
        Orientation::new(Variant::Deadend, Rotation::Yaw0)
    );
    assert_waypoint_invariant(&controller);
}

#[test]
fn scenario_c_all_neighbors_make_four_way() {
    let controller = scenario_c();

    assert_eq!(orientation(&controller, 0, 0).variant, Variant::FourWay);
    assert!(controller.waypoints().contains(cell(0, 0)));
    assert_eq!(
        orientation(&controller, -1, 0),
        Orientation::new(Variant::Deadend, Rotation::Yaw90)
    );
    assert_waypoint_invariant(&controller);
}

#[test]
fn scenario_d_removal_reorients_remaining_neighbor() {
    let mut controller = scenario_c();
    let mut events = Vec::new();
    controller
        .remove(cell(1, 0), &mut events)
        .expect("tile present");

    assert_eq!(
        orientation(&controller, 0, 0),
        Orientation::new(Variant::ThreeWay, Rotation::YawNeg90)
    );
    assert!(controller.store().tile_at(cell(1, 0)).is_none());
    assert!(!controller.waypoints().contains(cell(1, 0)));
    assert_waypoint_invariant(&controller);

    let reclassified: Vec<GridCoord> = events
        .iter()
        .filter_map(|event| match event {
            Event::RoadReclassified { cell, .. } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(
        reclassified,
        vec![cell(0, 0)],
        "only the former neighbor is reclassified on removal"
    );
}

#[test]
fn placement_reclassifies_neighbors_before_itself() {
    let mut controller = controller();
    place_all(&mut controller, &[(1, 0), (-1, 0)]);

    let mut events = Vec::new();
    controller
        .place(cell(0, 0), &mut events)
        .expect("free cell");

    let order: Vec<GridCoord> = events
        .iter()
        .filter_map(|event| match event {
            Event::RoadPlaced { cell, .. } | Event::RoadReclassified { cell, .. } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec![cell(0, 0), cell(1, 0), cell(-1, 0), cell(0, 0)]);
    assert_eq!(
        orientation(&controller, 0, 0),
        Orientation::new(Variant::Straight, Rotation::Yaw90)
    );
    assert!(!controller.waypoints().contains(cell(0, 0)));
}

#[test]
fn cascade_stops_after_one_level() {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0), (1, 0), (2, 0)]);
    let far_before = orientation(&controller, 2, 0);

    let mut events = Vec::new();
    controller
        .place(cell(0, 1), &mut events)
        .expect("free cell");

    assert_eq!(
        orientation(&controller, 0, 0),
        Orientation::new(Variant::Corner, Rotation::Yaw90)
    );
    assert_eq!(orientation(&controller, 2, 0), far_before);
    assert!(
        !events.iter().any(|event| matches!(
            event,
            Event::RoadReclassified { cell: touched, .. } if *touched == cell(1, 0) || *touched == cell(2, 0)
        )),
        "tiles not adjacent to the edit must not be revisited"
    );
}

#[test]
fn placing_on_occupied_cell_is_rejected_without_mutation() {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0)]);
    let applied_before = controller.renderer().applied;

    let mut events = Vec::new();
    let result = controller.place(cell(0, 0), &mut events);

    assert_eq!(result, Err(PlacementError::AlreadyOccupied));
    assert!(events.is_empty());
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.renderer().applied, applied_before);
}

#[test]
fn removing_empty_cell_is_rejected_without_mutation() {
    let mut controller = controller();
    place_all(&mut controller, &[(0, 0), (0, 1)]);
    let waypoints_before = controller.waypoints().clone();

    let mut events = Vec::new();
    let result = controller.remove(cell(5, 5), &mut events);

    assert_eq!(result, Err(RemovalError::NotOccupied));
    assert!(events.is_empty());
    assert_eq!(controller.store().len(), 2);
    assert_eq!(controller.waypoints(), &waypoints_before);
}

/// Store whose occupancy lookup also reports the tile one cell to the left,
/// while deletion only touches the exact cell.
#[derive(Debug, Default)]
struct WideLookupStore(RoadGrid);

impl OccupancyProbe for WideLookupStore {
    fn query(&self, cell: GridCoord) -> Option<TileId> {
        self.0.query(cell).or_else(|| {
            cell.neighbor(Direction::Left)
                .and_then(|left| self.0.query(left))
        })
    }
}

impl RoadStore for WideLookupStore {
    fn insert(&mut self, cell: GridCoord) -> TileId {
        self.0.insert(cell)
    }

    fn remove(&mut self, cell: GridCoord) -> Option<TileId> {
        self.0.remove(cell)
    }

    fn set_orientation(&mut self, cell: GridCoord, orientation: Orientation) {
        self.0.set_orientation(cell, orientation);
    }
}

#[test]
fn removal_that_deletes_nothing_is_rejected_without_mutation() {
    let mut controller = CascadeController::new(
        WideLookupStore::default(),
        WaypointSet::new(),
        RecordingRenderer::default(),
    );
    let mut events = Vec::new();
    controller
        .place(cell(0, 0), &mut events)
        .expect("free cell");
    assert!(controller.store().query(cell(1, 0)).is_some());
    let applied_before = controller.renderer().applied;

    events.clear();
    let result = controller.remove(cell(1, 0), &mut events);

    assert_eq!(result, Err(RemovalError::NotOccupied));
    assert!(events.is_empty());
    assert_eq!(controller.store().0.len(), 1);
    assert_eq!(controller.renderer().applied, applied_before);
    assert_eq!(
        controller.renderer().visuals.get(&TileId::new(0)),
        Some(&Orientation::ISOLATED)
    );
    assert!(controller.waypoints().is_empty());
}

#[test]
fn distant_coordinates_keep_exact_adjacency() {
    let mut controller = controller();
    let base = 1 << 24;
    place_all(
        &mut controller,
        &[(base, 0), (base + 1, 0), (base + 3, 0), (base + 5, 0)],
    );

    assert_eq!(controller.store().len(), 4);
    assert_eq!(
        orientation(&controller, base, 0),
        Orientation::new(Variant::Deadend, Rotation::Yaw90)
    );
    assert_eq!(
        orientation(&controller, base + 1, 0),
        Orientation::new(Variant::Deadend, Rotation::YawNeg90)
    );
    assert_eq!(orientation(&controller, base + 3, 0), Orientation::ISOLATED);
    assert_eq!(orientation(&controller, base + 5, 0), Orientation::ISOLATED);
    assert_waypoint_invariant(&controller);
}

#[test]
fn opposite_grid_edges_do_not_connect() {
    let mut controller = controller();
    place_all(&mut controller, &[(i32::MAX, 0), (i32::MIN, 0)]);

    assert_eq!(orientation(&controller, i32::MAX, 0), Orientation::ISOLATED);
    assert_eq!(orientation(&controller, i32::MIN, 0), Orientation::ISOLATED);

    let mut events = Vec::new();
    controller
        .place(cell(i32::MAX - 1, 0), &mut events)
        .expect("free cell");
    assert_eq!(
        orientation(&controller, i32::MAX, 0),
        Orientation::new(Variant::Deadend, Rotation::YawNeg90)
    );
    assert_eq!(orientation(&controller, i32::MIN, 0), Orientation::ISOLATED);
    assert_waypoint_invariant(&controller);
}

#[test]
fn handle_reports_rejections_as_events() {
    let mut controller = controller();
    let mut events = Vec::new();
    controller.handle(Command::RemoveRoad { cell: cell(0, 0) }, &mut events);
    controller.handle(Command::PlaceRoad { cell: cell(0, 0) }, &mut events);
    controller.handle(Command::PlaceRoad { cell: cell(0, 0) }, &mut events);

    assert_eq!(
        events.first(),
        Some(&Event::RemovalRejected {
            cell: cell(0, 0),
            reason: RemovalError::NotOccupied,
        })
    );
    assert_eq!(
        events.last(),
        Some(&Event::PlacementRejected {
            cell: cell(0, 0),
            reason: PlacementError::AlreadyOccupied,
        })
    );
}

#[test]
fn removed_tiles_release_their_visuals() {
    let mut controller = scenario_c();
    let mut events = Vec::new();
    controller
        .remove(cell(0, 0), &mut events)
        .expect("tile present");

    let (grid, waypoints, renderer) = controller.into_parts();
    assert_eq!(renderer.visuals.len(), grid.len());
    for snapshot in grid.snapshots() {
        assert_eq!(
            renderer.visuals.get(&snapshot.tile),
            Some(&snapshot.orientation)
        );
        assert_eq!(snapshot.orientation, Orientation::ISOLATED);
    }
    assert!(waypoints.is_empty());
}

#[test]
fn random_edit_sequences_preserve_waypoint_invariant() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0f_70ad);
    let mut controller = controller();
    let mut events = Vec::new();

    for _ in 0..2_000 {
        let target = cell(rng.gen_range(-4..=4), rng.gen_range(-4..=4));
        let command = if rng.gen_bool(0.65) {
            Command::PlaceRoad { cell: target }
        } else {
            Command::RemoveRoad { cell: target }
        };
        events.clear();
        controller.handle(command, &mut events);
        assert_waypoint_invariant(&controller);
    }

    for snapshot in controller.store().snapshots() {
        let fresh = road_placer_system_cascade::classify(
            road_placer_system_cascade::resolve(controller.store(), snapshot.cell).pattern(),
        );
        assert_eq!(snapshot.orientation, fresh, "stale tile at {}", snapshot.cell);
    }
}
