#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement and removal of road tiles with one-level neighbor reclassification.
//!
//! Every edit reclassifies the edited tile (placement only) and each tile
//! cardinally adjacent to it. Reclassification stops there: a neighbor's own
//! neighbors are never revisited because their presence patterns did not
//! change.

use log::{debug, trace};
use road_placer_core::{
    Command, Event, GridCoord, PlacementError, RemovalError, RoadStore, TileId, TileRenderer,
    WaypointSync,
};

mod neighbors;

pub use neighbors::{resolve, Neighborhood};
pub use road_placer_system_classifier::classify;

/// Executes edits against grid storage and keeps waypoints and visuals in sync.
///
/// Edits take `&mut self`, so a single controller serializes them; hosts that
/// share it across threads must guard the whole controller with one lock.
#[derive(Debug)]
pub struct CascadeController<S, W, R> {
    store: S,
    waypoints: W,
    renderer: R,
}

impl<S, W, R> CascadeController<S, W, R>
where
    S: RoadStore,
    W: WaypointSync,
    R: TileRenderer,
{
    /// Creates a controller driving the provided collaborators.
    #[must_use]
    pub const fn new(store: S, waypoints: W, renderer: R) -> Self {
        Self {
            store,
            waypoints,
            renderer,
        }
    }

    /// Executes a command, reporting rejections as events instead of errors.
    pub fn handle(&mut self, command: Command, out_events: &mut Vec<Event>) {
        match command {
            Command::PlaceRoad { cell } => {
                if let Err(reason) = self.place(cell, out_events) {
                    debug!("placement at {cell} rejected: {reason}");
                    out_events.push(Event::PlacementRejected { cell, reason });
                }
            }
            Command::RemoveRoad { cell } => {
                if let Err(reason) = self.remove(cell, out_events) {
                    debug!("removal at {cell} rejected: {reason}");
                    out_events.push(Event::RemovalRejected { cell, reason });
                }
            }
        }
    }

    /// Places a tile at `cell` and reclassifies it along with its neighbors.
    pub fn place(
        &mut self,
        cell: GridCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), PlacementError> {
        if self.store.query(cell).is_some() {
            return Err(PlacementError::AlreadyOccupied);
        }

        let tile = self.store.insert(cell);
        debug!("placed road tile {} at {cell}", tile.get());
        out_events.push(Event::RoadPlaced { tile, cell });

        let neighborhood = resolve(&self.store, cell);
        for (_, neighbor_cell, neighbor_tile) in neighborhood.occupied() {
            self.reclassify(neighbor_cell, neighbor_tile, out_events);
        }

        self.apply(cell, tile, neighborhood, out_events);
        Ok(())
    }

    /// Removes the tile at `cell` and reclassifies its former neighbors.
    ///
    /// The handle reported by the store's delete is the one released; when
    /// the store deletes nothing the request is rejected before any waypoint,
    /// visual or neighbor is touched.
    pub fn remove(
        &mut self,
        cell: GridCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RemovalError> {
        let Some(tile) = self.store.remove(cell) else {
            return Err(RemovalError::NotOccupied);
        };

        self.waypoints.remove(cell);
        self.renderer.release(tile);
        debug!("removed road tile {} at {cell}", tile.get());
        out_events.push(Event::RoadRemoved { tile, cell });

        let neighborhood = resolve(&self.store, cell);
        for (_, neighbor_cell, neighbor_tile) in neighborhood.occupied() {
            self.reclassify(neighbor_cell, neighbor_tile, out_events);
        }
        Ok(())
    }

    /// Grid storage driven by the controller.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Waypoint collaborator kept in sync by the controller.
    #[must_use]
    pub fn waypoints(&self) -> &W {
        &self.waypoints
    }

    /// Renderer receiving resolved orientations.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the controller, yielding its collaborators.
    pub fn into_parts(self) -> (S, W, R) {
        (self.store, self.waypoints, self.renderer)
    }

    fn reclassify(&mut self, cell: GridCoord, tile: TileId, out_events: &mut Vec<Event>) {
        let neighborhood = resolve(&self.store, cell);
        self.apply(cell, tile, neighborhood, out_events);
    }

    fn apply(
        &mut self,
        cell: GridCoord,
        tile: TileId,
        neighborhood: Neighborhood,
        out_events: &mut Vec<Event>,
    ) {
        let orientation = classify(neighborhood.pattern());
        trace!(
            "tile {} at {cell} resolved to {:?} rotated {}°",
            tile.get(),
            orientation.variant,
            orientation.rotation.degrees(),
        );

        self.store.set_orientation(cell, orientation);
        self.renderer.apply_variant(tile, cell, orientation);
        if orientation.variant.is_waypoint() {
            self.waypoints.add(cell);
        } else {
            self.waypoints.remove(cell);
        }
        out_events.push(Event::RoadReclassified {
            tile,
            cell,
            orientation,
        });
    }
}
