#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative road grid storage.
//!
//! [`RoadGrid`] owns every placed tile. Pointer hits are answered the way a
//! physics layer would: by testing a slightly shrunken probe box against the
//! full footprint of each tile, so that neighbors sharing an edge are never
//! reported as overlapping. Tiles always sit on whole cells and the probe is
//! narrower than half a cell, so cell occupancy reduces to an exact lookup in
//! integer space. [`WaypointSet`] is the default in-memory waypoint registry
//! kept in sync by the cascade controller.

use glam::Vec2;
use road_placer_core::{
    ConfigError, GridCoord, OccupancyProbe, Orientation, PlacerConfig, RoadStore,
    RoadTileSnapshot, TileId,
};

mod footprint;
mod tiles;
mod waypoints;

pub use footprint::{cell_center, snap_to_grid};
pub use waypoints::WaypointSet;

use footprint::Footprint;
use tiles::TileRegistry;

/// Sparse grid of road tiles keyed by cell.
#[derive(Debug)]
pub struct RoadGrid {
    tiles: TileRegistry,
    tile_spacing: f32,
    footprint_shrink: f32,
}

impl Default for RoadGrid {
    fn default() -> Self {
        Self::with_validated(&PlacerConfig::default())
    }
}

impl RoadGrid {
    /// Creates an empty grid using the spacing and probe tolerance of `config`.
    ///
    /// Fails when the config would let a probe reach into adjacent cells.
    pub fn new(config: &PlacerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    fn with_validated(config: &PlacerConfig) -> Self {
        Self {
            tiles: TileRegistry::new(),
            tile_spacing: config.tile_spacing,
            footprint_shrink: config.footprint_shrink,
        }
    }

    /// Distance in world units between adjacent cell centers.
    #[must_use]
    pub const fn tile_spacing(&self) -> f32 {
        self.tile_spacing
    }

    /// Half-extent of the shrunken box used to probe a cell for occupants.
    #[must_use]
    pub fn probe_half_extent(&self) -> Vec2 {
        Vec2::splat(self.tile_spacing / self.footprint_shrink)
    }

    /// Returns the first tile, in ascending cell order, whose footprint
    /// overlaps the box centered at `center` with the given half-extent.
    #[must_use]
    pub fn overlapping(&self, center: Vec2, half_extent: Vec2) -> Option<TileId> {
        let probe = Footprint::new(center, half_extent);
        let tile_half = Vec2::splat(self.tile_spacing / 2.0);
        let (min, max) = probe.candidate_cells(self.tile_spacing);

        for x in min.x()..=max.x() {
            for z in min.z()..=max.z() {
                let cell = GridCoord::new(x, z);
                let Some(tile) = self.tiles.get(cell) else {
                    continue;
                };
                let footprint = Footprint::new(cell_center(cell, self.tile_spacing), tile_half);
                if probe.overlaps(&footprint) {
                    return Some(tile.id);
                }
            }
        }
        None
    }

    /// Returns the cell of the tile whose footprint contains `point`.
    #[must_use]
    pub fn tile_covering(&self, point: Vec2) -> Option<GridCoord> {
        let cell = snap_to_grid(point, self.tile_spacing);
        self.tiles.get(cell).map(|_| cell)
    }

    /// Captures the tile stored at exactly `cell`, if any.
    #[must_use]
    pub fn tile_at(&self, cell: GridCoord) -> Option<RoadTileSnapshot> {
        self.tiles.get(cell).map(|tile| RoadTileSnapshot {
            tile: tile.id,
            cell,
            orientation: tile.orientation,
        })
    }

    /// Orientation currently resolved for the tile at `cell`.
    #[must_use]
    pub fn orientation_at(&self, cell: GridCoord) -> Option<Orientation> {
        self.tiles.get(cell).map(|tile| tile.orientation)
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the grid holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.len() == 0
    }

    /// Snapshots every tile in ascending cell order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<RoadTileSnapshot> {
        self.tiles.snapshots().collect()
    }
}

impl OccupancyProbe for RoadGrid {
    fn query(&self, cell: GridCoord) -> Option<TileId> {
        self.tiles.get(cell).map(|tile| tile.id)
    }
}

impl RoadStore for RoadGrid {
    fn insert(&mut self, cell: GridCoord) -> TileId {
        self.tiles.insert(cell)
    }

    fn remove(&mut self, cell: GridCoord) -> Option<TileId> {
        self.tiles.remove(cell).map(|tile| tile.id)
    }

    fn set_orientation(&mut self, cell: GridCoord, orientation: Orientation) {
        if let Some(tile) = self.tiles.get_mut(cell) {
            tile.orientation = orientation;
        }
    }
}
