//! Authoritative road tile state management utilities.

use std::collections::BTreeMap;

use road_placer_core::{GridCoord, Orientation, RoadTileSnapshot, TileId};

/// State of a tile stored inside the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RoadTile {
    /// Identifier allocated by the registry for the tile.
    pub(crate) id: TileId,
    /// Orientation most recently resolved for the tile.
    pub(crate) orientation: Orientation,
}

/// Registry that stores tiles by cell and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TileRegistry {
    entries: BTreeMap<GridCoord, RoadTile>,
    next_tile_id: TileId,
}

impl TileRegistry {
    /// Creates an empty tile registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tile_id: TileId::new(0),
        }
    }

    /// Inserts a provisional tile at `cell`, replacing any previous occupant.
    pub(crate) fn insert(&mut self, cell: GridCoord) -> TileId {
        let id = self.next_tile_id;
        self.next_tile_id = TileId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            cell,
            RoadTile {
                id,
                orientation: Orientation::ISOLATED,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, cell: GridCoord) -> Option<RoadTile> {
        self.entries.remove(&cell)
    }

    pub(crate) fn get(&self, cell: GridCoord) -> Option<&RoadTile> {
        self.entries.get(&cell)
    }

    pub(crate) fn get_mut(&mut self, cell: GridCoord) -> Option<&mut RoadTile> {
        self.entries.get_mut(&cell)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Snapshots every tile in ascending cell order.
    pub(crate) fn snapshots(&self) -> impl Iterator<Item = RoadTileSnapshot> + '_ {
        self.entries.iter().map(|(cell, tile)| RoadTileSnapshot {
            tile: tile.id,
            cell: *cell,
            orientation: tile.orientation,
        })
    }
}
