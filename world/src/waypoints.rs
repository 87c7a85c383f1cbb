//! In-memory waypoint registry mirroring the navigation-relevant tiles.

use std::collections::BTreeSet;

use road_placer_core::{GridCoord, WaypointSync};

/// Set of cells currently registered as routing waypoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaypointSet {
    cells: BTreeSet<GridCoord>,
}

impl WaypointSet {
    /// Creates an empty waypoint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether a waypoint is registered at `cell`.
    #[must_use]
    pub fn contains(&self, cell: GridCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterates over registered waypoints in ascending cell order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Number of registered waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no waypoint is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl WaypointSync for WaypointSet {
    fn add(&mut self, cell: GridCoord) {
        let _ = self.cells.insert(cell);
    }

    fn remove(&mut self, cell: GridCoord) {
        let _ = self.cells.remove(&cell);
    }
}
