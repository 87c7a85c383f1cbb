//! Cardinal neighbor lookup around a single cell.

use road_placer_core::{Direction, GridCoord, OccupancyProbe, PresencePattern, TileId};

/// Occupancy of the four cells cardinally adjacent to a center cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    center: GridCoord,
    pattern: PresencePattern,
    tiles: [Option<TileId>; 4],
}

impl Neighborhood {
    /// Cell the neighborhood was resolved around.
    #[must_use]
    pub const fn center(&self) -> GridCoord {
        self.center
    }

    /// Presence pattern of the neighbors.
    #[must_use]
    pub const fn pattern(&self) -> PresencePattern {
        self.pattern
    }

    /// Tile found in the provided direction, if any.
    #[must_use]
    pub const fn tile(&self, direction: Direction) -> Option<TileId> {
        self.tiles[direction.index()]
    }

    /// Iterates over present neighbors in canonical direction order.
    pub fn occupied(&self) -> impl Iterator<Item = (Direction, GridCoord, TileId)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let tile = self.tile(direction)?;
            let cell = self.center.neighbor(direction)?;
            Some((direction, cell, tile))
        })
    }
}

/// Probes the four cardinal neighbors of `cell`.
///
/// `cell` itself need not be occupied. Directions that step off the
/// representable grid count as empty.
pub fn resolve<P>(probe: &P, cell: GridCoord) -> Neighborhood
where
    P: OccupancyProbe + ?Sized,
{
    let mut pattern = PresencePattern::EMPTY;
    let mut tiles = [None; 4];
    for direction in Direction::ALL {
        let found = cell
            .neighbor(direction)
            .and_then(|neighbor| probe.query(neighbor));
        if let Some(tile) = found {
            pattern = pattern.with(direction);
            tiles[direction.index()] = Some(tile);
        }
    }
    Neighborhood {
        center: cell,
        pattern,
        tiles,
    }
}
