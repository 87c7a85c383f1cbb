#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the road placer.
//!
//! This crate defines the data model and the message surface that connects
//! hosts, grid storage and the pure systems. Input systems emit [`Command`]
//! values describing desired edits, the cascade controller executes them
//! against a [`RoadStore`] and reports the outcome as [`Event`] values. Every
//! collaborator the controller needs from its surroundings (occupancy,
//! waypoints, rendering, pointer picking) is expressed here as a narrow trait.

use std::fmt;

use thiserror::Error;

mod config;

pub use config::{ConfigError, PlacerConfig};

/// Commands that express all permissible grid edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests placement of a road tile at the provided cell.
    PlaceRoad {
        /// Cell the new tile should occupy.
        cell: GridCoord,
    },
    /// Requests removal of the road tile covering the provided cell.
    RemoveRoad {
        /// Cell targeted for removal.
        cell: GridCoord,
    },
}

/// Events broadcast after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a tile was inserted into the grid.
    RoadPlaced {
        /// Handle allocated to the tile by grid storage.
        tile: TileId,
        /// Cell occupied by the tile.
        cell: GridCoord,
    },
    /// Confirms that a tile was deleted from the grid.
    RoadRemoved {
        /// Handle of the tile that was removed.
        tile: TileId,
        /// Cell the tile previously occupied.
        cell: GridCoord,
    },
    /// Reports the orientation a tile resolved to after a reclassification.
    RoadReclassified {
        /// Handle of the reclassified tile.
        tile: TileId,
        /// Cell occupied by the tile.
        cell: GridCoord,
        /// Variant and rotation derived from the tile's neighbors.
        orientation: Orientation,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell provided in the placement request.
        cell: GridCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Cell provided in the removal request.
        cell: GridCoord,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
}

/// Location of a single grid cell expressed as integer `x` and `z` indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    x: i32,
    z: i32,
}

impl GridCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Index of the cell along the `x` axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Index of the cell along the `z` axis.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Returns the cell adjacent to this one in the provided direction, or
    /// `None` when stepping would leave the representable grid.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        let (dx, dz) = direction.offset();
        match (self.x.checked_add(dx), self.z.checked_add(dz)) {
            (Some(x), Some(z)) => Some(Self { x, z }),
            _ => None,
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Cardinal directions in which a tile may have a neighbor.
///
/// The declaration order is the canonical order used by every presence
/// pattern and by the classification tie-breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward increasing `x`.
    Right,
    /// Toward decreasing `x`.
    Left,
    /// Toward increasing `z`.
    Front,
    /// Toward decreasing `z`.
    Back,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Front,
        Direction::Back,
    ];

    /// Cell offset `(dx, dz)` travelled when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Front => (0, 1),
            Self::Back => (0, -1),
        }
    }

    /// Position of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Left => 1,
            Self::Front => 2,
            Self::Back => 3,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Records which of the four cardinal neighbors of a cell are occupied.
///
/// Bit `i` of the mask corresponds to `Direction::ALL[i]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresencePattern(u8);

impl PresencePattern {
    /// Pattern with no neighbors present.
    pub const EMPTY: Self = Self(0);

    /// Builds a pattern from a raw mask, ignoring bits above the fourth.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Builds a pattern containing exactly the provided directions.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::EMPTY, |pattern, direction| pattern.with(*direction))
    }

    /// Raw four-bit mask of the pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns a copy of the pattern with the provided direction marked present.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | (1 << direction.index()))
    }

    /// Reports whether a neighbor is present in the provided direction.
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    /// Number of neighbors present.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Enumerates all sixteen patterns in ascending mask order.
    pub fn all() -> impl Iterator<Item = PresencePattern> {
        (0u8..16).map(Self)
    }
}

/// Structural category a road tile resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// Tile without any neighbors.
    Isolated,
    /// Tile connected on a single side.
    Deadend,
    /// Tile connected on two opposite sides.
    Straight,
    /// Tile connected on three sides.
    ThreeWay,
    /// Tile connected on all four sides.
    FourWay,
    /// Tile connected on two adjacent sides.
    Corner,
}

impl Variant {
    /// All variants ordered by their asset index.
    pub const ALL: [Variant; 6] = [
        Variant::Isolated,
        Variant::Deadend,
        Variant::Straight,
        Variant::ThreeWay,
        Variant::FourWay,
        Variant::Corner,
    ];

    /// Index of the texture or mesh slot hosts provide for this variant.
    #[must_use]
    pub const fn asset_index(self) -> usize {
        match self {
            Self::Isolated => 0,
            Self::Deadend => 1,
            Self::Straight => 2,
            Self::ThreeWay => 3,
            Self::FourWay => 4,
            Self::Corner => 5,
        }
    }

    /// Reports whether tiles of this variant are routing decision points.
    ///
    /// Isolated tiles and straight segments never carry a waypoint.
    #[must_use]
    pub const fn is_waypoint(self) -> bool {
        !matches!(self, Self::Isolated | Self::Straight)
    }
}

/// Yaw applied to a tile about the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Identity orientation.
    #[default]
    Yaw0,
    /// Quarter turn toward `+x`.
    Yaw90,
    /// Half turn.
    Yaw180,
    /// Quarter turn toward `-x`.
    YawNeg90,
}

impl Rotation {
    /// Yaw expressed in whole degrees.
    #[must_use]
    pub const fn degrees(self) -> i16 {
        match self {
            Self::Yaw0 => 0,
            Self::Yaw90 => 90,
            Self::Yaw180 => 180,
            Self::YawNeg90 => -90,
        }
    }

    /// Yaw expressed in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }

    /// Stable slot of the rotation: 0°, 90°, 180°, −90° map to 0..=3.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Yaw0 => 0,
            Self::Yaw90 => 1,
            Self::Yaw180 => 2,
            Self::YawNeg90 => 3,
        }
    }
}

/// Variant and rotation a tile resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Structural category of the tile.
    pub variant: Variant,
    /// Yaw applied to the tile's visual.
    pub rotation: Rotation,
}

impl Orientation {
    /// Provisional orientation of a tile that has not been classified yet.
    pub const ISOLATED: Self = Self::new(Variant::Isolated, Rotation::Yaw0);

    /// Creates a new orientation.
    #[must_use]
    pub const fn new(variant: Variant, rotation: Rotation) -> Self {
        Self { variant, rotation }
    }
}

/// Opaque handle allocated to a road tile by grid storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single tile used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoadTileSnapshot {
    /// Handle allocated to the tile.
    pub tile: TileId,
    /// Cell occupied by the tile.
    pub cell: GridCoord,
    /// Orientation the tile currently resolves to.
    pub orientation: Orientation,
}

/// Reasons a placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    /// The target footprint overlaps an existing tile.
    #[error("target cell is already occupied by a road tile")]
    AlreadyOccupied,
}

/// Reasons a removal request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RemovalError {
    /// No tile covers the targeted cell.
    #[error("no road tile covers the target cell")]
    NotOccupied,
}

/// Answers whether a road tile occupies a given cell.
pub trait OccupancyProbe {
    /// Returns the tile occupying `cell`, reflecting the latest completed edit.
    fn query(&self, cell: GridCoord) -> Option<TileId>;
}

/// Mutable grid storage driven by the cascade controller.
pub trait RoadStore: OccupancyProbe {
    /// Inserts a tile at `cell` with the provisional isolated orientation.
    fn insert(&mut self, cell: GridCoord) -> TileId;

    /// Deletes the tile at `cell`, returning its handle if one existed.
    fn remove(&mut self, cell: GridCoord) -> Option<TileId>;

    /// Records the orientation resolved for the tile at `cell`.
    fn set_orientation(&mut self, cell: GridCoord, orientation: Orientation);
}

/// Receives waypoint membership updates keyed by grid cell.
///
/// Both operations must be idempotent.
pub trait WaypointSync {
    /// Marks `cell` as navigation-relevant.
    fn add(&mut self, cell: GridCoord);

    /// Clears any waypoint registered at `cell`.
    fn remove(&mut self, cell: GridCoord);
}

impl<W: WaypointSync + ?Sized> WaypointSync for &mut W {
    fn add(&mut self, cell: GridCoord) {
        (**self).add(cell);
    }

    fn remove(&mut self, cell: GridCoord) {
        (**self).remove(cell);
    }
}

/// `None` disables waypoint tracking entirely.
impl<W: WaypointSync> WaypointSync for Option<W> {
    fn add(&mut self, cell: GridCoord) {
        if let Some(waypoints) = self {
            waypoints.add(cell);
        }
    }

    fn remove(&mut self, cell: GridCoord) {
        if let Some(waypoints) = self {
            waypoints.remove(cell);
        }
    }
}

/// Assigns the visual representation of tiles.
pub trait TileRenderer {
    /// Presents `tile` using the resolved variant and rotation.
    fn apply_variant(&mut self, tile: TileId, cell: GridCoord, orientation: Orientation);

    /// Drops any visual state kept for a tile that was removed.
    fn release(&mut self, _tile: TileId) {}
}

impl TileRenderer for () {
    fn apply_variant(&mut self, _tile: TileId, _cell: GridCoord, _orientation: Orientation) {}
}

impl<R: TileRenderer + ?Sized> TileRenderer for &mut R {
    fn apply_variant(&mut self, tile: TileId, cell: GridCoord, orientation: Orientation) {
        (**self).apply_variant(tile, cell, orientation);
    }

    fn release(&mut self, tile: TileId) {
        (**self).release(tile);
    }
}

/// Converts host pointer input into the grid cell under the pointer.
pub trait PointerResolver {
    /// Returns the picked cell, or `None` when the pointer hits nothing.
    fn pick(&mut self) -> Option<GridCoord>;
}
