//! World-space footprint geometry used for tolerant occupancy probing.

use glam::Vec2;
use road_placer_core::GridCoord;

/// Snaps a world-space point on the ground plane to the cell containing it.
///
/// `point.y` carries the world `z` component. Points exactly on a cell
/// boundary resolve to the lower cell.
#[must_use]
pub fn snap_to_grid(point: Vec2, tile_spacing: f32) -> GridCoord {
    let scaled = point / tile_spacing - Vec2::splat(0.5);
    GridCoord::new(scaled.x.ceil() as i32, scaled.y.ceil() as i32)
}

/// World-space center of the provided cell.
#[must_use]
pub fn cell_center(cell: GridCoord, tile_spacing: f32) -> Vec2 {
    Vec2::new(cell.x() as f32, cell.z() as f32) * tile_spacing
}

/// Axis-aligned box on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Footprint {
    pub(crate) center: Vec2,
    pub(crate) half_extent: Vec2,
}

impl Footprint {
    pub(crate) fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent: half_extent.abs(),
        }
    }

    /// Strict overlap test; boxes that merely touch do not overlap.
    pub(crate) fn overlaps(&self, other: &Footprint) -> bool {
        let distance = (self.center - other.center).abs();
        let reach = self.half_extent + other.half_extent;
        distance.x < reach.x && distance.y < reach.y
    }

    /// Inclusive range of cells whose full-size footprint may overlap this box.
    pub(crate) fn candidate_cells(&self, tile_spacing: f32) -> (GridCoord, GridCoord) {
        let tile_half = tile_spacing / 2.0;
        let min = (self.center - self.half_extent - Vec2::splat(tile_half)) / tile_spacing;
        let max = (self.center + self.half_extent + Vec2::splat(tile_half)) / tile_spacing;
        (
            GridCoord::new(min.x.floor() as i32, min.y.floor() as i32),
            GridCoord::new(max.x.ceil() as i32, max.y.ceil() as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_rounds_to_nearest_cell_center() {
        assert_eq!(snap_to_grid(Vec2::new(0.2, -0.3), 1.0), GridCoord::new(0, 0));
        assert_eq!(snap_to_grid(Vec2::new(0.7, 1.4), 1.0), GridCoord::new(1, 1));
        assert_eq!(snap_to_grid(Vec2::new(-0.6, -1.6), 1.0), GridCoord::new(-1, -2));
        assert_eq!(snap_to_grid(Vec2::new(0.5, 0.5), 1.0), GridCoord::new(0, 0));
    }

    #[test]
    fn snapping_honours_spacing() {
        assert_eq!(snap_to_grid(Vec2::new(4.1, -3.9), 2.0), GridCoord::new(2, -2));
        assert_eq!(cell_center(GridCoord::new(2, -2), 2.0), Vec2::new(4.0, -4.0));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let left = Footprint::new(Vec2::ZERO, Vec2::splat(0.5));
        let right = Footprint::new(Vec2::new(1.0, 0.0), Vec2::splat(0.5));
        assert!(!left.overlaps(&right));

        let shrunk = Footprint::new(Vec2::new(0.9, 0.0), Vec2::splat(0.5));
        assert!(left.overlaps(&shrunk));
    }

    #[test]
    fn candidates_cover_probe() {
        let probe = Footprint::new(Vec2::new(0.0, 0.0), Vec2::splat(0.1));
        let (min, max) = probe.candidate_cells(1.0);
        assert!(min.x() <= -1 && min.z() <= -1);
        assert!(max.x() >= 1 && max.z() >= 1);
    }
}
