//! Text renderer presenting road tiles as box-drawing glyphs.

use std::collections::BTreeMap;

use road_placer_core::{GridCoord, Orientation, TileId, TileRenderer};
use road_placer_system_classifier::VariantTable;

const EMPTY_CELL: char = '·';

/// Renderer that remembers one glyph per tile and draws them as a text map.
#[derive(Debug)]
pub(crate) struct AsciiRenderer {
    glyphs: VariantTable<[char; 4]>,
    tiles: BTreeMap<TileId, (GridCoord, char)>,
}

impl AsciiRenderer {
    pub(crate) fn new(glyphs: VariantTable<[char; 4]>) -> Self {
        Self {
            glyphs,
            tiles: BTreeMap::new(),
        }
    }

    /// Draws every tile with `+z` pointing up; empty cells inside the bounds are dotted.
    pub(crate) fn render(&self) -> String {
        let mut by_cell: BTreeMap<GridCoord, char> = BTreeMap::new();
        for (cell, glyph) in self.tiles.values() {
            let _ = by_cell.insert(*cell, *glyph);
        }

        let Some(bounds) = Bounds::enclosing(by_cell.keys().copied()) else {
            return String::new();
        };

        let mut output = String::new();
        for z in (bounds.min_z..=bounds.max_z).rev() {
            for x in bounds.min_x..=bounds.max_x {
                let glyph = by_cell
                    .get(&GridCoord::new(x, z))
                    .copied()
                    .unwrap_or(EMPTY_CELL);
                output.push(glyph);
            }
            output.push('\n');
        }
        output
    }
}

impl TileRenderer for AsciiRenderer {
    fn apply_variant(&mut self, tile: TileId, cell: GridCoord, orientation: Orientation) {
        let glyph = self.glyphs.get(orientation.variant)[orientation.rotation.index()];
        let _ = self.tiles.insert(tile, (cell, glyph));
    }

    fn release(&mut self, tile: TileId) {
        let _ = self.tiles.remove(&tile);
    }
}

struct Bounds {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
}

impl Bounds {
    fn enclosing(cells: impl Iterator<Item = GridCoord>) -> Option<Self> {
        cells.fold(None, |bounds: Option<Self>, cell| {
            Some(match bounds {
                None => Self {
                    min_x: cell.x(),
                    max_x: cell.x(),
                    min_z: cell.z(),
                    max_z: cell.z(),
                },
                Some(bounds) => Self {
                    min_x: bounds.min_x.min(cell.x()),
                    max_x: bounds.max_x.max(cell.x()),
                    min_z: bounds.min_z.min(cell.z()),
                    max_z: bounds.max_z.max(cell.z()),
                },
            })
        })
    }
}
