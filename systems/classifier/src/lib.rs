#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure classification of road tiles from their neighbor presence pattern.
//!
//! [`classify`] maps each of the sixteen possible presence patterns onto the
//! variant and yaw a tile must be shown with. [`VariantTable`] binds host
//! assets (textures, meshes, glyphs) to those variants.

use road_placer_core::{
    Direction::{Back, Front, Left, Right},
    Orientation, PresencePattern, Rotation, Variant,
};

mod variant_table;

pub use variant_table::{VariantTable, VariantTableError};

/// Resolves the orientation of a tile from the neighbors surrounding it.
///
/// Three-neighbor tiles look at the back/front split first and only fall back
/// to the right/left split when both front and back are present.
#[must_use]
pub fn classify(pattern: PresencePattern) -> Orientation {
    let (right, left, front, back) = (
        pattern.has(Right),
        pattern.has(Left),
        pattern.has(Front),
        pattern.has(Back),
    );

    match pattern.count() {
        4 => Orientation::new(Variant::FourWay, Rotation::Yaw0),
        3 => {
            let rotation = if back && !front {
                Rotation::Yaw180
            } else if front && !back {
                Rotation::Yaw0
            } else if right {
                Rotation::Yaw90
            } else {
                Rotation::YawNeg90
            };
            Orientation::new(Variant::ThreeWay, rotation)
        }
        2 if right && left => Orientation::new(Variant::Straight, Rotation::Yaw90),
        2 if front && back => Orientation::new(Variant::Straight, Rotation::Yaw0),
        2 => {
            let rotation = match (right, front) {
                (true, true) => Rotation::Yaw90,
                (true, false) => Rotation::Yaw180,
                (false, true) => Rotation::Yaw0,
                (false, false) => Rotation::YawNeg90,
            };
            Orientation::new(Variant::Corner, rotation)
        }
        1 => {
            let rotation = if left {
                Rotation::YawNeg90
            } else if right {
                Rotation::Yaw90
            } else if back {
                Rotation::Yaw180
            } else {
                Rotation::Yaw0
            };
            Orientation::new(Variant::Deadend, rotation)
        }
        _ => Orientation::ISOLATED,
    }
}
