#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating pointer controls into road edit commands.
//!
//! A press of the place control emits one placement immediately. While the
//! control stays held, further placements are attempted at the configured
//! cadence so that dragging the pointer paints a road. A press of the remove
//! control emits one removal. The cell under the pointer is resolved through
//! the injected [`PointerResolver`] only when a command is about to be emitted.

use std::time::Duration;

use log::trace;
use road_placer_core::{Command, GridCoord, PlacerConfig, PointerResolver};

/// Control state sampled by the host for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacerInput {
    /// The place control went down on this frame.
    pub place_pressed: bool,
    /// The place control is down on this frame, including the press frame.
    pub place_held: bool,
    /// The remove control went down on this frame.
    pub remove_pressed: bool,
}

impl PlacerInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(place_pressed: bool, place_held: bool, remove_pressed: bool) -> Self {
        Self {
            place_pressed,
            place_held,
            remove_pressed,
        }
    }
}

/// Input system emitting placement and removal commands.
#[derive(Debug)]
pub struct RoadPlacer {
    interval: Duration,
    accumulator: Duration,
    placing: bool,
}

impl RoadPlacer {
    /// Creates a placer repeating held placements at the configured cadence.
    #[must_use]
    pub fn new(config: &PlacerConfig) -> Self {
        Self::with_interval(config.continuous_placement_interval())
    }

    /// Creates a placer repeating held placements every `interval`.
    ///
    /// A zero interval is raised to one millisecond.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            placing: false,
        }
    }

    /// Reports whether continuous placement is active.
    #[must_use]
    pub const fn is_placing(&self) -> bool {
        self.placing
    }

    /// Consumes one frame of input and emits the resulting commands.
    pub fn handle<P>(
        &mut self,
        input: PlacerInput,
        dt: Duration,
        pointer: &mut P,
        out: &mut Vec<Command>,
    ) where
        P: PointerResolver + ?Sized,
    {
        if input.place_pressed {
            self.accumulator = Duration::ZERO;
            if let Some(cell) = pick(pointer) {
                out.push(Command::PlaceRoad { cell });
            }
        } else if self.placing && input.place_held {
            self.accumulator = self.accumulator.saturating_add(dt);
            if self.accumulator >= self.interval {
                self.accumulator -= self.interval;
                // Repeats missed during a long frame are dropped, not queued.
                if self.accumulator >= self.interval {
                    self.accumulator = Duration::ZERO;
                }
                if let Some(cell) = pick(pointer) {
                    out.push(Command::PlaceRoad { cell });
                }
            }
        }

        self.placing = (self.placing || input.place_pressed) && input.place_held;
        if !self.placing {
            self.accumulator = Duration::ZERO;
        }

        if input.remove_pressed {
            if let Some(cell) = pick(pointer) {
                out.push(Command::RemoveRoad { cell });
            }
        }
    }
}

fn pick<P>(pointer: &mut P) -> Option<GridCoord>
where
    P: PointerResolver + ?Sized,
{
    let cell = pointer.pick();
    if cell.is_none() {
        trace!("pointer resolved to no cell; skipping edit");
    }
    cell
}
