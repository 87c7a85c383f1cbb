//! Replays edit scripts through the input and cascade systems.

use std::{fmt::Write as _, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, info};
use road_placer_core::{Event, GridCoord, PointerResolver};
use road_placer_system_cascade::CascadeController;
use road_placer_system_input::{PlacerInput, RoadPlacer};
use road_placer_world::{snap_to_grid, RoadGrid, WaypointSet};

use crate::{ascii::AsciiRenderer, config::CliConfig, script::Step};

const FRAME: Duration = Duration::from_micros(16_667);

const PRESS: PlacerInput = PlacerInput::new(true, true, false);
const HOLD: PlacerInput = PlacerInput::new(false, true, false);
const RELEASE: PlacerInput = PlacerInput::new(false, false, false);
const REMOVE: PlacerInput = PlacerInput::new(false, false, true);

/// Pointer hovering a scripted world-space position.
struct ScriptPointer {
    point: Vec2,
    tile_spacing: f32,
}

impl PointerResolver for ScriptPointer {
    fn pick(&mut self) -> Option<GridCoord> {
        self.point
            .is_finite()
            .then(|| snap_to_grid(self.point, self.tile_spacing))
    }
}

/// Counters summarising a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) placed: usize,
    pub(crate) removed: usize,
    pub(crate) rejected: usize,
}

pub(crate) struct Session {
    placer: RoadPlacer,
    controller: CascadeController<RoadGrid, Option<WaypointSet>, AsciiRenderer>,
    pointer: ScriptPointer,
    tally: Tally,
}

impl Session {
    pub(crate) fn new(config: CliConfig) -> Result<Self> {
        let grid = RoadGrid::new(&config.placer).context("invalid placer configuration")?;
        let waypoints = config.placer.use_waypoints.then(WaypointSet::new);
        Ok(Self {
            placer: RoadPlacer::new(&config.placer),
            controller: CascadeController::new(
                grid,
                waypoints,
                AsciiRenderer::new(config.glyphs),
            ),
            pointer: ScriptPointer {
                point: Vec2::ZERO,
                tile_spacing: config.placer.tile_spacing,
            },
            tally: Tally::default(),
        })
    }

    pub(crate) fn run(&mut self, step: Step) {
        match step {
            Step::Place(point) => {
                self.pointer.point = point;
                self.frame(PRESS);
                self.frame(RELEASE);
            }
            Step::Drag { from, to, duration } => {
                self.pointer.point = from;
                self.frame(PRESS);
                let frames = (duration.as_secs_f32() / FRAME.as_secs_f32()).ceil().max(1.0) as u32;
                for index in 1..=frames {
                    self.pointer.point = from.lerp(to, index as f32 / frames as f32);
                    self.frame(HOLD);
                }
                self.frame(RELEASE);
            }
            Step::Remove(point) => {
                self.pointer.point = point;
                self.frame(REMOVE);
            }
        }
    }

    pub(crate) fn tally(&self) -> Tally {
        self.tally
    }

    /// Text map followed by the list of registered waypoints.
    pub(crate) fn report(&self) -> String {
        let mut report = self.controller.renderer().render();
        match self.controller.waypoints() {
            Some(waypoints) => {
                let _ = writeln!(report, "waypoints ({}):", waypoints.len());
                for cell in waypoints.iter() {
                    let _ = writeln!(report, "  {cell}");
                }
            }
            None => report.push_str("waypoints disabled\n"),
        }
        report
    }

    fn frame(&mut self, input: PlacerInput) {
        let mut commands = Vec::new();
        self.placer
            .handle(input, FRAME, &mut self.pointer, &mut commands);

        let mut events = Vec::new();
        for command in commands {
            self.controller.handle(command, &mut events);
        }
        for event in events {
            self.record(event);
        }
    }

    fn record(&mut self, event: Event) {
        match event {
            Event::RoadPlaced { cell, .. } => {
                self.tally.placed += 1;
                info!("placed road at {cell}");
            }
            Event::RoadRemoved { cell, .. } => {
                self.tally.removed += 1;
                info!("removed road at {cell}");
            }
            Event::PlacementRejected { .. } | Event::RemovalRejected { .. } => {
                self.tally.rejected += 1;
            }
            Event::RoadReclassified {
                cell, orientation, ..
            } => debug!(
                "{cell} is now {:?} at {}°",
                orientation.variant,
                orientation.rotation.degrees()
            ),
        }
    }
}
