//! Tunables shared by the placer systems and grid storage.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PLACEMENT_INTERVAL_SECONDS: f32 = 0.05;
const DEFAULT_TILE_SPACING: f32 = 1.0;
const DEFAULT_FOOTPRINT_SHRINK: f32 = 2.1;

/// Configuration consumed by the road placer.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacerConfig {
    /// Minimum delay between placement attempts while the place control is held.
    pub continuous_placement_interval_seconds: f32,
    /// Distance in world units between the centers of adjacent cells.
    pub tile_spacing: f32,
    /// Divisor applied to the tile size when probing a footprint for overlaps.
    ///
    /// Values above two shrink the probe inward so that adjacent tiles are
    /// never reported as overlapping.
    pub footprint_shrink: f32,
    /// Whether waypoint membership is tracked at all.
    pub use_waypoints: bool,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            continuous_placement_interval_seconds: DEFAULT_PLACEMENT_INTERVAL_SECONDS,
            tile_spacing: DEFAULT_TILE_SPACING,
            footprint_shrink: DEFAULT_FOOTPRINT_SHRINK,
            use_waypoints: true,
        }
    }
}

impl PlacerConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its permitted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.continuous_placement_interval_seconds;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::InvalidInterval(interval));
        }
        if !self.tile_spacing.is_finite() || self.tile_spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.tile_spacing));
        }
        if !self.footprint_shrink.is_finite() || self.footprint_shrink <= 2.0 {
            return Err(ConfigError::InvalidShrink(self.footprint_shrink));
        }
        Ok(())
    }

    /// Continuous placement cadence as a [`Duration`].
    ///
    /// Callers are expected to have validated the configuration; invalid
    /// intervals collapse to the default cadence.
    #[must_use]
    pub fn continuous_placement_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.continuous_placement_interval_seconds)
            .ok()
            .filter(|interval| !interval.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f32(DEFAULT_PLACEMENT_INTERVAL_SECONDS))
    }
}

/// Errors raised while loading a [`PlacerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be deserialised.
    #[error("failed to parse placer configuration")]
    Parse(#[from] toml::de::Error),
    /// The continuous placement interval was not a positive number of seconds.
    #[error("continuous placement interval must be positive, got {0}")]
    InvalidInterval(f32),
    /// The tile spacing was not a positive distance.
    #[error("tile spacing must be positive, got {0}")]
    InvalidSpacing(f32),
    /// The footprint shrink factor would let adjacent tiles overlap.
    #[error("footprint shrink must be greater than 2.0, got {0}")]
    InvalidShrink(f32),
}
