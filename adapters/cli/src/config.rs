//! Host configuration file loaded by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use road_placer_core::PlacerConfig;
use road_placer_system_classifier::VariantTable;
use serde::Deserialize;

/// Glyphs drawn for each variant, one per rotation (0°, 90°, 180°, −90°).
const DEFAULT_GLYPHS: [[char; 4]; 6] = [
    ['■', '■', '■', '■'],
    ['╵', '╶', '╷', '╴'],
    ['│', '─', '│', '─'],
    ['┴', '├', '┬', '┤'],
    ['┼', '┼', '┼', '┼'],
    ['┘', '└', '┌', '┐'],
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CliConfigFile {
    placer: PlacerConfig,
    glyphs: Option<Vec<String>>,
}

/// Fully validated configuration of a command-line session.
#[derive(Debug)]
pub(crate) struct CliConfig {
    pub(crate) placer: PlacerConfig,
    pub(crate) glyphs: VariantTable<[char; 4]>,
}

impl CliConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::from_toml_str("");
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CliConfigFile =
            toml::from_str(contents).context("failed to parse config toml contents")?;
        file.placer
            .validate()
            .context("invalid [placer] section")?;

        let glyphs = match file.glyphs {
            Some(rows) => rows
                .iter()
                .map(|row| parse_glyph_row(row))
                .collect::<Result<Vec<_>>>()?,
            None => DEFAULT_GLYPHS.to_vec(),
        };
        let glyphs = VariantTable::new(glyphs).context("invalid glyphs list")?;

        Ok(Self {
            placer: file.placer,
            glyphs,
        })
    }
}

fn parse_glyph_row(row: &str) -> Result<[char; 4]> {
    let chars: Vec<char> = row.chars().collect();
    match <[char; 4]>::try_from(chars) {
        Ok(glyphs) => Ok(glyphs),
        Err(chars) => bail!(
            "glyph row `{row}` must hold one character per rotation, found {}",
            chars.len()
        ),
    }
}
