//! Parser for the line-oriented edit scripts replayed by the adapter.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use glam::Vec2;

const COMMENT_MARKER: char = '#';

/// Longest drag a script may hold the place control for, in seconds.
pub(crate) const MAX_DRAG_SECONDS: f32 = 600.0;

/// Single pointer gesture expressed in world-space coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Click the place control over `point`.
    Place(Vec2),
    /// Hold the place control while moving the pointer from `from` to `to`.
    Drag {
        from: Vec2,
        to: Vec2,
        duration: Duration,
    },
    /// Click the remove control over `point`.
    Remove(Vec2),
}

/// Parses every non-blank, non-comment line of `source` into a [`Step`].
pub(crate) fn parse(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line
            .split(COMMENT_MARKER)
            .next()
            .unwrap_or_default()
            .trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_line(line).with_context(|| format!("line {}: `{line}`", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step> {
    let mut fields = line.split_whitespace();
    let keyword = fields.next().unwrap_or_default();
    let numbers = fields
        .map(|field| {
            field
                .parse::<f32>()
                .with_context(|| format!("`{field}` is not a number"))
                .and_then(|value| {
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        bail!("`{field}` is not finite")
                    }
                })
        })
        .collect::<Result<Vec<f32>>>()?;

    match (keyword, numbers.as_slice()) {
        ("place", &[x, z]) => Ok(Step::Place(Vec2::new(x, z))),
        ("remove", &[x, z]) => Ok(Step::Remove(Vec2::new(x, z))),
        ("drag", &[x0, z0, x1, z1, seconds]) => {
            if seconds > MAX_DRAG_SECONDS {
                bail!("drag duration {seconds} exceeds {MAX_DRAG_SECONDS} seconds");
            }
            let duration = Duration::try_from_secs_f32(seconds)
                .with_context(|| format!("drag duration {seconds} is not a valid duration"))?;
            Ok(Step::Drag {
                from: Vec2::new(x0, z0),
                to: Vec2::new(x1, z1),
                duration,
            })
        }
        ("place" | "remove", _) => bail!("`{keyword}` expects X Z"),
        ("drag", _) => bail!("`drag` expects X0 Z0 X1 Z1 SECONDS"),
        _ => bail!("unknown step `{keyword}`"),
    }
}
