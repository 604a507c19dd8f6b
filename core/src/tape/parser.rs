//! Tape line parser and file loader
//!
//! Parses the line-oriented `.tas` text format into timeline runs.

use std::fs;
use std::path::Path;

use glam::Vec2;

use crate::input::{Actions, InputState};
use crate::timeline::{Run, Timeline};

/// Fatal per-line parse failures. Unknown action characters are not errors;
/// they are skipped with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("frame count is not an integer")]
    FrameCount,
    #[error("vector angle is not a valid number")]
    VectorAngle,
    #[error("vector x-component is not a valid number")]
    VectorX,
    #[error("vector y-component is not a valid number")]
    VectorY,
}

/// Tape file loading failures. A parse failure aborts the whole load; a
/// partial timeline is never returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read tape file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error on line {line} of {file}: {source}")]
    Parse {
        file: String,
        line: usize,
        source: ParseError,
    },
}

/// Parse one tape line.
///
/// Returns `Ok(None)` for lines that contribute no run: blank lines,
/// `#` comments, and records with a non-positive frame count. Otherwise the
/// first comma-separated token is the frame count and each following token
/// is an action abbreviation; axis abbreviations (`M`, `E`) consume the next
/// token as their vector, either a single angle in degrees or two components
/// clamped to `[-1, 1]`.
pub fn parse_line(line: &str) -> Result<Option<Run>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    // Collapse whitespace runs so "0.5   1" and "0.5 1" tokenize the same.
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut frames: Option<i64> = None;
    let mut actions = Actions::empty();
    let mut movement = Vec2::ZERO;
    let mut camera = Vec2::ZERO;
    // When non-empty, the next token is this axis action's vector.
    let mut pending_axis = Actions::empty();

    for token in collapsed.split(',').map(str::trim) {
        if frames.is_none() {
            let count = token.parse::<i64>().map_err(|_| ParseError::FrameCount)?;
            frames = Some(count);
            continue;
        }

        if !pending_axis.is_empty() {
            let vector = parse_vector(token)?;
            if pending_axis == Actions::MOVE {
                movement = vector;
            } else {
                camera = vector;
            }
            pending_axis = Actions::empty();
            continue;
        }

        let action = Actions::from_abbreviation(token);
        if action.is_empty() {
            tracing::warn!(token, "unrecognized action character, ignoring");
            continue;
        }
        actions |= action;
        if action.is_axis() {
            pending_axis = action;
        }
    }

    match frames {
        Some(count) if count > 0 => Ok(Some(Run::new(
            InputState {
                actions,
                movement,
                camera,
            },
            count as u32,
        ))),
        _ => Ok(None),
    }
}

/// Parse a vector token: a single numeric angle in degrees, or
/// space-separated `x y` components clamped to `[-1, 1]`.
fn parse_vector(token: &str) -> Result<Vec2, ParseError> {
    let mut components = token.split(' ');
    let first = components.next().unwrap_or("");
    match components.next() {
        None => {
            let degrees: f32 = first.parse().map_err(|_| ParseError::VectorAngle)?;
            Ok(Vec2::from_angle(degrees.to_radians()))
        }
        Some(second) => {
            let x: f32 = first.parse().map_err(|_| ParseError::VectorX)?;
            let y: f32 = second.parse().map_err(|_| ParseError::VectorY)?;
            Ok(Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
        }
    }
}

/// Load a whole tape file into a [`Timeline`].
///
/// Fails fast on the first malformed line, reporting the file name and
/// 1-based line number.
pub fn load_file(path: impl AsRef<Path>) -> Result<Timeline, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut runs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(run)) => runs.push(run),
            Ok(None) => {}
            Err(source) => {
                return Err(LoadError::Parse {
                    file: file.clone(),
                    line: index + 1,
                    source,
                });
            }
        }
    }

    Ok(Timeline::new(runs))
}
