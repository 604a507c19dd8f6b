//! Tape serialization
//!
//! Inverse of the parser: runs back to their line form, timelines back to
//! whole tape files.

use std::fmt::{self, Write as _};

use crate::input::Actions;
use crate::timeline::{Run, Timeline};

/// Serialize one run to its tape line.
///
/// The frame count stands alone for the empty state; otherwise abbreviations
/// follow in canonical flag order, with axis vectors emitted as components
/// right after their abbreviation.
pub fn serialize_run(run: &Run) -> String {
    let mut line = run.frames.to_string();
    for (action, abbr) in Actions::CANONICAL {
        if !run.state.actions.contains(action) {
            continue;
        }
        line.push(',');
        line.push_str(abbr);
        if action == Actions::MOVE {
            let v = run.state.movement;
            let _ = write!(line, ",{} {}", v.x, v.y);
        } else if action == Actions::CAMERA {
            let v = run.state.camera;
            let _ = write!(line, ",{} {}", v.x, v.y);
        }
    }
    line
}

/// Serialize a whole timeline, one line per run.
pub fn write_timeline(timeline: &Timeline) -> String {
    timeline
        .runs()
        .iter()
        .map(serialize_run)
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&write_timeline(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::tape::parse_line;
    use glam::Vec2;

    #[test]
    fn empty_state_serializes_to_frame_count_only() {
        let run = Run::new(InputState::EMPTY, 10);
        assert_eq!(serialize_run(&run), "10");
    }

    #[test]
    fn actions_serialize_in_canonical_order() {
        let state = InputState {
            actions: Actions::CLIMB | Actions::JUMP | Actions::DASH,
            ..InputState::EMPTY
        };
        assert_eq!(serialize_run(&Run::new(state, 3)), "3,J,X,G");
    }

    #[test]
    fn axis_actions_emit_their_vector() {
        let state = InputState {
            actions: Actions::MOVE | Actions::JUMP,
            movement: Vec2::new(0.5, 1.0),
            camera: Vec2::ZERO,
        };
        assert_eq!(serialize_run(&Run::new(state, 15)), "15,M,0.5 1,J");
    }

    #[test]
    fn round_trip_reconstructs_runs() {
        let lines = ["10", "5,J", "3,J,X,G", "15,M,0.5 1,J", "7,E,-0.25 0.75", "1,P"];
        for line in lines {
            let run = parse_line(line)
                .expect("line should parse")
                .expect("line should produce a run");
            assert_eq!(serialize_run(&run), line, "round trip of {line:?}");
        }
    }

    #[test]
    fn timeline_round_trips_through_text() {
        let jump = InputState {
            actions: Actions::JUMP,
            ..InputState::EMPTY
        };
        let timeline = Timeline::new(vec![
            Run::new(InputState::EMPTY, 10),
            Run::new(jump, 5),
            Run::new(InputState::EMPTY, 20),
        ]);

        let text = timeline.to_string();
        assert_eq!(text, "10\n5,J\n20");

        let mut reparsed = Vec::new();
        for line in text.lines() {
            if let Some(run) = parse_line(line).expect("line should parse") {
                reparsed.push(run);
            }
        }
        let reloaded = Timeline::new(reparsed);
        assert_eq!(reloaded.runs(), timeline.runs());
        assert_eq!(reloaded.frame_count(), 35);
    }
}
