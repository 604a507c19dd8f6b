//! Playback/recording session
//!
//! [`Session`] owns the currently selected timeline and drives it in
//! lock-step with the host's fixed-timestep tick: exactly one timeline
//! operation set per tick, no suspension. Commands are edge-triggered;
//! [`Session::tick`] is called once per host tick and returns whether the
//! simulation should be frozen and which input is in effect.

use crate::input::InputState;
use crate::timeline::Timeline;

/// How recorded frames are applied to the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Replace the current frame; tape length is conserved.
    #[default]
    Overwrite,
    /// Insert a new frame; the rest of the tape shifts later.
    Insert,
}

/// Controller state. `Idle` means no timeline is selected; the other four
/// are the paused/playing x recording grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Paused,
    Playing,
    RecordingFree,
    RecordingStep,
}

/// Per-tick decision handed to the host simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The host must not advance the simulation this tick.
    pub freeze: bool,
    /// Effective input for the frame when not frozen.
    pub input: InputState,
}

impl Tick {
    fn frozen() -> Self {
        Self {
            freeze: true,
            input: InputState::EMPTY,
        }
    }

    fn through(input: InputState) -> Self {
        Self {
            freeze: false,
            input,
        }
    }
}

/// The playback/recording controller and owner of the selected timeline.
///
/// Construction and teardown follow timeline selection: [`Session::select`]
/// enters the paused state, [`Session::close`] returns to idle. There is no
/// process-wide current timeline; callers pass the session where needed.
#[derive(Debug, Default)]
pub struct Session {
    timeline: Option<Timeline>,
    state: SessionState,
    record_mode: RecordMode,
    step_pending: bool,
    first_tick: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a timeline; the session starts paused at frame 0.
    pub fn select(&mut self, timeline: Timeline) {
        self.timeline = Some(timeline);
        self.state = SessionState::Paused;
        self.step_pending = false;
        self.first_tick = true;
    }

    /// Drop the current timeline and return to idle, yielding the timeline
    /// (with any recorded edits) to the caller.
    pub fn close(&mut self) -> Option<Timeline> {
        self.state = SessionState::Idle;
        self.step_pending = false;
        self.first_tick = false;
        self.timeline.take()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn record_mode(&self) -> RecordMode {
        self.record_mode
    }

    pub fn set_record_mode(&mut self, mode: RecordMode) {
        self.record_mode = mode;
    }

    pub fn is_recording(&self) -> bool {
        matches!(
            self.state,
            SessionState::RecordingFree | SessionState::RecordingStep
        )
    }

    /// Toggle between running and paused, preserving whether the session is
    /// recording.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Idle => SessionState::Idle,
            SessionState::Paused => SessionState::Playing,
            SessionState::Playing => SessionState::Paused,
            SessionState::RecordingFree => SessionState::RecordingStep,
            SessionState::RecordingStep => SessionState::RecordingFree,
        };
    }

    /// Toggle recording on or off, preserving whether the session is paused.
    pub fn toggle_record(&mut self) {
        self.state = match self.state {
            SessionState::Idle => SessionState::Idle,
            SessionState::Paused => SessionState::RecordingStep,
            SessionState::Playing => SessionState::RecordingFree,
            SessionState::RecordingStep => SessionState::Paused,
            SessionState::RecordingFree => SessionState::Playing,
        };
    }

    /// Request a single frame of progress on the next tick while paused (or
    /// step-recording).
    pub fn step(&mut self) {
        if matches!(
            self.state,
            SessionState::Paused | SessionState::RecordingStep
        ) {
            self.step_pending = true;
        }
    }

    /// Rewind the timeline cursor to frame 0 and pause.
    pub fn reset(&mut self) {
        if let Some(timeline) = &mut self.timeline {
            timeline.reset();
        }
        if self.state != SessionState::Idle {
            self.state = if self.is_recording() {
                SessionState::RecordingStep
            } else {
                SessionState::Paused
            };
        }
        self.step_pending = false;
    }

    /// Run one host tick.
    ///
    /// `live` is the real-time input sample; it is only consumed while
    /// recording (and passed straight through while idle). Exactly one of:
    /// a frozen tick, a playback frame plus advance, or a recorded frame
    /// plus advance.
    pub fn tick(&mut self, live: InputState) -> Tick {
        let step = std::mem::take(&mut self.step_pending);
        let first = std::mem::take(&mut self.first_tick);

        let Some(timeline) = self.timeline.as_mut() else {
            return Tick::through(live);
        };

        match self.state {
            SessionState::Idle => Tick::through(live),
            SessionState::Paused => {
                if step {
                    let input = timeline.current_input();
                    timeline.advance();
                    Tick::through(input)
                } else if first {
                    // The first tick after selection runs unfrozen so the
                    // host can settle before frame 0 is consumed.
                    Tick::through(InputState::EMPTY)
                } else {
                    Tick::frozen()
                }
            }
            SessionState::Playing => {
                let input = timeline.current_input();
                timeline.advance();
                Tick::through(input)
            }
            SessionState::RecordingFree => {
                match self.record_mode {
                    RecordMode::Overwrite => timeline.overwrite(live),
                    RecordMode::Insert => timeline.insert(live),
                }
                timeline.advance();
                Tick::through(live)
            }
            SessionState::RecordingStep => {
                if step {
                    match self.record_mode {
                        RecordMode::Overwrite => timeline.overwrite(live),
                        RecordMode::Insert => timeline.insert(live),
                    }
                    timeline.advance();
                    Tick::through(live)
                } else if first {
                    Tick::through(InputState::EMPTY)
                } else {
                    Tick::frozen()
                }
            }
        }
    }
}
