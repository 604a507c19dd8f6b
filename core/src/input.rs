//! Per-frame input state
//!
//! [`InputState`] is the unit of content stored in a timeline run: a bit-set
//! of discrete action flags plus the two analog vectors (movement and
//! camera). Equality is structural, which is what makes run-length encoding
//! of consecutive identical frames possible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Discrete action flags for one frame of input.
    ///
    /// Bit order is the canonical serialization order of the tape format.
    /// `MOVE` and `CAMERA` are axis actions: their flag says the
    /// corresponding vector on [`InputState`] is engaged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Actions: u16 {
        const MOVE       = 1 << 0;
        const JUMP       = 1 << 1;
        const JUMP2      = 1 << 2;
        const DASH       = 1 << 3;
        const DASH2      = 1 << 4;
        const CAMERA     = 1 << 5;
        const CLIMB      = 1 << 6;
        const PAUSE      = 1 << 7;
        const CONFIRM    = 1 << 8;
        const CANCEL     = 1 << 9;
        const MENU_UP    = 1 << 10;
        const MENU_DOWN  = 1 << 11;
        const MENU_LEFT  = 1 << 12;
        const MENU_RIGHT = 1 << 13;
    }
}

impl Actions {
    /// All single flags in canonical order, with their tape abbreviations.
    pub const CANONICAL: [(Actions, &'static str); 14] = [
        (Actions::MOVE, "M"),
        (Actions::JUMP, "J"),
        (Actions::JUMP2, "K"),
        (Actions::DASH, "X"),
        (Actions::DASH2, "C"),
        (Actions::CAMERA, "E"),
        (Actions::CLIMB, "G"),
        (Actions::PAUSE, "P"),
        (Actions::CONFIRM, "A"),
        (Actions::CANCEL, "B"),
        (Actions::MENU_UP, "U"),
        (Actions::MENU_DOWN, "D"),
        (Actions::MENU_LEFT, "L"),
        (Actions::MENU_RIGHT, "R"),
    ];

    /// Tape abbreviation for a single flag, `None` for compound or empty
    /// sets.
    pub fn abbreviation(self) -> Option<&'static str> {
        Self::CANONICAL
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, abbr)| *abbr)
    }

    /// Look up a flag from its tape abbreviation, case-insensitively.
    ///
    /// Unknown tokens map to the empty set; the parser warns and skips them.
    pub fn from_abbreviation(token: &str) -> Actions {
        match token.to_ascii_uppercase().as_str() {
            "M" => Actions::MOVE,
            "J" => Actions::JUMP,
            "K" => Actions::JUMP2,
            "X" => Actions::DASH,
            "C" => Actions::DASH2,
            "E" => Actions::CAMERA,
            "G" => Actions::CLIMB,
            "P" => Actions::PAUSE,
            "A" => Actions::CONFIRM,
            "B" => Actions::CANCEL,
            "U" => Actions::MENU_UP,
            "D" => Actions::MENU_DOWN,
            "L" => Actions::MENU_LEFT,
            "R" => Actions::MENU_RIGHT,
            _ => Actions::empty(),
        }
    }

    /// Whether this flag carries a 2D vector in the tape format.
    pub fn is_axis(self) -> bool {
        self == Actions::MOVE || self == Actions::CAMERA
    }
}

impl Default for Actions {
    fn default() -> Self {
        Actions::empty()
    }
}

// Serde as raw bits, matching the on-disk compactness of the flag set
impl Serialize for Actions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Actions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(Actions::from_bits_truncate(bits))
    }
}

/// One frame's complete input.
///
/// The vectors are meaningful only while the matching axis flag is set; a
/// cleared flag leaves its vector at zero by convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub actions: Actions,
    /// Movement stick, components in `[-1, 1]`.
    pub movement: Vec2,
    /// Camera stick, components in `[-1, 1]`.
    pub camera: Vec2,
}

impl InputState {
    /// The canonical empty state: no flags, zero vectors.
    pub const EMPTY: InputState = InputState {
        actions: Actions::empty(),
        movement: Vec2::ZERO,
        camera: Vec2::ZERO,
    };

    /// Whether no action is engaged this frame.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether a single action flag is held this frame.
    pub fn held(&self, action: Actions) -> bool {
        self.actions.contains(action)
    }

    /// Scalar the binding layer reads for one action: 1.0 while held, 0.0
    /// otherwise. Axis actions also report 1.0 when engaged; their vector is
    /// read through [`InputState::axis`].
    pub fn value_of(&self, action: Actions) -> f32 {
        if self.actions.contains(action) { 1.0 } else { 0.0 }
    }

    /// Vector for an axis action, zero while the flag is clear (or for
    /// non-axis actions).
    pub fn axis(&self, action: Actions) -> Vec2 {
        if !self.actions.contains(action) {
            return Vec2::ZERO;
        }
        if action == Actions::MOVE {
            self.movement
        } else if action == Actions::CAMERA {
            self.camera
        } else {
            Vec2::ZERO
        }
    }
}

/// Current + previous input state, updated once per tick.
///
/// This is the surface the button-binding layer polls for edge detection:
/// `pressed` and `released` compare against the previous tick's state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFeed {
    current: InputState,
    previous: InputState,
}

impl InputFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate in the effective input for this tick.
    pub fn update(&mut self, state: InputState) {
        self.previous = self.current;
        self.current = state;
    }

    pub fn current(&self) -> &InputState {
        &self.current
    }

    pub fn previous(&self) -> &InputState {
        &self.previous
    }

    /// Held this tick.
    pub fn held(&self, action: Actions) -> bool {
        self.current.held(action)
    }

    /// Went down this tick.
    pub fn pressed(&self, action: Actions) -> bool {
        self.current.held(action) && !self.previous.held(action)
    }

    /// Went up this tick.
    pub fn released(&self, action: Actions) -> bool {
        !self.current.held(action) && self.previous.held(action)
    }
}
