//! Deterministic frame-stepped input timeline engine for TAS tooling.
//!
//! Inputs are stored as a run-length-encoded sequence of per-frame input
//! states (a [`Timeline`]), persisted as line-oriented text tapes, and
//! played back or recorded in lock-step with the host's fixed tick through
//! a [`Session`] controller.
//!
//! # Architecture
//!
//! ```text
//!  .tas files ──tape::load_file──▶ Timeline ◀──splice── Session::tick
//!                                     │                     ▲
//!                             advance/current            live input
//!                                     │                     │
//!                                     ▼                     │
//!                                InputState ──────▶ host simulation
//! ```
//!
//! - [`input`]: per-frame input state, action flags, and edge detection.
//! - [`timeline`]: the RLE run sequence, its cursor, and splice editing.
//! - [`tape`]: the text format, parsing and serialization.
//! - [`runtime`]: the playback/recording session and bulk loading.
//!
//! Everything is deterministic: the same tape and the same command sequence
//! produce the same per-frame inputs, bit for bit.

pub mod input;
pub mod runtime;
pub mod tape;
pub mod timeline;

pub use input::{Actions, InputFeed, InputState};
pub use runtime::{RecordMode, Session, SessionState, Tick, load_all};
pub use tape::{LoadError, ParseError, load_file, parse_line, serialize_run, write_timeline};
pub use timeline::{Run, Timeline};
