//! Session runtime
//!
//! Ties timelines to the host's fixed-timestep loop: the [`Session`]
//! controller decides each tick whether the simulation runs and which input
//! it sees, and [`load_all`] brings a library of tape files in from disk.

mod loader;
mod session;

pub use loader::load_all;
pub use session::{RecordMode, Session, SessionState, Tick};
