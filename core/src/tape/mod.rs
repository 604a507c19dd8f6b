//! Tape text format (`.tas`)
//!
//! The persistence format for timelines: UTF-8 text, one line per run,
//! comma-separated fields with tolerant whitespace.
//!
//! ```text
//! <frames:int>[,<ABBR:char>[,<angleDeg:float> | <x:float> <y:float>]]*
//! ```
//!
//! # Example Tape
//!
//! ```text
//! # walk right, then jump-dash
//! 10
//! 30,M,1 0
//! 5,M,1 0,J
//! 2,M,45,X
//! ```
//!
//! Blank lines and `#` comments parse to nothing, as does any record with a
//! non-positive frame count. Axis abbreviations (`M` movement, `E` camera)
//! consume the next field as a vector: a single number is an angle in
//! degrees (converted to a unit direction), two numbers are `x y` components
//! clamped to `[-1, 1]`. Unknown action characters are skipped with a
//! warning; malformed numbers abort the load with file and line context.

mod parser;
mod writer;

pub use parser::{LoadError, ParseError, load_file, parse_line};
pub use writer::{serialize_run, write_timeline};
