// src/mission.rs

//! # Mission Module
//!
//! Mission commands, the line-oriented mission script parser, and the
//! sequencer that turns an ordered command list into altitude targets.
//!
//! A mission script holds one command per line. `#` starts a comment and
//! blank lines are ignored:
//!
//! ```text
//! TAKEOFF 10   # climb to 10 m
//! WAIT 1       # hold for a second
//! LAND 0
//! ```

pub mod command;
pub use command::*;
pub mod parser;
pub use parser::*;
pub mod sequencer;
pub use sequencer::*;
