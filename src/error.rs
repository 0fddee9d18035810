// src/error.rs

//! Error type surfaced by every fallible operation in the crate.

use std::path::PathBuf;

/// Errors that can occur while loading a mission or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The mission source path does not resolve to a file.
    #[error("Mission file not found: {}", .0.display())]
    MissionFileNotFound(PathBuf),

    /// A mission line does not have the form `COMMAND [VALUE]`.
    #[error("Malformed command on line {line}: {reason}")]
    MalformedCommandLine {
        /// One-based line number in the mission script.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A mission line names a command outside TAKEOFF, MOVE, LAND and WAIT.
    #[error("Unknown command on line {line}: {token}")]
    UnknownCommand {
        /// One-based line number in the mission script.
        line: usize,
        /// The offending command token, upper-cased.
        token: String,
    },

    /// The command sequence cannot be executed, e.g. a WAIT with no
    /// position command before it.
    #[error("Invalid sequence state: {0}")]
    InvalidSequenceState(String),

    /// A configuration value would make the numerics meaningless.
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(&'static str),

    /// Reading the mission source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
