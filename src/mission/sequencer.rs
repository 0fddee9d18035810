// src/mission/sequencer.rs

//! # Command Sequencer
//!
//! Walks an ordered list of mission commands with a cursor and turns the
//! current estimated altitude and simulation time into the active altitude
//! target.
//!
//! - TAKEOFF, MOVE and LAND complete once the estimate is within
//!   [`COMPLETION_TOLERANCE`] of the command value. Until then the command
//!   value is the target.
//! - WAIT records the time of its first visit and completes once its
//!   duration has elapsed. Until then the target of the most recent
//!   position command is held.
//!
//! Completed commands are skipped within the same query, so several
//! already-satisfied commands can be passed at once. Once the cursor runs
//! off the end the mission is complete and every query returns `None`.

use super::MissionCommand;
use crate::SimulationError;

/// Distance from a position target within which the command is complete.
pub const COMPLETION_TOLERANCE: f64 = 0.2;

/// Stateful mission command sequencer.
#[derive(Debug, Clone)]
pub struct CommandSequencer {
    commands: Vec<MissionCommand>,
    cursor: usize,
    wait_start_time: Option<f64>,
}

impl CommandSequencer {
    /// Creates a sequencer positioned at the first command.
    ///
    /// Fails if any WAIT appears before the first position command, since
    /// there would be no altitude to hold.
    pub fn new(commands: Vec<MissionCommand>) -> Result<Self, SimulationError> {
        if matches!(commands.first(), Some(first) if !first.kind.is_position()) {
            return Err(SimulationError::InvalidSequenceState(
                "WAIT at command 1 has no preceding position command".to_string(),
            ));
        }

        Ok(Self {
            commands,
            cursor: 0,
            wait_start_time: None,
        })
    }

    /// Returns the active altitude target, or `None` once the mission is
    /// complete.
    pub fn advance(
        &mut self,
        current_estimate: f64,
        current_time: f64,
    ) -> Result<Option<f64>, SimulationError> {
        while let Some(command) = self.commands.get(self.cursor).copied() {
            if command.kind.is_position() {
                if (current_estimate - command.value).abs() < COMPLETION_TOLERANCE {
                    self.complete(command, current_time);
                    continue;
                }
                return Ok(Some(command.value));
            }

            let wait_start = match self.wait_start_time {
                Some(start) => start,
                None => {
                    log::info!(
                        "holding for {}s from t={current_time:.2}",
                        command.value
                    );
                    self.wait_start_time = Some(current_time);
                    current_time
                }
            };
            if current_time - wait_start >= command.value {
                self.wait_start_time = None;
                self.complete(command, current_time);
                continue;
            }
            return self.held_target().map(Some);
        }

        Ok(None)
    }

    fn complete(&mut self, command: MissionCommand, current_time: f64) {
        log::debug!(
            "command {} ({command}) complete at t={current_time:.2}",
            self.cursor + 1
        );
        self.cursor += 1;
        if self.is_complete() {
            log::info!("mission sequence complete at t={current_time:.2}");
        }
    }

    /// Target of the most recent position command before the cursor.
    fn held_target(&self) -> Result<f64, SimulationError> {
        self.commands
            .get(..self.cursor)
            .and_then(|passed| passed.iter().rev().find(|command| command.kind.is_position()))
            .map(|command| command.value)
            .ok_or_else(|| {
                SimulationError::InvalidSequenceState(format!(
                    "WAIT at command {} has no preceding position command",
                    self.cursor + 1
                ))
            })
    }

    /// Index of the command currently being executed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Command currently being executed, if any.
    pub fn current(&self) -> Option<&MissionCommand> {
        self.commands.get(self.cursor)
    }

    /// All commands in execution order.
    pub fn commands(&self) -> &[MissionCommand] {
        &self.commands
    }

    /// Number of commands in the mission.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if the mission has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns `true` once every command has completed.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.commands.len()
    }

    /// Time at which the current WAIT started, while one is in progress.
    pub fn wait_start_time(&self) -> Option<f64> {
        self.wait_start_time
    }
}
