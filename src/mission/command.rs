// src/mission/command.rs

//! Mission command types.

use core::fmt;
use core::str::FromStr;

/// Kind of a mission command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Climb to an altitude.
    Takeoff,
    /// Move to an altitude.
    Move,
    /// Descend to an altitude.
    Land,
    /// Hold the previous altitude target for a number of seconds.
    Wait,
}

impl CommandKind {
    /// Returns `true` for the altitude-targeting kinds.
    ///
    /// TAKEOFF, MOVE and LAND share the same completion logic.
    pub fn is_position(self) -> bool {
        !matches!(self, CommandKind::Wait)
    }

    /// Upper-case script keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Takeoff => "TAKEOFF",
            CommandKind::Move => "MOVE",
            CommandKind::Land => "LAND",
            CommandKind::Wait => "WAIT",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error returned when a token is not a known command keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command `{0}`")]
pub struct UnknownCommandKind(pub String);

impl FromStr for CommandKind {
    type Err = UnknownCommandKind;

    /// Parses a keyword case-insensitively.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_uppercase().as_str() {
            "TAKEOFF" => Ok(CommandKind::Takeoff),
            "MOVE" => Ok(CommandKind::Move),
            "LAND" => Ok(CommandKind::Land),
            "WAIT" => Ok(CommandKind::Wait),
            other => Err(UnknownCommandKind(other.to_string())),
        }
    }
}

/// A single mission command.
///
/// For position kinds `value` is the target altitude; for WAIT it is the
/// duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionCommand {
    /// What the command does.
    pub kind: CommandKind,
    /// Target altitude or wait duration.
    pub value: f64,
}

impl MissionCommand {
    /// Creates a command.
    pub const fn new(kind: CommandKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// TAKEOFF to `altitude`.
    pub const fn takeoff(altitude: f64) -> Self {
        Self::new(CommandKind::Takeoff, altitude)
    }

    /// MOVE to `altitude`.
    pub const fn move_to(altitude: f64) -> Self {
        Self::new(CommandKind::Move, altitude)
    }

    /// LAND at `altitude`.
    pub const fn land(altitude: f64) -> Self {
        Self::new(CommandKind::Land, altitude)
    }

    /// WAIT for `seconds`.
    pub const fn wait(seconds: f64) -> Self {
        Self::new(CommandKind::Wait, seconds)
    }
}

impl fmt::Display for MissionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test case-insensitive keyword parsing.
    #[test]
    fn test_command_kind_from_str() {
        assert_eq!("takeoff".parse(), Ok(CommandKind::Takeoff));
        assert_eq!("Move".parse(), Ok(CommandKind::Move));
        assert_eq!("LAND".parse(), Ok(CommandKind::Land));
        assert_eq!("wAiT".parse(), Ok(CommandKind::Wait));
        assert_eq!(
            "hover".parse::<CommandKind>(),
            Err(UnknownCommandKind("HOVER".to_string()))
        );
    }

    /// Test that an unknown keyword reports itself as an error.
    #[test]
    fn test_command_kind_unknown_error() {
        let error = "hover".parse::<CommandKind>().unwrap_err();
        assert_eq!(error.to_string(), "unknown command `HOVER`");

        let boxed: Box<dyn std::error::Error> = Box::new(error);
        assert!(boxed.source().is_none());
    }

    /// Test which kinds target a position.
    #[test]
    fn test_command_kind_is_position() {
        assert!(CommandKind::Takeoff.is_position());
        assert!(CommandKind::Move.is_position());
        assert!(CommandKind::Land.is_position());
        assert!(!CommandKind::Wait.is_position());
    }

    /// Test the script form of a command.
    #[test]
    fn test_command_display() {
        assert_eq!(MissionCommand::takeoff(10.0).to_string(), "TAKEOFF 10");
        assert_eq!(MissionCommand::wait(1.5).to_string(), "WAIT 1.5");
    }
}
