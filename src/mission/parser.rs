// src/mission/parser.rs

//! Mission script loading and parsing.
//!
//! Each non-empty line is `COMMAND [VALUE]`. The command is matched
//! case-insensitively and the value defaults to `0.0` when absent. Any
//! line that does not fit this form, or names an unknown command, fails
//! the whole load.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{CommandKind, MissionCommand, UnknownCommandKind};
use crate::SimulationError;

/// Comment marker; everything from it to the end of the line is ignored.
pub const COMMENT_MARKER: char = '#';

/// Reads and parses the mission script at `path`.
pub fn load_mission<P: AsRef<Path>>(path: P) -> Result<Vec<MissionCommand>, SimulationError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SimulationError::MissionFileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let commands = parse_mission(&text)?;
    log::debug!(
        "loaded {} mission commands from {}",
        commands.len(),
        path.display()
    );
    Ok(commands)
}

/// Parses a whole mission script into its ordered command list.
pub fn parse_mission(text: &str) -> Result<Vec<MissionCommand>, SimulationError> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Parses one script line. `line_number` is one-based and only used for
/// error reporting.
///
/// Returns `Ok(None)` for blank and comment-only lines.
pub fn parse_line(
    line_number: usize,
    line: &str,
) -> Result<Option<MissionCommand>, SimulationError> {
    let content = match line.split_once(COMMENT_MARKER) {
        Some((content, _comment)) => content,
        None => line,
    };

    let mut tokens = content.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    let kind = keyword
        .parse::<CommandKind>()
        .map_err(|UnknownCommandKind(token)| SimulationError::UnknownCommand {
            line: line_number,
            token,
        })?;

    let value = match tokens.next() {
        Some(token) => parse_value(line_number, token)?,
        None => 0.0,
    };

    if let Some(extra) = tokens.next() {
        return Err(malformed(line_number, format!("unexpected token `{extra}`")));
    }
    if kind == CommandKind::Wait && value < 0.0 {
        return Err(malformed(line_number, format!("negative wait duration {value}")));
    }

    Ok(Some(MissionCommand::new(kind, value)))
}

fn parse_value(line_number: usize, token: &str) -> Result<f64, SimulationError> {
    let value: f64 = token
        .parse()
        .map_err(|_| malformed(line_number, format!("`{token}` is not a number")))?;
    if !value.is_finite() {
        return Err(malformed(line_number, format!("`{token}` is not finite")));
    }
    Ok(value)
}

fn malformed(line: usize, reason: String) -> SimulationError {
    SimulationError::MalformedCommandLine { line, reason }
}

impl FromStr for MissionCommand {
    type Err = SimulationError;

    /// Parses a single script line that must contain a command.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_line(1, line)?.ok_or_else(|| malformed(1, "empty command".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test parsing a script with comments, blank lines and mixed case.
    #[test]
    fn test_parser_mission_script() {
        let script = "\
# demo mission
takeoff 10   # climb

Wait 1.5
MOVE 4
land
";
        let commands = parse_mission(script).unwrap();
        assert_eq!(
            commands,
            vec![
                MissionCommand::takeoff(10.0),
                MissionCommand::wait(1.5),
                MissionCommand::move_to(4.0),
                MissionCommand::land(0.0),
            ]
        );
    }

    /// Test that blank and comment-only lines produce nothing.
    #[test]
    fn test_parser_blank_lines() {
        assert!(parse_line(1, "").unwrap().is_none());
        assert!(parse_line(2, "    \t").unwrap().is_none());
        assert!(parse_line(3, "# TAKEOFF 10").unwrap().is_none());
        assert!(parse_mission("\n\n# nothing\n").unwrap().is_empty());
    }

    /// Test that a missing value defaults to zero.
    #[test]
    fn test_parser_default_value() {
        assert_eq!(
            parse_line(1, "LAND").unwrap(),
            Some(MissionCommand::land(0.0))
        );
        assert_eq!(
            parse_line(1, "LAND # touch down").unwrap(),
            Some(MissionCommand::land(0.0))
        );
    }

    /// Test that unknown commands are rejected with their line number.
    #[test]
    fn test_parser_unknown_command() {
        let error = parse_mission("TAKEOFF 5\nhover 3\n").unwrap_err();
        match error {
            SimulationError::UnknownCommand { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "HOVER");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Test the malformed line cases.
    #[test]
    fn test_parser_malformed_lines() {
        for line in ["TAKEOFF ten", "MOVE 3 4", "WAIT -1", "MOVE inf", "MOVE NaN"] {
            assert!(
                matches!(
                    parse_line(7, line),
                    Err(SimulationError::MalformedCommandLine { line: 7, .. })
                ),
                "`{line}` should be malformed"
            );
        }
    }

    /// Test single-line parsing through FromStr.
    #[test]
    fn test_parser_from_str() {
        assert_eq!(
            "move 2.5".parse::<MissionCommand>().unwrap(),
            MissionCommand::move_to(2.5)
        );
        assert!("# only a comment".parse::<MissionCommand>().is_err());
    }

    /// Test that a missing mission file reports its path.
    #[test]
    fn test_parser_missing_file() {
        let path = std::env::temp_dir().join("quadcopter-altitude-sim-missing-mission.txt");
        match load_mission(&path) {
            Err(SimulationError::MissionFileNotFound(missing)) => assert_eq!(missing, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    /// Test loading a mission from disk.
    #[test]
    fn test_parser_load_file() {
        let path = std::env::temp_dir().join(format!(
            "quadcopter-altitude-sim-mission-{}.txt",
            std::process::id()
        ));
        fs::write(&path, "TAKEOFF 3\nWAIT 2\nLAND 0\n").unwrap();

        let commands = load_mission(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            commands,
            vec![
                MissionCommand::takeoff(3.0),
                MissionCommand::wait(2.0),
                MissionCommand::land(0.0),
            ]
        );
    }
}
