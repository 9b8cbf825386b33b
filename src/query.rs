use core::fmt;

use thiserror::Error;

use crate::types::{ConnectionState, Role};

/// Output names a built-in panel is known by, checked in order
pub const LAPTOP_OUTPUT_CANDIDATES: &[&str] = &["eDP-1", "eDP1", "eDP", "LVDS-1", "LVDS1"];

/// Error type for the query module
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("The display query returned no output")]
    Empty,
}

type Result<T = ()> = std::result::Result<T, QueryError>;

/// One output as reported by the display query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Monitor {
    pub name: String,
    pub connection: ConnectionState,
    /// Advertised modes in query order, kept verbatim (`2560x1440`, `1920x1080i`, ...)
    pub modes: Vec<String>,
    pub role: Role,
}

impl Monitor {
    pub fn new(
        name: impl Into<String>,
        connection: ConnectionState,
        modes: Vec<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            connection,
            modes,
            role,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.connection)
    }
}

/// Snapshot of every output for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Topology {
    /// The built-in panel, whatever its connection state
    pub laptop: Option<Monitor>,
    /// Connected non-laptop outputs, in query order
    pub externals: Vec<Monitor>,
    /// Disconnected non-laptop outputs, in query order
    pub disconnected: Vec<Monitor>,
}

impl Topology {
    pub fn external_count(&self) -> usize {
        self.externals.len()
    }

    /// The laptop panel can be driven: it is known and reported connected
    pub fn laptop_available(&self) -> bool {
        self.laptop.as_ref().is_some_and(Monitor::is_connected)
    }

    pub fn laptop_name(&self) -> Option<&str> {
        self.laptop.as_ref().map(|l| l.name.as_str())
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, monitors: &[Monitor]) -> fmt::Result {
    write!(f, "[")?;
    for (i, monitor) in monitors.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", monitor.name)?;
    }
    write!(f, "]")
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.laptop {
            Some(laptop) => write!(f, "laptop={}", laptop)?,
            None => write!(f, "laptop=none")?,
        }
        write!(f, " externals=")?;
        write_names(f, &self.externals)?;
        write!(f, " disconnected=")?;
        write_names(f, &self.disconnected)
    }
}

/// An output header line, `<name> connected|disconnected ...`
fn parse_output_line(line: &str) -> Option<(&str, ConnectionState)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let state = parts.next()?.parse().ok()?;
    Some((name, state))
}

/// A mode entry starts with `<digits>x<digits>`; anything after that is part of the name
/// (`1920x1080i`, `1600x900_60.00`)
fn is_mode_token(token: &str) -> bool {
    let Some((width, rest)) = token.split_once('x') else {
        return false;
    };
    !width.is_empty()
        && width.chars().all(|c| c.is_ascii_digit())
        && rest.starts_with(|c: char| c.is_ascii_digit())
}

/// The mode of an indented mode line, if it is one
fn parse_mode_line(line: &str) -> Option<&str> {
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    line.split_whitespace().next().filter(|t| is_mode_token(t))
}

/// Parses the text output of the display query into a [`Topology`].
///
/// The laptop is the output named by the first entry of `laptop_candidates` that appears in
/// the query, regardless of its connection state. Every other connected output is an external
/// monitor, in the order the query lists them.
pub fn parse_query<S: AsRef<str>>(text: &str, laptop_candidates: &[S]) -> Result<Topology> {
    if text.trim().is_empty() {
        return Err(QueryError::Empty);
    }

    let mut outputs: Vec<(String, ConnectionState, Vec<String>)> = Vec::new();
    // true while the lines after an output header are still its mode list
    let mut in_modes = false;

    for line in text.lines() {
        if in_modes {
            if let Some(mode) = parse_mode_line(line) {
                if let Some((_, _, modes)) = outputs.last_mut() {
                    modes.push(mode.to_string());
                }
                continue;
            }
            in_modes = false;
        }

        if let Some((name, state)) = parse_output_line(line) {
            log::trace!("Query output line: {} {}", name, state);
            outputs.push((name.to_string(), state, Vec::new()));
            in_modes = true;
        }
    }

    let laptop_name = laptop_candidates
        .iter()
        .map(|candidate| candidate.as_ref())
        .find(|candidate| outputs.iter().any(|(name, _, _)| name.as_str() == *candidate))
        .map(str::to_string);

    let mut topology = Topology::default();
    for (name, state, modes) in outputs {
        if laptop_name.as_deref() == Some(name.as_str()) {
            topology.laptop = Some(Monitor::new(name, state, modes, Role::Laptop));
        } else if state.is_connected() {
            topology
                .externals
                .push(Monitor::new(name, state, modes, Role::External));
        } else {
            topology
                .disconnected
                .push(Monitor::new(name, state, modes, Role::External));
        }
    }

    log::debug!("Parsed topology: {}", topology);
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tokens() {
        assert!(is_mode_token("1920x1080"));
        assert!(is_mode_token("1920x1080i"));
        assert!(is_mode_token("1600x900_60.00"));
        assert!(!is_mode_token("x1080"));
        assert!(!is_mode_token("1920x"));
        assert!(!is_mode_token("Clock:"));
        assert!(!is_mode_token("+preferred"));
    }

    #[test]
    fn mode_lines_must_be_indented() {
        assert_eq!(parse_mode_line("   2560x1440     59.95 +"), Some("2560x1440"));
        assert_eq!(parse_mode_line("2560x1440 connected"), None);
        assert_eq!(parse_mode_line("   EDID:"), None);
    }
}
