//! Best-effort lid state detection.
//!
//! Nothing here is authoritative: the ACPI state file is not present on every machine, and the
//! fallback only infers a closed lid from the panel dropping off the display query. Whatever
//! is or is not available, a definite [`LidState`] comes out.

use core::fmt;
use std::fs;
use std::path::PathBuf;

use crate::query::Topology;

/// ACPI lid state files, checked in order
pub const LID_STATE_PATHS: &[&str] = &[
    "/proc/acpi/button/lid/LID0/state",
    "/proc/acpi/button/lid/LID/state",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LidState {
    Open,
    Closed,
}

impl LidState {
    pub fn is_closed(&self) -> bool {
        *self == LidState::Closed
    }
}

impl fmt::Display for LidState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LidState::Open => write!(f, "open"),
            LidState::Closed => write!(f, "closed"),
        }
    }
}

/// Source of the raw lid state text
pub trait LidProbe {
    /// Returns the contents of the lid state file, or `None` if it cannot be read
    fn read_state(&self) -> Option<String>;
}

/// Reads the first readable file out of a list of lid state files
#[derive(Debug, Clone)]
pub struct FileLidProbe {
    paths: Vec<PathBuf>,
}

impl FileLidProbe {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl LidProbe for FileLidProbe {
    fn read_state(&self) -> Option<String> {
        self.paths.iter().find_map(|path| match fs::read_to_string(path) {
            Ok(contents) => {
                log::debug!("Read lid state from {}", path.display());
                Some(contents)
            }
            Err(e) => {
                log::trace!("Lid state file {} unreadable: {}", path.display(), e);
                None
            }
        })
    }
}

/// Parses `state:      closed` into a lid state; the second token decides
pub fn parse_lid_state(contents: &str) -> Option<LidState> {
    match contents.split_whitespace().nth(1)? {
        "closed" => Some(LidState::Closed),
        "open" => Some(LidState::Open),
        _ => None,
    }
}

/// Decides the lid state for this run.
///
/// 1. A lid file reporting `closed` wins.
/// 2. Otherwise a laptop panel that the query lists as disconnected counts as closed.
/// 3. Otherwise the lid is open.
pub fn detect_lid_state(probe: &dyn LidProbe, topology: &Topology) -> LidState {
    if let Some(contents) = probe.read_state() {
        if parse_lid_state(&contents) == Some(LidState::Closed) {
            log::info!("Lid reported closed by the lid state file");
            return LidState::Closed;
        }
    }

    if let Some(laptop) = &topology.laptop {
        if !laptop.is_connected() {
            log::info!(
                "Laptop output {} is disconnected, assuming the lid is closed",
                laptop.name
            );
            return LidState::Closed;
        }
    }

    LidState::Open
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_acpi_state_lines() {
        assert_eq!(parse_lid_state("state:      closed\n"), Some(LidState::Closed));
        assert_eq!(parse_lid_state("state:      open\n"), Some(LidState::Open));
        assert_eq!(parse_lid_state("state:"), None);
        assert_eq!(parse_lid_state("closed"), None);
    }

    #[test]
    fn missing_files_read_as_absent() {
        let probe = FileLidProbe::new(vec![PathBuf::from("/nonexistent/lid/state")]);
        assert_eq!(probe.read_state(), None);
    }

    #[test]
    fn first_readable_file_wins() -> Result<(), Box<dyn std::error::Error>> {
        let dir = std::env::temp_dir().join(format!("autolayout-lid-{}", std::process::id()));
        fs::create_dir_all(&dir)?;
        let first = dir.join("LID0-state");
        let second = dir.join("LID-state");
        fs::write(&first, "state:      closed\n")?;
        fs::write(&second, "state:      open\n")?;

        let probe = FileLidProbe::new(vec![dir.join("missing"), first, second]);
        let contents = probe.read_state();
        let state = detect_lid_state(&probe, &Topology::default());
        fs::remove_dir_all(&dir)?;

        assert_eq!(contents.as_deref(), Some("state:      closed\n"));
        assert_eq!(state, LidState::Closed);
        Ok(())
    }
}
