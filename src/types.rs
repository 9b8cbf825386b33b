use core::fmt;
use std::ops::Add;
use std::str::FromStr;

use thiserror::Error;

/// Contains the position of an output inside the virtual screen
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    /// Create a position
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Position on the single layout row, `x` pixels from the left edge
    pub fn horizontal(x: u32) -> Self {
        Self::new(x, 0)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

/// Formats as `<x>x<y>`, the form the apply command expects after `--pos`
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Contains the resolution of a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses only the width of a `<width>x<height>` mode string.
    ///
    /// Mode names may carry a suffix after the height (`1920x1080i`), so the height is not
    /// inspected here.
    pub fn parse_width(s: &str) -> std::result::Result<u32, ParseResolutionError> {
        let (width, _) = s.split_once('x').ok_or(ParseResolutionError::SecondPart)?;
        if width.is_empty() {
            return Err(ParseResolutionError::FirstPart);
        }
        Ok(width.parse()?)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors that occur while parsing a resolution from a string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseResolutionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First integer missing")]
    FirstPart,
    #[error("Second integer missing. Expected format: <width>x<height>")]
    SecondPart,
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('x');
        let width = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or(ParseResolutionError::FirstPart)?
            .parse()?;
        let height = parts
            .next()
            .ok_or(ParseResolutionError::SecondPart)?
            .parse()?;
        Ok(Self::new(width, height))
    }
}

/// Connection state of an output as reported by the display query
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        *self == ConnectionState::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseConnectionStateError {
    #[error("Unknown connection state: {0}")]
    UnknownState(String),
}

impl FromStr for ConnectionState {
    type Err = ParseConnectionStateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "connected" => Ok(ConnectionState::Connected),
            "disconnected" => Ok(ConnectionState::Disconnected),
            _ => Err(ParseConnectionStateError::UnknownState(s.to_string())),
        }
    }
}

/// Whether an output is the built-in panel or something plugged into the machine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Laptop,
    External,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Laptop => write!(f, "laptop"),
            Role::External => write!(f, "external"),
        }
    }
}
