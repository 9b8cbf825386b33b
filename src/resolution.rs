use core::fmt;

use crate::query::Monitor;
use crate::types::Resolution;

pub const DEFAULT_PREFERRED_RESOLUTION: &str = "2560x1440";
pub const DEFAULT_FALLBACK_RESOLUTION: &str = "1920x1080";
/// Width assumed for an output left on `auto` when placing the outputs to its right
pub const DEFAULT_LAYOUT_WIDTH: u32 = 1920;

/// The mode an output is driven at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A mode name advertised by the output
    Named(String),
    /// Leave the choice to the display server
    Auto,
}

impl Mode {
    /// Width used for placing later outputs.
    ///
    /// `Auto` cannot be known before the apply step and is assumed to be `default_width`.
    /// If the real mode ends up wider or narrower, outputs to the right will overlap or leave
    /// a gap.
    pub fn layout_width(&self, default_width: u32) -> u32 {
        match self {
            Mode::Auto => default_width,
            Mode::Named(name) => match Resolution::parse_width(name) {
                Ok(width) => width,
                Err(e) => {
                    log::error!(
                        "Cannot read a width from mode {:?} ({}), assuming {} px",
                        name,
                        e,
                        default_width
                    );
                    default_width
                }
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Named(name) => write!(f, "{}", name),
            Mode::Auto => write!(f, "auto"),
        }
    }
}

/// Fixed two-step preference for picking an output's mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionPreference {
    pub preferred: String,
    pub fallback: String,
}

impl Default for ResolutionPreference {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERRED_RESOLUTION, DEFAULT_FALLBACK_RESOLUTION)
    }
}

impl ResolutionPreference {
    pub fn new(preferred: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            preferred: preferred.into(),
            fallback: fallback.into(),
        }
    }

    /// Selects the preferred mode if advertised, then the fallback, then `auto`
    pub fn select(&self, modes: &[String]) -> Mode {
        [&self.preferred, &self.fallback]
            .into_iter()
            .find(|wanted| modes.iter().any(|m| m == *wanted))
            .map(|wanted| Mode::Named(wanted.clone()))
            .unwrap_or(Mode::Auto)
    }

    pub fn select_for(&self, monitor: &Monitor) -> Mode {
        let mode = self.select(&monitor.modes);
        if mode == Mode::Auto {
            log::debug!(
                "{} advertises neither {} nor {}, leaving it on auto",
                monitor.name,
                self.preferred,
                self.fallback
            );
        }
        mode
    }
}
