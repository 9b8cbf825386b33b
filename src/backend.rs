use std::io;
use std::process::Command;

use thiserror::Error;

use crate::layout::{Action, LayoutPlan};
use crate::resolution::Mode;

/// Error type for the backend module
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

type Result<T = ()> = std::result::Result<T, BackendError>;

/// The display server's query and configuration interface
pub trait DisplayBackend {
    /// Returns the raw text of the display query
    fn query(&self) -> Result<String>;

    /// Applies a configuration given as command line arguments
    fn apply(&self, args: &[String]) -> Result;

    /// The program name used when logging the apply command
    fn program(&self) -> &str;
}

/// Drives the display server through the `xrandr` command
#[derive(Debug, Clone)]
pub struct Xrandr {
    program: String,
}

impl Default for Xrandr {
    fn default() -> Self {
        Self::new("xrandr")
    }
}

impl Xrandr {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackendError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DisplayBackend for Xrandr {
    fn query(&self) -> Result<String> {
        self.run(&["--query".to_string()])
    }

    fn apply(&self, args: &[String]) -> Result {
        self.run(args).map(|_| ())
    }

    fn program(&self) -> &str {
        &self.program
    }
}

/// Serializes a plan into `--output` clauses, one per directive, in plan order
pub fn xrandr_args(plan: &LayoutPlan) -> Vec<String> {
    let mut args = Vec::new();
    for directive in plan.directives() {
        args.push("--output".to_string());
        args.push(directive.output.clone());

        if directive.action == Action::Off {
            args.push("--off".to_string());
            continue;
        }

        if directive.action == Action::PrimaryActive {
            args.push("--primary".to_string());
        }
        match &directive.mode {
            Mode::Named(name) => {
                args.push("--mode".to_string());
                args.push(name.clone());
            }
            Mode::Auto => args.push("--auto".to_string()),
        }
        args.push("--pos".to_string());
        args.push(directive.position.to_string());
    }
    args
}

/// Renders a command line for logs and dry runs
pub fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
