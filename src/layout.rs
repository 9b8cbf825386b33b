use core::fmt;

use thiserror::Error;

use crate::query::{Monitor, Topology};
use crate::resolution::{DEFAULT_LAYOUT_WIDTH, Mode, ResolutionPreference};
use crate::scenario::Scenario;
use crate::types::Position;

/// Error type for the layout module
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unsupported display configuration and no usable laptop panel to fall back to ({topology})")]
    NoFallback { topology: String },
    #[error("Scenario {scenario} needs a connected laptop panel ({topology})")]
    MissingLaptop { scenario: Scenario, topology: String },
    #[error("Scenario {scenario} lays out {expected} external monitors, found {found}")]
    ExternalCountMismatch {
        scenario: Scenario,
        expected: usize,
        found: usize,
    },
}

type Result<T = ()> = std::result::Result<T, LayoutError>;

/// What happens to an output
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    PrimaryActive,
    Active,
    Off,
}

impl Action {
    pub fn is_active(&self) -> bool {
        *self != Action::Off
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::PrimaryActive => write!(f, "primary-active"),
            Action::Active => write!(f, "active"),
            Action::Off => write!(f, "off"),
        }
    }
}

/// Target configuration of one output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputDirective {
    pub output: String,
    pub action: Action,
    /// Ignored for [`Action::Off`]
    pub mode: Mode,
    /// Ignored for [`Action::Off`]
    pub position: Position,
}

impl OutputDirective {
    fn off(output: &str) -> Self {
        Self {
            output: output.to_string(),
            action: Action::Off,
            mode: Mode::Auto,
            position: Position::default(),
        }
    }
}

impl fmt::Display for OutputDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Off => write!(f, "{}: off", self.output),
            action => write!(
                f,
                "{}: {} mode={} pos={}",
                self.output, action, self.mode, self.position
            ),
        }
    }
}

/// Ordered per-output directives for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LayoutPlan {
    directives: Vec<OutputDirective>,
}

impl LayoutPlan {
    pub fn directives(&self) -> &[OutputDirective] {
        &self.directives
    }

    /// Active directives in placement order
    pub fn placed(&self) -> impl Iterator<Item = &OutputDirective> {
        self.directives.iter().filter(|d| d.action.is_active())
    }

    pub fn primary(&self) -> Option<&OutputDirective> {
        self.directives
            .iter()
            .find(|d| d.action == Action::PrimaryActive)
    }

    pub fn get(&self, output: &str) -> Option<&OutputDirective> {
        self.directives.iter().find(|d| d.output == output)
    }

    pub fn contains(&self, output: &str) -> bool {
        self.get(output).is_some()
    }
}

impl fmt::Display for LayoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", directive)?;
        }
        Ok(())
    }
}

/// Turns a scenario and a topology into a single-row, left-to-right layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlanner {
    pub preference: ResolutionPreference,
    pub default_width: u32,
}

impl Default for LayoutPlanner {
    fn default() -> Self {
        Self::new(ResolutionPreference::default(), DEFAULT_LAYOUT_WIDTH)
    }
}

impl LayoutPlanner {
    pub fn new(preference: ResolutionPreference, default_width: u32) -> Self {
        Self {
            preference,
            default_width,
        }
    }

    /// Builds the plan for `scenario`.
    ///
    /// Outputs are placed in the order given by the query, the first placed output is the
    /// primary one, and the laptop panel, when used alongside externals, goes to the far
    /// right. Disconnected outputs not otherwise covered are switched off at the end.
    pub fn plan(&self, scenario: Scenario, topology: &Topology) -> Result<LayoutPlan> {
        if let Some(expected) = scenario.external_count() {
            if expected != topology.external_count() {
                return Err(LayoutError::ExternalCountMismatch {
                    scenario,
                    expected,
                    found: topology.external_count(),
                });
            }
        }

        let mut directives = Vec::new();
        match scenario {
            Scenario::LaptopOnly => {
                let laptop = require_laptop(scenario, topology)?;
                self.place(&mut directives, [laptop]);
                switch_off(&mut directives, &topology.externals);
            }
            Scenario::LaptopPlus1External
            | Scenario::LaptopPlus2External
            | Scenario::LaptopPlus3External => {
                let laptop = require_laptop(scenario, topology)?;
                self.place(
                    &mut directives,
                    topology.externals.iter().chain(std::iter::once(laptop)),
                );
            }
            Scenario::External1Only | Scenario::External2Only | Scenario::External3Only => {
                if let Some(laptop) = &topology.laptop {
                    directives.push(OutputDirective::off(&laptop.name));
                }
                self.place(&mut directives, &topology.externals);
            }
            Scenario::Fallback => {
                let Some(laptop) = topology.laptop.as_ref().filter(|l| l.is_connected()) else {
                    return Err(LayoutError::NoFallback {
                        topology: topology.to_string(),
                    });
                };
                log::error!(
                    "Unsupported display configuration ({}), falling back to the laptop panel only",
                    topology
                );
                self.place(&mut directives, [laptop]);
                switch_off(&mut directives, &topology.externals);
            }
        }

        let mut plan = LayoutPlan { directives };
        for monitor in &topology.disconnected {
            if !plan.contains(&monitor.name) {
                plan.directives.push(OutputDirective::off(&monitor.name));
            }
        }

        for directive in plan.directives() {
            log::info!("Planned {}", directive);
        }
        Ok(plan)
    }

    /// Places `monitors` left to right starting at offset 0; the first one is primary
    fn place<'a>(
        &self,
        directives: &mut Vec<OutputDirective>,
        monitors: impl IntoIterator<Item = &'a Monitor>,
    ) {
        let mut position = Position::default();
        for (i, monitor) in monitors.into_iter().enumerate() {
            let mode = self.preference.select_for(monitor);
            let width = mode.layout_width(self.default_width);
            directives.push(OutputDirective {
                output: monitor.name.clone(),
                action: if i == 0 {
                    Action::PrimaryActive
                } else {
                    Action::Active
                },
                mode,
                position,
            });
            position = position + Position::horizontal(width);
        }
    }
}

fn require_laptop<'a>(scenario: Scenario, topology: &'a Topology) -> Result<&'a Monitor> {
    topology
        .laptop
        .as_ref()
        .filter(|l| l.is_connected())
        .ok_or_else(|| LayoutError::MissingLaptop {
            scenario,
            topology: topology.to_string(),
        })
}

fn switch_off(directives: &mut Vec<OutputDirective>, monitors: &[Monitor]) {
    directives.extend(monitors.iter().map(|m| OutputDirective::off(&m.name)));
}
