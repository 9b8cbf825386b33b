//! One run: query, detect the lid, classify, plan, apply, report.

use std::error::Error as _;

use thiserror::Error;

use crate::backend::{BackendError, DisplayBackend, format_command, xrandr_args};
use crate::config::Config;
use crate::layout::{LayoutError, LayoutPlan};
use crate::lid::{LidProbe, LidState, detect_lid_state};
use crate::query::{QueryError, Topology, parse_query};
use crate::report::{NOTIFICATION_TITLE, Notifier};
use crate::scenario::{Scenario, classify};

/// Error type for a run; every variant is fatal
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Display query failed")]
    Query(#[source] BackendError),
    #[error("Cannot read the display topology")]
    Topology(#[from] QueryError),
    #[error("No layout for {scenario} (lid {lid}, {topology})")]
    Layout {
        scenario: Scenario,
        lid: LidState,
        topology: String,
        #[source]
        source: LayoutError,
    },
    #[error("Applying {scenario} failed (lid {lid}, {topology})")]
    Apply {
        scenario: Scenario,
        lid: LidState,
        topology: String,
        #[source]
        source: BackendError,
    },
}

type Result<T = ()> = std::result::Result<T, RunError>;

/// Everything decided from one query snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub topology: Topology,
    pub lid: LidState,
    pub scenario: Scenario,
    pub plan: LayoutPlan,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub decision: Decision,
    /// The full apply command line
    pub command: String,
    /// False for dry runs
    pub applied: bool,
}

/// Wires the collaborators of a run together
pub struct Pipeline<'a> {
    config: &'a Config,
    backend: &'a dyn DisplayBackend,
    lid_probe: &'a dyn LidProbe,
    notifier: &'a dyn Notifier,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        backend: &'a dyn DisplayBackend,
        lid_probe: &'a dyn LidProbe,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            backend,
            lid_probe,
            notifier,
        }
    }

    /// Runs once and sends the final notification, success or not
    pub fn run(&self) -> Result<RunReport> {
        let result = self.execute();
        match &result {
            Ok(report) if report.applied => {
                log::info!("Applied {}", report.decision.scenario);
                self.notifier.notify(
                    NOTIFICATION_TITLE,
                    &format!("Applied {}", report.decision.scenario),
                );
            }
            Ok(report) => {
                log::info!("Dry run, not applied: {}", report.command);
            }
            Err(e) => {
                log::error!("{}", error_chain(e));
                self.notifier
                    .notify(NOTIFICATION_TITLE, &format!("Failed: {}", e));
            }
        }
        result
    }

    fn execute(&self) -> Result<RunReport> {
        let text = self.backend.query().map_err(RunError::Query)?;
        let decision = self.decide(&text)?;

        let args = xrandr_args(&decision.plan);
        let command = format_command(self.backend.program(), &args);
        log::info!("Apply command: {}", command);

        if self.config.dry_run {
            return Ok(RunReport {
                decision,
                command,
                applied: false,
            });
        }

        if let Err(source) = self.backend.apply(&args) {
            return Err(RunError::Apply {
                scenario: decision.scenario,
                lid: decision.lid,
                topology: decision.topology.to_string(),
                source,
            });
        }

        Ok(RunReport {
            decision,
            command,
            applied: true,
        })
    }

    /// The pure part of a run: from query text to a layout plan
    pub fn decide(&self, query_text: &str) -> Result<Decision> {
        let topology = parse_query(query_text, self.config.laptop_outputs.as_slice())?;
        log::info!("Topology: {}", topology);

        let lid = detect_lid_state(self.lid_probe, &topology);
        log::info!("Lid: {}", lid);

        let scenario = classify(
            topology.laptop_available(),
            lid.is_closed(),
            topology.external_count(),
        );
        log::info!("Scenario: {}", scenario);

        let plan = self
            .config
            .planner()
            .plan(scenario, &topology)
            .map_err(|source| RunError::Layout {
                scenario,
                lid,
                topology: topology.to_string(),
                source,
            })?;

        Ok(Decision {
            topology,
            lid,
            scenario,
            plan,
        })
    }
}

/// Joins an error with all of its sources
fn error_chain(error: &RunError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}
