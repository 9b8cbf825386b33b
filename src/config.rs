use std::path::PathBuf;

use crate::layout::LayoutPlanner;
use crate::lid::LID_STATE_PATHS;
use crate::query::LAPTOP_OUTPUT_CANDIDATES;
use crate::resolution::{DEFAULT_LAYOUT_WIDTH, ResolutionPreference};

/// Settings for one run, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub preference: ResolutionPreference,
    pub default_width: u32,
    /// Laptop panel output names, first match wins
    pub laptop_outputs: Vec<String>,
    pub lid_files: Vec<PathBuf>,
    pub log_file: PathBuf,
    /// Plan and log the apply command without running it
    pub dry_run: bool,
    pub notify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preference: ResolutionPreference::default(),
            default_width: DEFAULT_LAYOUT_WIDTH,
            laptop_outputs: LAPTOP_OUTPUT_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lid_files: LID_STATE_PATHS.iter().map(PathBuf::from).collect(),
            log_file: default_log_file(),
            dry_run: false,
            notify: true,
        }
    }
}

impl Config {
    pub fn planner(&self) -> LayoutPlanner {
        LayoutPlanner::new(self.preference.clone(), self.default_width)
    }
}

/// `<data_local_dir>/autolayout/autolayout.log`, or `/tmp/autolayout.log` without a home
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("autolayout").join("autolayout.log"))
        .unwrap_or_else(|| PathBuf::from("/tmp/autolayout.log"))
}
