//! A library to reconfigure a multi-monitor layout when monitors are plugged, unplugged or the
//! laptop lid closes.
//!
//! The display query is parsed into a [`Topology`], the lid state and the number of external
//! monitors select a [`Scenario`], and the [`LayoutPlanner`] lays the active outputs out in a
//! single row, left to right. The resulting [`LayoutPlan`] is serialized into one `xrandr`
//! invocation as the very last step.

mod backend;
mod config;
mod layout;
mod lid;
mod pipeline;
mod query;
mod report;
mod resolution;
mod scenario;
mod types;

pub use backend::*;
pub use config::*;
pub use layout::*;
pub use lid::*;
pub use pipeline::*;
pub use query::*;
pub use report::*;
pub use resolution::*;
pub use scenario::*;
pub use types::*;
