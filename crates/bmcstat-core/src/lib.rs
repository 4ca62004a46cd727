pub mod buckets;
pub mod config;
pub mod derive;
pub mod errors;
pub mod filter;
pub mod join;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod stats;
pub mod thresholds;

#[cfg(test)]
mod testutil;

pub use config::ReportConfig;
pub use errors::{Result, StatsError};
pub use report::{run_report, Report};
