//! # lospath-runner
//!
//! Command-line front end for `lospath-link`: loads a YAML configuration,
//! fetches the terrain profile from a file or an elevation service, runs the
//! analysis and renders a text or JSON report.

pub mod config;
pub mod report;
pub mod runner;

mod error;

pub use config::{parse_geo_point, AnalysisConfig, ElevationConfig};
pub use error::RunnerError;
pub use report::{render, render_json, render_text, OutputFormat};
pub use runner::run_analysis;

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
