//! Error types for the runner.

use lospath_dem::DemError;
use lospath_link::AnalysisError;
use thiserror::Error;

/// Errors that can occur while running an analysis from the command line.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text report could not be written.
    #[error("Report formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Configuration is incomplete or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analysis itself failed.
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// A terrain provider could not be set up.
    #[error("Terrain source error: {0}")]
    Dem(#[from] DemError),
}
