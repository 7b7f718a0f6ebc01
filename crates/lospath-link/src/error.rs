//! Error types for path analysis.

use thiserror::Error;

/// Boxed error produced by a terrain profile provider.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during a path analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The inputs cannot be analyzed (too few samples, zero-length path,
    /// non-finite values, or radio parameters that would feed a logarithm
    /// a non-positive value).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The terrain profile provider failed to deliver a profile.
    #[error("Terrain profile provider failed: {0}")]
    UpstreamFailure(#[source] ProviderError),
}

impl AnalysisError {
    /// Shorthand for building an [`AnalysisError::InvalidInput`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }

    /// Returns true if the error originated from the terrain provider.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AnalysisError::UpstreamFailure(_))
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
