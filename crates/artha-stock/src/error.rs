//! Error types for the analytical core

use thiserror::Error;

/// Errors raised by the analytical core and the orchestrator
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Sector aggregation was asked to average zero peers
    #[error("Configuration error: peer set is empty, sector averages are undefined")]
    EmptyPeerSet,

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Peer slot outside the sector panel
    #[error("Peer index {index} out of range for panel of {len}")]
    InvalidPeerIndex { index: usize, len: usize },

    /// The AI collaborator call failed
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A text report is missing one of its section markers
    #[error("Report format error: {0}")]
    ReportFormat(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Whether the error came from the remote collaborator rather than local input
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
