//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The requested quantum computer or QAM is not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The compiler rejected the program.
    #[error("Compilation failed: {0}")]
    Compilation(String),

    /// The program cannot be executed as given.
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    /// A parameter region was read but never written.
    #[error("Memory region '{0}' has no value")]
    MissingMemory(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The QCS API answered with a non-success status.
    #[error("QCS API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Quil construction error.
    #[error(transparent)]
    Quil(#[from] qcs_quil::QuilError),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
