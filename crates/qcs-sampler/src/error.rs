//! Error types for sampling.

use thiserror::Error;

/// Errors that can occur while sampling.
///
/// Collaborator errors pass through unchanged; only the sampler's own
/// consistency checks add variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// Circuit, sweep or result error.
    #[error(transparent)]
    Ir(#[from] qcs_circuit::IrError),

    /// Program construction error.
    #[error(transparent)]
    Quil(#[from] qcs_quil::QuilError),

    /// Compiler, QAM or API error.
    #[error(transparent)]
    Hal(#[from] qcs_hal::HalError),

    /// The QAM returned no readout for a measurement's memory region.
    #[error("No readout for measurement '{key}' (memory region '{region}')")]
    MissingMeasurement {
        /// Measurement key.
        key: String,
        /// Memory region it was mapped to.
        region: String,
    },

    /// An executor returned the wrong number of results.
    #[error("Expected {expected} result(s), executor returned {got}")]
    UnexpectedResultCount {
        /// Number of resolvers passed.
        expected: usize,
        /// Number of results returned.
        got: usize,
    },
}

/// Result type for sampling.
pub type SamplerResult<T> = Result<T, SamplerError>;
