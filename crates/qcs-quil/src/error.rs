//! Error types for Quil construction.

use qcs_circuit::Qubit;
use thiserror::Error;

use crate::memory::ScalarType;

/// Errors that can occur while building or converting Quil programs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuilError {
    /// A circuit qubit has no Quil address.
    #[error("Qubit {0} has no entry in the qubit id map")]
    UnmappedQubit(Qubit),

    /// A measurement key has no memory region.
    #[error("Measurement key '{0}' has no entry in the measurement id map")]
    UnmappedMeasurementKey(String),

    /// A memory region was declared twice with different shapes.
    #[error("Memory region '{name}' is already declared as {existing}[{existing_size}]")]
    ConflictingDeclaration {
        /// Region name.
        name: String,
        /// Type of the existing declaration.
        existing: ScalarType,
        /// Size of the existing declaration.
        existing_size: u64,
    },

    /// A gate was applied to the wrong number of qubits.
    #[error("Quil gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        /// Gate name.
        gate: String,
        /// Expected arity.
        expected: usize,
        /// Provided arity.
        got: usize,
    },
}

/// Result type for Quil operations.
pub type QuilResult<T> = Result<T, QuilError>;
