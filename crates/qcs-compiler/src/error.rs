//! Error types for compilation.

use qcs_hal::HalError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The program uses a qubit the processor does not have.
    #[error("Qubit {qubit} is not on processor '{processor}'")]
    QubitNotOnProcessor {
        /// Offending qubit.
        qubit: u64,
        /// Processor id.
        processor: String,
    },

    /// A two-qubit gate acts on an uncoupled pair.
    #[error("{gate} on qubits {a} and {b} is not supported: qubits are not coupled")]
    NotConnected {
        /// Gate name.
        gate: String,
        /// First qubit.
        a: u64,
        /// Second qubit.
        b: u64,
    },

    /// An instruction follows a measurement on the same qubit.
    #[error("Not protoquil: {instruction} follows a measurement of qubit {qubit}")]
    NotProtoquil {
        /// The measured qubit.
        qubit: u64,
        /// The offending instruction, as Quil.
        instruction: String,
    },

    /// A gate outside the native set reached executable generation.
    #[error("Gate is not native: {0}")]
    NonNativeGate(String),

    /// Quil construction error.
    #[error(transparent)]
    Quil(#[from] qcs_quil::QuilError),
}

impl From<CompileError> for HalError {
    fn from(err: CompileError) -> Self {
        HalError::Compilation(err.to_string())
    }
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
