//! Error types for the circuit crate.

use crate::qubit::Qubit;
use thiserror::Error;

/// Errors that can occur while building circuits or normalizing sweeps.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: Qubit,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A measurement must act on at least one qubit.
    #[error("Measurement '{0}' has no qubits")]
    EmptyMeasurement(String),

    /// The same measurement key was used twice in one circuit.
    #[error("Measurement key '{0}' is already used in this circuit")]
    DuplicateMeasurementKey(String),

    /// The gate cannot be raised to a power.
    #[error("Gate '{0}' cannot be raised to a power")]
    UnsupportedPower(String),

    /// Parameter is unbound.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// Two factors of a product or zip sweep bind the same key.
    #[error("Overlapping sweep keys: {0:?}")]
    OverlappingSweepKeys(Vec<String>),

    /// Measurement arrays of a result disagree on the repetition count.
    #[error("Measurement '{key}' has {got} repetitions, expected {expected}")]
    InconsistentRepetitions {
        /// Offending measurement key.
        key: String,
        /// Repetitions of the first measurement.
        expected: usize,
        /// Repetitions of this measurement.
        got: usize,
    },

    /// No measurement was recorded under this key.
    #[error("No measurement under key '{0}'")]
    UnknownMeasurementKey(String),

    /// A measurement has too many qubits to read rows as integers.
    #[error("Measurement '{key}' spans {qubits} qubits; at most {max} fit in an outcome")]
    MeasurementTooWide {
        /// Offending measurement key.
        key: String,
        /// Qubits measured under the key.
        qubits: usize,
        /// Widest supported measurement.
        max: usize,
    },
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for circuit operations.
pub type IrResult<T> = Result<T, IrError>;
