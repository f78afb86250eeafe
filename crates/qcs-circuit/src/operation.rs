//! Operations: gates or measurements applied to specific qubits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::Qubit;
use crate::resolver::ParamResolver;

/// The kind of operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationKind {
    /// A unitary gate.
    Gate(Gate),
    /// Measure the operation's qubits in the computational basis, recording
    /// the outcomes under `key`.
    Measure {
        /// Measurement key.
        key: String,
    },
}

/// An operation applied to an ordered list of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// What the operation does.
    pub kind: OperationKind,
    /// Qubits the operation acts on, in order.
    pub qubits: Vec<Qubit>,
}

impl Operation {
    /// Apply `gate` to `qubits`, checking arity and distinctness.
    pub fn gate(gate: Gate, qubits: impl IntoIterator<Item = Qubit>) -> IrResult<Self> {
        let qubits: Vec<Qubit> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        check_distinct(&qubits, Some(gate.name()))?;
        Ok(Self {
            kind: OperationKind::Gate(gate),
            qubits,
        })
    }

    /// Measure `qubits` under `key`.
    pub fn measure(
        key: impl Into<String>,
        qubits: impl IntoIterator<Item = Qubit>,
    ) -> IrResult<Self> {
        let key = key.into();
        let qubits: Vec<Qubit> = qubits.into_iter().collect();
        if qubits.is_empty() {
            return Err(IrError::EmptyMeasurement(key));
        }
        check_distinct(&qubits, None)?;
        Ok(Self {
            kind: OperationKind::Measure { key },
            qubits,
        })
    }

    /// The gate, if this is a gate operation.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            OperationKind::Gate(g) => Some(g),
            OperationKind::Measure { .. } => None,
        }
    }

    /// The measurement key, if this is a measurement.
    pub fn measurement_key(&self) -> Option<&str> {
        match &self.kind {
            OperationKind::Measure { key } => Some(key),
            OperationKind::Gate(_) => None,
        }
    }

    /// Check whether the operation has free symbols.
    pub fn is_parameterized(&self) -> bool {
        self.as_gate().is_some_and(Gate::is_parameterized)
    }

    /// Substitute resolver values into the operation.
    #[must_use]
    pub fn resolve(&self, resolver: &ParamResolver) -> Self {
        match &self.kind {
            OperationKind::Gate(g) => Self {
                kind: OperationKind::Gate(g.resolve(resolver)),
                qubits: self.qubits.clone(),
            },
            OperationKind::Measure { .. } => self.clone(),
        }
    }
}

fn check_distinct(qubits: &[Qubit], gate_name: Option<&str>) -> IrResult<()> {
    for (i, q) in qubits.iter().enumerate() {
        if qubits[..i].contains(q) {
            return Err(IrError::DuplicateQubit {
                qubit: q.clone(),
                gate_name: gate_name.map(str::to_string),
            });
        }
    }
    Ok(())
}
