//! Quil instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QuilError, QuilResult};
use crate::expression::format_expression;
use crate::gate::QuilGate;
use crate::memory::{Declaration, MemoryReference};

/// A single Quil instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// `DECLARE name TYPE[size]`.
    Declare(Declaration),
    /// A gate application on physical qubit addresses.
    Gate {
        /// The gate.
        gate: QuilGate,
        /// Qubit addresses, in operand order.
        qubits: Vec<u64>,
    },
    /// `MEASURE q [target]`.
    Measure {
        /// Measured qubit.
        qubit: u64,
        /// Where the outcome goes. `None` discards it.
        target: Option<MemoryReference>,
    },
    /// `RESET` or `RESET q`.
    Reset(Option<u64>),
    /// `PRAGMA name args "freeform"`.
    Pragma {
        /// Pragma name.
        name: String,
        /// Identifier arguments.
        args: Vec<String>,
        /// Optional quoted payload.
        data: Option<String>,
    },
}

impl Instruction {
    /// Apply `gate` to `qubits`, checking arity.
    pub fn gate(gate: QuilGate, qubits: impl IntoIterator<Item = u64>) -> QuilResult<Self> {
        let qubits: Vec<u64> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() {
            return Err(QuilError::WrongQubitCount {
                gate: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        Ok(Instruction::Gate { gate, qubits })
    }

    /// Measure `qubit` into `region[index]`.
    pub fn measure(qubit: u64, region: impl Into<String>, index: u64) -> Self {
        Instruction::Measure {
            qubit,
            target: Some(MemoryReference::new(region, index)),
        }
    }

    /// Qubits this instruction touches.
    pub fn qubits(&self) -> Vec<u64> {
        match self {
            Instruction::Gate { qubits, .. } => qubits.clone(),
            Instruction::Measure { qubit, .. } | Instruction::Reset(Some(qubit)) => vec![*qubit],
            Instruction::Declare(_) | Instruction::Reset(None) | Instruction::Pragma { .. } => {
                Vec::new()
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Declare(decl) => write!(f, "{decl}"),
            Instruction::Gate { gate, qubits } => {
                write!(f, "{}", gate.name())?;
                if let Some(p) = gate.parameter() {
                    write!(f, "({})", format_expression(p))?;
                }
                for q in qubits {
                    write!(f, " {q}")?;
                }
                Ok(())
            }
            Instruction::Measure { qubit, target } => match target {
                Some(t) => write!(f, "MEASURE {qubit} {t}"),
                None => write!(f, "MEASURE {qubit}"),
            },
            Instruction::Reset(None) => write!(f, "RESET"),
            Instruction::Reset(Some(q)) => write!(f, "RESET {q}"),
            Instruction::Pragma { name, args, data } => {
                write!(f, "PRAGMA {name}")?;
                for a in args {
                    write!(f, " {a}")?;
                }
                if let Some(d) = data {
                    write!(f, " \"{d}\"")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_circuit::ParameterExpression;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_display() {
        let g = Instruction::gate(QuilGate::Rx((PI / 2.0).into()), [0]).unwrap();
        assert_eq!(g.to_string(), "RX(pi/2) 0");
        let cz = Instruction::gate(QuilGate::Cz, [13, 11]).unwrap();
        assert_eq!(cz.to_string(), "CZ 13 11");
    }

    #[test]
    fn test_symbolic_gate_display() {
        let theta = ParameterExpression::pi() * ParameterExpression::symbol("t");
        let g = Instruction::gate(QuilGate::Rx(theta), [4]).unwrap();
        assert_eq!(g.to_string(), "RX(pi*t) 4");
    }

    #[test]
    fn test_wrong_arity() {
        let err = Instruction::gate(QuilGate::Cnot, [1]).unwrap_err();
        assert!(matches!(err, QuilError::WrongQubitCount { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_measure_and_pragma_display() {
        assert_eq!(Instruction::measure(0, "m0", 0).to_string(), "MEASURE 0 m0[0]");
        let p = Instruction::Pragma {
            name: "INITIAL_REWIRING".into(),
            args: vec![],
            data: Some("NAIVE".into()),
        };
        assert_eq!(p.to_string(), "PRAGMA INITIAL_REWIRING \"NAIVE\"");
        assert_eq!(Instruction::Reset(None).to_string(), "RESET");
    }
}
