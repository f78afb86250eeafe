//! Quil gates.

use qcs_circuit::ParameterExpression;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A gate from the Quil standard gate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuilGate {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S = PHASE(pi/2).
    S,
    /// T = PHASE(pi/4).
    T,
    /// Rotation about X.
    Rx(ParameterExpression),
    /// Rotation about Y.
    Ry(ParameterExpression),
    /// Rotation about Z.
    Rz(ParameterExpression),
    /// Phase shift on |1>.
    Phase(ParameterExpression),
    /// Controlled-Z.
    Cz,
    /// Controlled-X.
    Cnot,
    /// Controlled phase shift on |11>.
    CPhase(ParameterExpression),
    /// SWAP.
    Swap,
    /// iSWAP.
    ISwap,
    /// Toffoli.
    CCnot,
}

impl QuilGate {
    /// The Quil mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            QuilGate::I => "I",
            QuilGate::X => "X",
            QuilGate::Y => "Y",
            QuilGate::Z => "Z",
            QuilGate::H => "H",
            QuilGate::S => "S",
            QuilGate::T => "T",
            QuilGate::Rx(_) => "RX",
            QuilGate::Ry(_) => "RY",
            QuilGate::Rz(_) => "RZ",
            QuilGate::Phase(_) => "PHASE",
            QuilGate::Cz => "CZ",
            QuilGate::Cnot => "CNOT",
            QuilGate::CPhase(_) => "CPHASE",
            QuilGate::Swap => "SWAP",
            QuilGate::ISwap => "ISWAP",
            QuilGate::CCnot => "CCNOT",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            QuilGate::Cz | QuilGate::Cnot | QuilGate::CPhase(_) | QuilGate::Swap | QuilGate::ISwap => 2,
            QuilGate::CCnot => 3,
            _ => 1,
        }
    }

    /// The gate's parameter, if any.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            QuilGate::Rx(p) | QuilGate::Ry(p) | QuilGate::Rz(p) | QuilGate::Phase(p) | QuilGate::CPhase(p) => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Check membership in the Rigetti native gate set:
    /// `RZ(θ)`, `RX(k·π/2)` for `k ∈ {±1, ±2}`, `CZ` and `I`.
    pub fn is_native(&self) -> bool {
        match self {
            QuilGate::I | QuilGate::Cz | QuilGate::Rz(_) => true,
            QuilGate::Rx(theta) => theta.as_f64().is_some_and(is_native_rx_angle),
            _ => false,
        }
    }
}

/// Check whether `theta` is ±π/2 or ±π.
pub fn is_native_rx_angle(theta: f64) -> bool {
    [PI / 2.0, -PI / 2.0, PI, -PI]
        .iter()
        .any(|a| (theta - a).abs() < 1e-10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_set() {
        assert!(QuilGate::Cz.is_native());
        assert!(QuilGate::Rz(ParameterExpression::symbol("t")).is_native());
        assert!(QuilGate::Rx((PI / 2.0).into()).is_native());
        assert!(QuilGate::Rx((-PI).into()).is_native());
        assert!(!QuilGate::Rx(0.3.into()).is_native());
        assert!(!QuilGate::Rx(ParameterExpression::symbol("t")).is_native());
        assert!(!QuilGate::H.is_native());
        assert!(!QuilGate::Cnot.is_native());
    }

    #[test]
    fn test_arity() {
        assert_eq!(QuilGate::CPhase(0.1.into()).num_qubits(), 2);
        assert_eq!(QuilGate::CCnot.num_qubits(), 3);
        assert_eq!(QuilGate::Rz(0.1.into()).num_qubits(), 1);
    }
}
