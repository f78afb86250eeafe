//! Gates of the circuit model.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;
use crate::resolver::ParamResolver;

/// A unitary gate.
///
/// `XPow`, `YPow`, `ZPow` and `CZPow` carry an exponent in half-turns, so
/// `XPow(1)` is `X` and `XPow(0.5)` is a quarter turn about X. `Rx`, `Ry` and
/// `Rz` carry an angle in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit fixed gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,

    // Single-qubit parameterized gates
    /// X raised to an exponent.
    XPow(ParameterExpression),
    /// Y raised to an exponent.
    YPow(ParameterExpression),
    /// Z raised to an exponent.
    ZPow(ParameterExpression),
    /// Rotation around X by an angle.
    Rx(ParameterExpression),
    /// Rotation around Y by an angle.
    Ry(ParameterExpression),
    /// Rotation around Z by an angle.
    Rz(ParameterExpression),

    // Two-qubit gates
    /// Controlled-X.
    Cnot,
    /// Controlled-Z.
    Cz,
    /// Controlled-Z raised to an exponent.
    CzPow(ParameterExpression),
    /// SWAP.
    Swap,
    /// iSWAP.
    ISwap,

    // Three-qubit gates
    /// Toffoli.
    Ccx,
}

impl Gate {
    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::T => "T",
            Gate::XPow(_) => "X**e",
            Gate::YPow(_) => "Y**e",
            Gate::ZPow(_) => "Z**e",
            Gate::Rx(_) => "Rx",
            Gate::Ry(_) => "Ry",
            Gate::Rz(_) => "Rz",
            Gate::Cnot => "CNOT",
            Gate::Cz => "CZ",
            Gate::CzPow(_) => "CZ**e",
            Gate::Swap => "SWAP",
            Gate::ISwap => "ISWAP",
            Gate::Ccx => "CCX",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::Cnot | Gate::Cz | Gate::CzPow(_) | Gate::Swap | Gate::ISwap => 2,
            Gate::Ccx => 3,
            _ => 1,
        }
    }

    /// The gate's parameter, if it has one.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            Gate::XPow(p)
            | Gate::YPow(p)
            | Gate::ZPow(p)
            | Gate::Rx(p)
            | Gate::Ry(p)
            | Gate::Rz(p)
            | Gate::CzPow(p) => Some(p),
            _ => None,
        }
    }

    /// Check whether the gate's parameter contains free symbols.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some_and(ParameterExpression::is_symbolic)
    }

    /// Raise the gate to `exponent`.
    ///
    /// Supported for the Pauli gates, their powers, and CZ.
    pub fn pow(&self, exponent: impl Into<ParameterExpression>) -> IrResult<Gate> {
        let exponent = exponent.into();
        let scaled = |e: &ParameterExpression| (e.clone() * exponent.clone()).simplify();
        Ok(match self {
            Gate::X => Gate::XPow(exponent),
            Gate::Y => Gate::YPow(exponent),
            Gate::Z => Gate::ZPow(exponent),
            Gate::Cz => Gate::CzPow(exponent),
            Gate::XPow(e) => Gate::XPow(scaled(e)),
            Gate::YPow(e) => Gate::YPow(scaled(e)),
            Gate::ZPow(e) => Gate::ZPow(scaled(e)),
            Gate::CzPow(e) => Gate::CzPow(scaled(e)),
            other => return Err(IrError::UnsupportedPower(other.name().to_string())),
        })
    }

    /// Substitute resolver values into the gate's parameter.
    #[must_use]
    pub fn resolve(&self, resolver: &ParamResolver) -> Gate {
        let r = |p: &ParameterExpression| p.resolve(resolver);
        match self {
            Gate::XPow(p) => Gate::XPow(r(p)),
            Gate::YPow(p) => Gate::YPow(r(p)),
            Gate::ZPow(p) => Gate::ZPow(r(p)),
            Gate::Rx(p) => Gate::Rx(r(p)),
            Gate::Ry(p) => Gate::Ry(r(p)),
            Gate::Rz(p) => Gate::Rz(r(p)),
            Gate::CzPow(p) => Gate::CzPow(r(p)),
            fixed => fixed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_of_pauli() {
        let g = Gate::X.pow(ParameterExpression::symbol("t")).unwrap();
        assert_eq!(g, Gate::XPow(ParameterExpression::symbol("t")));
        assert!(g.is_parameterized());
    }

    #[test]
    fn test_pow_of_pow_multiplies() {
        let g = Gate::ZPow(0.5.into()).pow(0.5).unwrap();
        assert_eq!(g.parameter().and_then(ParameterExpression::as_f64), Some(0.25));
    }

    #[test]
    fn test_pow_unsupported() {
        assert!(matches!(Gate::H.pow(0.5), Err(IrError::UnsupportedPower(_))));
    }

    #[test]
    fn test_resolve() {
        let g = Gate::XPow(ParameterExpression::symbol("t"));
        let resolved = g.resolve(&ParamResolver::new().with("t", 0.5));
        assert_eq!(resolved, Gate::XPow(ParameterExpression::constant(0.5)));
        assert!(!resolved.is_parameterized());
    }

    #[test]
    fn test_arity() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::CzPow(1.into()).num_qubits(), 2);
        assert_eq!(Gate::Ccx.num_qubits(), 3);
    }
}
