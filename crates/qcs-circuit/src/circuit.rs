//! Circuits as ordered moments of operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::operation::{Operation, OperationKind};
use crate::parameter::ParameterExpression;
use crate::qubit::Qubit;
use crate::resolver::ParamResolver;

/// A set of operations acting on disjoint qubits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    operations: Vec<Operation>,
}

impl Moment {
    /// Operations in insertion order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Check whether any operation in the moment touches `qubit`.
    pub fn operates_on(&self, qubit: &Qubit) -> bool {
        self.operations.iter().any(|op| op.qubits.contains(qubit))
    }
}

/// A quantum circuit.
///
/// Operations are appended with the earliest-insertion strategy: each one
/// lands in the moment after the last moment touching any of its qubits.
/// Measurement keys are unique within a circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from a sequence of operations.
    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> IrResult<Self> {
        let mut circuit = Self::new();
        for op in ops {
            circuit.append(op)?;
        }
        Ok(circuit)
    }

    /// Append one operation.
    pub fn append(&mut self, op: Operation) -> IrResult<&mut Self> {
        if let Some(key) = op.measurement_key() {
            if self.measurement_keys().iter().any(|k| k == key) {
                return Err(IrError::DuplicateMeasurementKey(key.to_string()));
            }
        }
        let index = self
            .moments
            .iter()
            .rposition(|m| op.qubits.iter().any(|q| m.operates_on(q)))
            .map_or(0, |last| last + 1);
        if index == self.moments.len() {
            self.moments.push(Moment::default());
        }
        self.moments[index].operations.push(op);
        Ok(self)
    }

    // =========================================================================
    // Builder helpers
    // =========================================================================

    /// Apply a gate to qubits.
    pub fn apply(
        &mut self,
        gate: Gate,
        qubits: impl IntoIterator<Item = Qubit>,
    ) -> IrResult<&mut Self> {
        self.append(Operation::gate(gate, qubits)?)
    }

    /// Apply Hadamard.
    pub fn h(&mut self, q: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::H, [q])
    }

    /// Apply Pauli-X.
    pub fn x(&mut self, q: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::X, [q])
    }

    /// Apply `X**exponent`.
    pub fn x_pow(
        &mut self,
        exponent: impl Into<ParameterExpression>,
        q: Qubit,
    ) -> IrResult<&mut Self> {
        self.apply(Gate::XPow(exponent.into()), [q])
    }

    /// Apply Rx.
    pub fn rx(&mut self, theta: impl Into<ParameterExpression>, q: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::Rx(theta.into()), [q])
    }

    /// Apply Rz.
    pub fn rz(&mut self, theta: impl Into<ParameterExpression>, q: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::Rz(theta.into()), [q])
    }

    /// Apply CNOT.
    pub fn cnot(&mut self, control: Qubit, target: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::Cnot, [control, target])
    }

    /// Apply CZ.
    pub fn cz(&mut self, a: Qubit, b: Qubit) -> IrResult<&mut Self> {
        self.apply(Gate::Cz, [a, b])
    }

    /// Measure qubits under `key`.
    pub fn measure(
        &mut self,
        key: impl Into<String>,
        qubits: impl IntoIterator<Item = Qubit>,
    ) -> IrResult<&mut Self> {
        self.append(Operation::measure(key, qubits)?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Moments in order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Operations in moment order.
    pub fn all_operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(|m| m.operations.iter())
    }

    /// All qubits the circuit touches, sorted.
    pub fn all_qubits(&self) -> BTreeSet<Qubit> {
        self.all_operations()
            .flat_map(|op| op.qubits.iter().cloned())
            .collect()
    }

    /// Measurement keys in order of first appearance.
    pub fn measurement_keys(&self) -> Vec<String> {
        self.all_operations()
            .filter_map(|op| op.measurement_key().map(str::to_string))
            .collect()
    }

    /// Measurement operations in order, as `(key, qubits)`.
    pub fn measurements(&self) -> impl Iterator<Item = (&str, &[Qubit])> {
        self.all_operations().filter_map(|op| match &op.kind {
            OperationKind::Measure { key } => Some((key.as_str(), op.qubits.as_slice())),
            OperationKind::Gate(_) => None,
        })
    }

    /// Free symbol names, sorted.
    pub fn parameter_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for gate in self.all_operations().filter_map(Operation::as_gate) {
            if let Some(p) = gate.parameter() {
                p.collect_symbols(&mut names);
            }
        }
        names
    }

    /// Check whether any operation has free symbols.
    pub fn is_parameterized(&self) -> bool {
        self.all_operations().any(Operation::is_parameterized)
    }

    /// Substitute resolver values into every operation. Symbols the resolver
    /// does not bind stay symbolic.
    #[must_use]
    pub fn resolve_parameters(&self, resolver: &ParamResolver) -> Circuit {
        Circuit {
            moments: self
                .moments
                .iter()
                .map(|m| Moment {
                    operations: m.operations.iter().map(|op| op.resolve(resolver)).collect(),
                })
                .collect(),
        }
    }

    // =========================================================================
    // Standard circuits
    // =========================================================================

    /// `X(q)**t` followed by a measurement of `q` under `key`.
    pub fn parametric_flip(q: Qubit, symbol: &str, key: &str) -> IrResult<Self> {
        let mut circuit = Self::new();
        circuit
            .x_pow(ParameterExpression::symbol(symbol), q.clone())?
            .measure(key, [q])?;
        Ok(circuit)
    }

    /// Bell pair on `a`, `b` measured under `key`.
    pub fn bell(a: Qubit, b: Qubit, key: &str) -> IrResult<Self> {
        let mut circuit = Self::new();
        circuit
            .h(a.clone())?
            .cnot(a.clone(), b.clone())?
            .measure(key, [a, b])?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earliest_insertion() {
        let (a, b) = (Qubit::line(0), Qubit::line(1));
        let mut c = Circuit::new();
        c.h(a.clone()).unwrap();
        c.x(b.clone()).unwrap();
        c.cnot(a.clone(), b.clone()).unwrap();
        assert_eq!(c.depth(), 2);
        assert_eq!(c.moments()[0].operations().len(), 2);
    }

    #[test]
    fn test_bell() {
        let c = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
        assert_eq!(c.depth(), 3);
        assert_eq!(c.measurement_keys(), vec!["m"]);
        assert_eq!(c.all_qubits().len(), 2);
    }

    #[test]
    fn test_duplicate_measurement_key() {
        let mut c = Circuit::new();
        c.measure("m", [Qubit::line(0)]).unwrap();
        let err = c.measure("m", [Qubit::line(1)]).unwrap_err();
        assert!(matches!(err, IrError::DuplicateMeasurementKey(k) if k == "m"));
    }

    #[test]
    fn test_parametric_flip() {
        let c = Circuit::parametric_flip(Qubit::grid(1, 1), "t", "m").unwrap();
        assert!(c.is_parameterized());
        assert_eq!(c.parameter_names().into_iter().collect::<Vec<_>>(), vec!["t"]);

        let resolved = c.resolve_parameters(&ParamResolver::new().with("t", 1.0));
        assert!(!resolved.is_parameterized());
        assert_eq!(resolved.depth(), c.depth());
    }

    #[test]
    fn test_partial_resolution_keeps_symbols() {
        let mut c = Circuit::new();
        c.x_pow(ParameterExpression::symbol("a"), Qubit::line(0))
            .unwrap()
            .rz(ParameterExpression::symbol("b"), Qubit::line(0))
            .unwrap();
        let resolved = c.resolve_parameters(&ParamResolver::new().with("a", 0.5));
        assert_eq!(
            resolved.parameter_names().into_iter().collect::<Vec<_>>(),
            vec!["b"]
        );
    }

    #[test]
    fn test_measurements_in_order() {
        let mut c = Circuit::new();
        c.measure("b", [Qubit::line(1)]).unwrap();
        c.measure("a", [Qubit::line(0), Qubit::line(2)]).unwrap();
        let ms: Vec<_> = c.measurements().map(|(k, qs)| (k.to_string(), qs.len())).collect();
        assert_eq!(ms, vec![("b".to_string(), 1), ("a".to_string(), 2)]);
    }
}
