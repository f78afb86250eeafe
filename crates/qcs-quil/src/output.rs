//! Conversion of circuit operations into Quil.

use std::collections::BTreeMap;

use qcs_circuit::{Circuit, Gate, Operation, OperationKind, ParameterExpression, Qubit};

use crate::error::{QuilError, QuilResult};
use crate::gate::QuilGate;
use crate::instruction::Instruction;
use crate::memory::Declaration;
use crate::program::Program;

/// Physical Quil address for each circuit qubit.
pub type QubitIdMap = BTreeMap<Qubit, u64>;

/// Quil readout region for each measurement key.
pub type MeasurementIdMap = BTreeMap<String, String>;

/// Map qubits to consecutive addresses in sorted order.
pub fn default_qubit_id_map<'a>(qubits: impl IntoIterator<Item = &'a Qubit>) -> QubitIdMap {
    let mut sorted: Vec<&Qubit> = qubits.into_iter().collect();
    sorted.sort();
    sorted.dedup();
    sorted
        .into_iter()
        .zip(0u64..)
        .map(|(q, i)| (q.clone(), i))
        .collect()
}

/// Map each measurement key of `circuit` to `m0`, `m1`, ... in order of
/// first appearance.
pub fn default_measurement_id_map(circuit: &Circuit) -> MeasurementIdMap {
    circuit
        .measurement_keys()
        .into_iter()
        .enumerate()
        .map(|(i, key)| (key, format!("m{i}")))
        .collect()
}

/// Translate a circuit gate to its Quil equivalent.
///
/// Pauli powers with exponent 1 become the plain Pauli, `Z**0.5` and
/// `Z**0.25` become `S` and `T`, and other exponents become rotations by
/// `exponent·π`. `CZ**e` becomes `CPHASE(e·π)`.
pub fn gate_to_quil(gate: &Gate) -> QuilGate {
    let half_turns = |e: &ParameterExpression| (ParameterExpression::pi() * e.clone()).simplify();
    let exponent_is = |e: &ParameterExpression, v: f64| e.as_f64().is_some_and(|x| (x - v).abs() < 1e-12);
    match gate {
        Gate::I => QuilGate::I,
        Gate::X => QuilGate::X,
        Gate::Y => QuilGate::Y,
        Gate::Z => QuilGate::Z,
        Gate::H => QuilGate::H,
        Gate::S => QuilGate::S,
        Gate::T => QuilGate::T,
        Gate::XPow(e) if exponent_is(e, 1.0) => QuilGate::X,
        Gate::XPow(e) => QuilGate::Rx(half_turns(e)),
        Gate::YPow(e) if exponent_is(e, 1.0) => QuilGate::Y,
        Gate::YPow(e) => QuilGate::Ry(half_turns(e)),
        Gate::ZPow(e) if exponent_is(e, 1.0) => QuilGate::Z,
        Gate::ZPow(e) if exponent_is(e, 0.5) => QuilGate::S,
        Gate::ZPow(e) if exponent_is(e, 0.25) => QuilGate::T,
        Gate::ZPow(e) => QuilGate::Rz(half_turns(e)),
        Gate::Rx(theta) => QuilGate::Rx(theta.clone()),
        Gate::Ry(theta) => QuilGate::Ry(theta.clone()),
        Gate::Rz(theta) => QuilGate::Rz(theta.clone()),
        Gate::Cnot => QuilGate::Cnot,
        Gate::Cz => QuilGate::Cz,
        Gate::CzPow(e) if exponent_is(e, 1.0) => QuilGate::Cz,
        Gate::CzPow(e) => QuilGate::CPhase(half_turns(e)),
        Gate::Swap => QuilGate::Swap,
        Gate::ISwap => QuilGate::ISwap,
        Gate::Ccx => QuilGate::CCnot,
    }
}

/// Renders a sequence of circuit operations as a Quil program.
pub struct QuilOutput<'a> {
    operations: Vec<&'a Operation>,
    qubit_id_map: &'a QubitIdMap,
    measurement_id_map: &'a MeasurementIdMap,
}

impl<'a> QuilOutput<'a> {
    /// Prepare a conversion of `operations` under the given maps.
    pub fn new(
        operations: impl IntoIterator<Item = &'a Operation>,
        qubit_id_map: &'a QubitIdMap,
        measurement_id_map: &'a MeasurementIdMap,
    ) -> Self {
        Self {
            operations: operations.into_iter().collect(),
            qubit_id_map,
            measurement_id_map,
        }
    }

    /// Build the program: one `BIT` declaration per measurement, then the
    /// operations in order.
    pub fn to_program(&self) -> QuilResult<Program> {
        let mut program = Program::new();
        for op in &self.operations {
            if let OperationKind::Measure { key } = &op.kind {
                let region = self.region(key)?;
                program.declare(Declaration::bits(region, op.qubits.len() as u64))?;
            }
        }
        for op in &self.operations {
            match &op.kind {
                OperationKind::Gate(gate) => {
                    let qubits = op
                        .qubits
                        .iter()
                        .map(|q| self.address(q))
                        .collect::<QuilResult<Vec<_>>>()?;
                    program.push(Instruction::gate(gate_to_quil(gate), qubits)?);
                }
                OperationKind::Measure { key } => {
                    let region = self.region(key)?;
                    for (i, q) in op.qubits.iter().enumerate() {
                        program.push(Instruction::measure(self.address(q)?, region, i as u64));
                    }
                }
            }
        }
        Ok(program)
    }

    fn address(&self, qubit: &Qubit) -> QuilResult<u64> {
        self.qubit_id_map
            .get(qubit)
            .copied()
            .ok_or_else(|| QuilError::UnmappedQubit(qubit.clone()))
    }

    fn region(&self, key: &str) -> QuilResult<&'a str> {
        self.measurement_id_map
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| QuilError::UnmappedMeasurementKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_circuit::ParamResolver;

    #[test]
    fn test_resolved_flip_on_grid_qubit() {
        let circuit = Circuit::parametric_flip(Qubit::grid(1, 1), "t", "m")
            .unwrap()
            .resolve_parameters(&ParamResolver::new().with("t", 0.5));
        let qmap = default_qubit_id_map(&circuit.all_qubits());
        let mmap = default_measurement_id_map(&circuit);
        let program = QuilOutput::new(circuit.all_operations(), &qmap, &mmap)
            .to_program()
            .unwrap();
        let text = program.to_string();
        assert!(text.contains("RX(pi/2) 0"));
        assert!(text.contains("DECLARE m0 BIT[1]"));
        assert!(text.contains("MEASURE 0 m0[0]"));
    }

    #[test]
    fn test_symbolic_exponent_stays_symbolic() {
        let circuit = Circuit::parametric_flip(Qubit::line(0), "t", "m").unwrap();
        let qmap = default_qubit_id_map(&circuit.all_qubits());
        let mmap = default_measurement_id_map(&circuit);
        let program = QuilOutput::new(circuit.all_operations(), &qmap, &mmap)
            .to_program()
            .unwrap();
        assert_eq!(program.to_string(), "DECLARE m0 BIT[1]\nRX(pi*t) 0\nMEASURE 0 m0[0]\n");
    }

    #[test]
    fn test_bell_with_custom_qubit_map() {
        let (q0, q1) = (Qubit::line(0), Qubit::line(1));
        let circuit = Circuit::bell(q0.clone(), q1.clone(), "m").unwrap();
        let qmap = QubitIdMap::from([(q1, 11), (q0, 13)]);
        let mmap = default_measurement_id_map(&circuit);
        let text = QuilOutput::new(circuit.all_operations(), &qmap, &mmap)
            .to_program()
            .unwrap()
            .to_string();
        for line in ["H 13", "CNOT 13 11", "DECLARE m0 BIT[2]", "MEASURE 13 m0[0]", "MEASURE 11 m0[1]"] {
            assert!(text.contains(line), "missing {line:?} in\n{text}");
        }
    }

    #[test]
    fn test_unmapped_qubit() {
        let circuit = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
        let qmap = QubitIdMap::from([(Qubit::line(0), 0)]);
        let mmap = default_measurement_id_map(&circuit);
        let err = QuilOutput::new(circuit.all_operations(), &qmap, &mmap)
            .to_program()
            .unwrap_err();
        assert!(matches!(err, QuilError::UnmappedQubit(q) if q == Qubit::line(1)));
    }

    #[test]
    fn test_gate_mapping() {
        assert_eq!(gate_to_quil(&Gate::XPow(1.0.into())), QuilGate::X);
        assert_eq!(gate_to_quil(&Gate::ZPow(0.5.into())), QuilGate::S);
        assert_eq!(gate_to_quil(&Gate::ZPow(0.25.into())), QuilGate::T);
        assert_eq!(gate_to_quil(&Gate::CzPow(1.0.into())), QuilGate::Cz);
        assert!(matches!(gate_to_quil(&Gate::CzPow(0.5.into())), QuilGate::CPhase(_)));
        assert_eq!(gate_to_quil(&Gate::Ccx), QuilGate::CCnot);
    }

    #[test]
    fn test_measurement_ids_follow_key_order() {
        let mut circuit = Circuit::new();
        circuit.measure("z", [Qubit::line(0)]).unwrap();
        circuit.measure("a", [Qubit::line(1)]).unwrap();
        let mmap = default_measurement_id_map(&circuit);
        assert_eq!(mmap["z"], "m0");
        assert_eq!(mmap["a"], "m1");
    }
}
