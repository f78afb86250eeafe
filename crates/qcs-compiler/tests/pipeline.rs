//! End-to-end compilation of circuit-derived programs.

use qcs_circuit::{Circuit, Qubit};
use qcs_compiler::NativeCompiler;
use qcs_hal::{Compiler, HalError, QuantumProcessor};
use qcs_quil::{QuilOutput, default_measurement_id_map, default_qubit_id_map};

fn program_for(circuit: &Circuit) -> qcs_quil::Program {
    let qubits = default_qubit_id_map(&circuit.all_qubits());
    let keys = default_measurement_id_map(circuit);
    QuilOutput::new(circuit.all_operations(), &qubits, &keys)
        .to_program()
        .unwrap()
}

#[test]
fn parametric_flip_keeps_its_symbol() {
    let circuit = Circuit::parametric_flip(Qubit::line(0), "t", "m").unwrap();
    let compiler = NativeCompiler::new(QuantumProcessor::grid("9q-square", 3, 3));
    let native = compiler
        .quil_to_native_quil(&program_for(&circuit), true)
        .unwrap();
    let text = native.to_string();

    assert!(text.starts_with("DECLARE m0 BIT[1]\n"));
    assert!(text.contains("RZ(pi*t) 0\n"));
    assert!(text.ends_with("MEASURE 0 m0[0]\n"));
}

#[test]
fn bell_on_grid_compiles() {
    let circuit = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
    let compiler = NativeCompiler::new(QuantumProcessor::grid("9q-square", 3, 3))
        .with_require_native(true);
    let native = compiler
        .quil_to_native_quil(&program_for(&circuit), true)
        .unwrap();
    let exe = compiler.native_quil_to_executable(&native).unwrap();
    assert_eq!(exe.program().declaration("m0").unwrap().size, 2);
}

#[test]
fn unknown_qubit_is_a_compilation_error() {
    let circuit = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
    let compiler = NativeCompiler::new(QuantumProcessor::fully_connected("1q", 1));
    let err = compiler
        .quil_to_native_quil(&program_for(&circuit), true)
        .unwrap_err();
    assert!(matches!(err, HalError::Compilation(_)));
}
