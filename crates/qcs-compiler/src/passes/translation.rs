//! Translation into the native gate set `{RZ(θ), RX(±π/2), RX(±π), CZ}`.

use std::f64::consts::PI;

use qcs_circuit::ParameterExpression;
use qcs_quil::{Instruction, Program, QuilGate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{CompileContext, Pass, PassKind};

/// Rewrites every non-native gate as a sequence of native gates.
///
/// Decompositions are exact up to global phase and keep symbolic angles
/// symbolic, so a parametric program compiles once and is bound later
/// through memory.
pub struct NativeTranslation;

impl Pass for NativeTranslation {
    fn name(&self) -> &'static str {
        "NativeTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, program: &mut Program, _context: &CompileContext) -> CompileResult<()> {
        let mut out = Vec::with_capacity(program.instructions().len());
        for instruction in program.instructions() {
            match instruction {
                Instruction::Gate { gate, qubits } => {
                    translate_into(gate, qubits, &mut out);
                }
                other => out.push(other.clone()),
            }
        }
        debug!(
            "Translated {} instructions into {}",
            program.instructions().len(),
            out.len()
        );
        *program = program.with_instructions(out);
        Ok(())
    }

    fn should_run(&self, program: &Program, _context: &CompileContext) -> bool {
        program.instructions().iter().any(|i| match i {
            Instruction::Gate { gate, .. } => !gate.is_native(),
            _ => false,
        })
    }
}

type GateOp = (QuilGate, Vec<u64>);

fn translate_into(gate: &QuilGate, qubits: &[u64], out: &mut Vec<Instruction>) {
    match decompose(gate, qubits) {
        None => out.push(Instruction::Gate {
            gate: gate.clone(),
            qubits: qubits.to_vec(),
        }),
        Some(ops) => {
            for (g, qs) in ops {
                translate_into(&g, &qs, out);
            }
        }
    }
}

fn c(v: f64) -> ParameterExpression {
    ParameterExpression::constant(v)
}

fn rz(theta: ParameterExpression, q: u64) -> GateOp {
    (QuilGate::Rz(theta.simplify()), vec![q])
}

fn rx(theta: f64, q: u64) -> GateOp {
    (QuilGate::Rx(c(theta)), vec![q])
}

fn h(q: u64) -> GateOp {
    (QuilGate::H, vec![q])
}

fn cnot(control: u64, target: u64) -> GateOp {
    (QuilGate::Cnot, vec![control, target])
}

fn half(theta: &ParameterExpression) -> ParameterExpression {
    (theta.clone() / c(2.0)).simplify()
}

/// One decomposition step, in program order. `None` means already native.
fn decompose(gate: &QuilGate, qubits: &[u64]) -> Option<Vec<GateOp>> {
    if gate.is_native() {
        return None;
    }
    let ops = match (gate, qubits) {
        (QuilGate::X, &[q]) => vec![rx(PI, q)],
        (QuilGate::Y, &[q]) => vec![rx(PI, q), rz(c(PI), q)],
        (QuilGate::Z, &[q]) => vec![rz(c(PI), q)],
        (QuilGate::S, &[q]) => vec![rz(c(PI / 2.0), q)],
        (QuilGate::T, &[q]) => vec![rz(c(PI / 4.0), q)],
        (QuilGate::Phase(theta), &[q]) => vec![rz(theta.clone(), q)],
        (QuilGate::H, &[q]) => vec![rz(c(PI / 2.0), q), rx(PI / 2.0, q), rz(c(PI / 2.0), q)],
        (QuilGate::Rx(theta), &[q]) => vec![
            rz(c(-PI / 2.0), q),
            rx(-PI / 2.0, q),
            rz(theta.clone(), q),
            rx(PI / 2.0, q),
            rz(c(PI / 2.0), q),
        ],
        (QuilGate::Ry(theta), &[q]) => {
            vec![rx(PI / 2.0, q), rz(theta.clone(), q), rx(-PI / 2.0, q)]
        }
        (QuilGate::Cnot, &[control, target]) => vec![
            h(target),
            (QuilGate::Cz, vec![control, target]),
            h(target),
        ],
        (QuilGate::CPhase(theta), &[a, b]) => vec![
            (QuilGate::Phase(half(theta)), vec![b]),
            cnot(a, b),
            (QuilGate::Phase(-half(theta)), vec![b]),
            cnot(a, b),
            (QuilGate::Phase(half(theta)), vec![a]),
        ],
        (QuilGate::Swap, &[a, b]) => vec![cnot(a, b), cnot(b, a), cnot(a, b)],
        (QuilGate::ISwap, &[a, b]) => vec![
            (QuilGate::S, vec![a]),
            (QuilGate::S, vec![b]),
            h(a),
            cnot(a, b),
            cnot(b, a),
            h(b),
        ],
        (QuilGate::CCnot, &[a, b, t]) => {
            let tg = |q| (QuilGate::T, vec![q]);
            let tdg = |q| rz(c(-PI / 4.0), q);
            vec![
                h(t),
                cnot(b, t),
                tdg(t),
                cnot(a, t),
                tg(t),
                cnot(b, t),
                tdg(t),
                cnot(a, t),
                tg(b),
                tg(t),
                h(t),
                cnot(a, b),
                tg(a),
                tdg(b),
                cnot(a, b),
            ]
        }
        // Arity is checked when instructions are built; anything else is
        // left for the native check to report.
        _ => return None,
    };
    Some(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unitary::{assert_equivalent, program_unitary};
    use proptest::prelude::*;
    use qcs_hal::QuantumProcessor;

    fn context() -> CompileContext {
        CompileContext {
            processor: QuantumProcessor::fully_connected("3q", 3),
            protoquil: false,
        }
    }

    fn translated(gate: QuilGate, qubits: &[u64]) -> Program {
        let mut p =
            Program::from_instructions([Instruction::gate(gate, qubits.iter().copied()).unwrap()]);
        NativeTranslation.run(&mut p, &context()).unwrap();
        p
    }

    fn check(gate: QuilGate, qubits: &[u64], n: usize) {
        let original = Program::from_instructions([
            Instruction::gate(gate.clone(), qubits.iter().copied()).unwrap(),
        ]);
        let native = translated(gate, qubits);
        for i in native.instructions() {
            if let Instruction::Gate { gate, .. } = i {
                assert!(gate.is_native(), "non-native {i} left");
            }
        }
        assert_equivalent(&program_unitary(&original, n), &program_unitary(&native, n));
    }

    #[test]
    fn test_single_qubit_decompositions() {
        for g in [
            QuilGate::X,
            QuilGate::Y,
            QuilGate::Z,
            QuilGate::H,
            QuilGate::S,
            QuilGate::T,
            QuilGate::Phase(c(0.7)),
            QuilGate::Rx(c(0.3)),
            QuilGate::Ry(c(-1.1)),
        ] {
            check(g, &[0], 1);
        }
    }

    #[test]
    fn test_two_qubit_decompositions() {
        check(QuilGate::Cnot, &[0, 1], 2);
        check(QuilGate::Cnot, &[1, 0], 2);
        check(QuilGate::Swap, &[0, 1], 2);
        check(QuilGate::ISwap, &[0, 1], 2);
        check(QuilGate::CPhase(c(0.9)), &[1, 0], 2);
    }

    #[test]
    fn test_toffoli_decomposition() {
        check(QuilGate::CCnot, &[0, 1, 2], 3);
        check(QuilGate::CCnot, &[2, 0, 1], 3);
    }

    #[test]
    fn test_native_gates_untouched() {
        let p = translated(QuilGate::Rx(c(PI / 2.0)), &[4]);
        assert_eq!(p.to_string(), "RX(pi/2) 4\n");
    }

    #[test]
    fn test_symbolic_rx_stays_symbolic() {
        let theta = ParameterExpression::pi() * ParameterExpression::symbol("t");
        let p = translated(QuilGate::Rx(theta), &[0]);
        assert_eq!(
            p.to_string(),
            "RZ(-pi/2) 0\nRX(-pi/2) 0\nRZ(pi*t) 0\nRX(pi/2) 0\nRZ(pi/2) 0\n"
        );
    }

    proptest! {
        #[test]
        fn test_rotations_match_for_any_angle(theta in -10.0f64..10.0) {
            check(QuilGate::Rx(c(theta)), &[0], 1);
            check(QuilGate::Ry(c(theta)), &[0], 1);
            check(QuilGate::Phase(c(theta)), &[0], 1);
            check(QuilGate::CPhase(c(theta)), &[0, 1], 2);
        }
    }
}
