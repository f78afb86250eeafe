//! Analysis passes that reject programs the target cannot run.

use rustc_hash::FxHashSet;
use tracing::debug;

use qcs_quil::{Instruction, Program};

use crate::error::{CompileError, CompileResult};
use crate::pass::{CompileContext, Pass, PassKind};

/// Every addressed qubit must exist on the processor.
pub struct QubitValidation;

impl Pass for QubitValidation {
    fn name(&self) -> &'static str {
        "QubitValidation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, program: &mut Program, context: &CompileContext) -> CompileResult<()> {
        if let Some(qubit) = program
            .qubits()
            .into_iter()
            .find(|q| !context.processor.has_qubit(*q))
        {
            return Err(CompileError::QubitNotOnProcessor {
                qubit,
                processor: context.processor.id().to_string(),
            });
        }
        Ok(())
    }
}

/// Every two-qubit gate must act on a coupled pair.
///
/// Three-qubit gates are checked pairwise; translation removes them before
/// this pass runs in the default pipeline.
pub struct ConnectivityCheck;

impl Pass for ConnectivityCheck {
    fn name(&self) -> &'static str {
        "ConnectivityCheck"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, program: &mut Program, context: &CompileContext) -> CompileResult<()> {
        for instruction in program.instructions() {
            let Instruction::Gate { gate, qubits } = instruction else {
                continue;
            };
            for (i, &a) in qubits.iter().enumerate() {
                for &b in &qubits[i + 1..] {
                    if !context.processor.is_connected(a, b) {
                        return Err(CompileError::NotConnected {
                            gate: gate.name().to_string(),
                            a,
                            b,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn should_run(&self, program: &Program, _context: &CompileContext) -> bool {
        program.instructions().iter().any(|i| i.qubits().len() > 1)
    }
}

/// Measurements must be final: nothing may act on a qubit after it is
/// measured.
pub struct ProtoquilCheck;

impl Pass for ProtoquilCheck {
    fn name(&self) -> &'static str {
        "ProtoquilCheck"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, program: &mut Program, _context: &CompileContext) -> CompileResult<()> {
        let mut measured = FxHashSet::default();
        for instruction in program.instructions() {
            match instruction {
                Instruction::Measure { qubit, .. } => {
                    measured.insert(*qubit);
                }
                Instruction::Gate { qubits, .. } => {
                    if let Some(&qubit) = qubits.iter().find(|q| measured.contains(*q)) {
                        return Err(CompileError::NotProtoquil {
                            qubit,
                            instruction: instruction.to_string(),
                        });
                    }
                }
                Instruction::Reset(Some(qubit)) if measured.contains(qubit) => {
                    return Err(CompileError::NotProtoquil {
                        qubit: *qubit,
                        instruction: instruction.to_string(),
                    });
                }
                Instruction::Reset(None) => {
                    if let Some(&qubit) = measured.iter().min() {
                        return Err(CompileError::NotProtoquil {
                            qubit,
                            instruction: instruction.to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
        debug!("Program is protoquil, {} measured qubits", measured.len());
        Ok(())
    }

    fn should_run(&self, _program: &Program, context: &CompileContext) -> bool {
        context.protoquil
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_hal::QuantumProcessor;
    use qcs_quil::QuilGate;

    fn context(protoquil: bool) -> CompileContext {
        CompileContext {
            processor: QuantumProcessor::grid("9q-square", 3, 3),
            protoquil,
        }
    }

    fn program(instructions: Vec<Instruction>) -> Program {
        Program::from_instructions(instructions)
    }

    #[test]
    fn test_qubit_validation() {
        let mut ok = program(vec![Instruction::gate(QuilGate::X, [8]).unwrap()]);
        assert!(QubitValidation.run(&mut ok, &context(false)).is_ok());

        let mut bad = program(vec![Instruction::gate(QuilGate::X, [9]).unwrap()]);
        let err = QubitValidation.run(&mut bad, &context(false)).unwrap_err();
        assert!(matches!(err, CompileError::QubitNotOnProcessor { qubit: 9, .. }));
    }

    #[test]
    fn test_connectivity() {
        let mut ok = program(vec![Instruction::gate(QuilGate::Cz, [0, 1]).unwrap()]);
        assert!(ConnectivityCheck.run(&mut ok, &context(false)).is_ok());

        let mut bad = program(vec![Instruction::gate(QuilGate::Cz, [0, 4]).unwrap()]);
        let err = ConnectivityCheck.run(&mut bad, &context(false)).unwrap_err();
        assert!(matches!(err, CompileError::NotConnected { a: 0, b: 4, .. }));
    }

    #[test]
    fn test_protoquil_rejects_gate_after_measure() {
        let mut p = program(vec![
            Instruction::measure(0, "ro", 0),
            Instruction::gate(QuilGate::X, [0]).unwrap(),
        ]);
        assert!(ProtoquilCheck.should_run(&p, &context(true)));
        let err = ProtoquilCheck.run(&mut p, &context(true)).unwrap_err();
        assert!(matches!(err, CompileError::NotProtoquil { qubit: 0, .. }));
    }

    #[test]
    fn test_protoquil_allows_other_qubits_and_leading_reset() {
        let mut p = program(vec![
            Instruction::Reset(None),
            Instruction::measure(0, "ro", 0),
            Instruction::gate(QuilGate::X, [1]).unwrap(),
            Instruction::measure(1, "ro", 1),
        ]);
        assert!(ProtoquilCheck.run(&mut p, &context(true)).is_ok());
    }

    #[test]
    fn test_protoquil_rejects_reset_after_measure() {
        let mut p = program(vec![Instruction::measure(2, "ro", 0), Instruction::Reset(None)]);
        let err = ProtoquilCheck.run(&mut p, &context(true)).unwrap_err();
        assert!(matches!(err, CompileError::NotProtoquil { qubit: 2, .. }));
    }

    #[test]
    fn test_protoquil_skipped_when_not_requested() {
        let p = program(vec![]);
        assert!(!ProtoquilCheck.should_run(&p, &context(false)));
    }
}
