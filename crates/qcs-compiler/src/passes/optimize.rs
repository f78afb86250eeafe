//! Peephole optimization on native programs.

use std::f64::consts::TAU;

use rustc_hash::FxHashMap;
use tracing::debug;

use qcs_quil::{Instruction, Program, QuilGate};

use crate::error::CompileResult;
use crate::pass::{CompileContext, Pass, PassKind};

const EPSILON: f64 = 1e-10;

/// Merge runs of `RZ` on the same qubit and drop rotations by a multiple
/// of 2π.
///
/// Symbolic angles are summed symbolically. A run ends at the next
/// instruction that touches the qubit; qubit-less instructions (`RESET`,
/// `PRAGMA`) end every run.
pub struct MergeRotations;

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "MergeRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, program: &mut Program, _context: &CompileContext) -> CompileResult<()> {
        let mut out: Vec<Instruction> = Vec::with_capacity(program.instructions().len());
        // Index into `out` of the open RZ run on each qubit.
        let mut open: FxHashMap<u64, usize> = FxHashMap::default();

        for instruction in program.instructions() {
            match instruction {
                Instruction::Gate {
                    gate: QuilGate::Rz(theta),
                    qubits,
                } => {
                    let q = qubits[0];
                    match open.get(&q).copied() {
                        Some(at) => {
                            if let Instruction::Gate {
                                gate: QuilGate::Rz(prev),
                                ..
                            } = &mut out[at]
                            {
                                *prev = (prev.clone() + theta.clone()).simplify();
                            }
                        }
                        None => {
                            open.insert(q, out.len());
                            out.push(instruction.clone());
                        }
                    }
                }
                Instruction::Declare(_) => out.push(instruction.clone()),
                other => {
                    let touched = other.qubits();
                    if touched.is_empty() {
                        open.clear();
                    }
                    for q in touched {
                        open.remove(&q);
                    }
                    out.push(other.clone());
                }
            }
        }

        let before = program.instructions().len();
        out.retain(|i| !is_trivial_rz(i));
        debug!("Merged rotations: {} -> {} instructions", before, out.len());
        *program = program.with_instructions(out);
        Ok(())
    }
}

fn is_trivial_rz(instruction: &Instruction) -> bool {
    match instruction {
        Instruction::Gate {
            gate: QuilGate::Rz(theta),
            ..
        } => theta.as_f64().is_some_and(|v| {
            let r = v.rem_euclid(TAU);
            r < EPSILON || TAU - r < EPSILON
        }),
        _ => false,
    }
}
