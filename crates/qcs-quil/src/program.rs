//! Quil programs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{QuilError, QuilResult};
use crate::instruction::Instruction;
use crate::memory::{Declaration, ScalarType};

/// An ordered list of Quil instructions plus a shot count.
///
/// The shot count is not part of the Quil text; it tells the executing QAM
/// how many times to run the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
    num_shots: u32,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Create an empty single-shot program.
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            num_shots: 1,
        }
    }

    /// Create a program from instructions.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        Self {
            instructions: instructions.into_iter().collect(),
            num_shots: 1,
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    /// Insert an instruction at the front.
    pub fn prepend(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.insert(0, instruction);
        self
    }

    /// Declare a memory region.
    ///
    /// Redeclaring an identical region is a no-op; redeclaring a name with a
    /// different type or size is an error. New declarations go after any
    /// existing leading declarations.
    pub fn declare(&mut self, declaration: Declaration) -> QuilResult<&mut Self> {
        if let Some(existing) = self.declaration(&declaration.name).cloned() {
            if existing == declaration {
                return Ok(self);
            }
            return Err(QuilError::ConflictingDeclaration {
                name: declaration.name,
                existing: existing.scalar_type,
                existing_size: existing.size,
            });
        }
        let at = self
            .instructions
            .iter()
            .position(|i| !matches!(i, Instruction::Declare(_)))
            .unwrap_or(self.instructions.len());
        self.instructions.insert(at, Instruction::Declare(declaration));
        Ok(self)
    }

    /// Set how many times the QAM should run the program.
    pub fn wrap_in_numshots_loop(&mut self, shots: u32) -> &mut Self {
        self.num_shots = shots;
        self
    }

    /// The shot count.
    pub fn num_shots(&self) -> u32 {
        self.num_shots
    }

    /// Instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Replace the instruction list, keeping the shot count.
    #[must_use]
    pub fn with_instructions(&self, instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            num_shots: self.num_shots,
        }
    }

    /// All declarations in order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.instructions.iter().filter_map(|i| match i {
            Instruction::Declare(d) => Some(d),
            _ => None,
        })
    }

    /// The declaration named `name`.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations().find(|d| d.name == name)
    }

    /// Declarations of one scalar type.
    pub fn regions_of(&self, scalar_type: ScalarType) -> impl Iterator<Item = &Declaration> {
        self.declarations()
            .filter(move |d| d.scalar_type == scalar_type)
    }

    /// Every qubit address the program touches, sorted.
    pub fn qubits(&self) -> BTreeSet<u64> {
        self.instructions.iter().flat_map(Instruction::qubits).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::QuilGate;

    #[test]
    fn test_declare_goes_after_leading_declarations() {
        let mut p = Program::from_instructions([
            Instruction::Declare(Declaration::bits("ro", 1)),
            Instruction::gate(QuilGate::X, [0]).unwrap(),
        ]);
        p.declare(Declaration::real("theta")).unwrap();
        assert_eq!(p.to_string(), "DECLARE ro BIT[1]\nDECLARE theta REAL[1]\nX 0\n");
    }

    #[test]
    fn test_declare_is_idempotent() {
        let mut p = Program::new();
        p.declare(Declaration::real("t")).unwrap();
        p.declare(Declaration::real("t")).unwrap();
        assert_eq!(p.declarations().count(), 1);
    }

    #[test]
    fn test_conflicting_declaration() {
        let mut p = Program::new();
        p.declare(Declaration::bits("m0", 1)).unwrap();
        let err = p.declare(Declaration::bits("m0", 2)).unwrap_err();
        assert!(matches!(err, QuilError::ConflictingDeclaration { existing_size: 1, .. }));
    }

    #[test]
    fn test_numshots_does_not_change_text() {
        let mut p = Program::from_instructions([Instruction::gate(QuilGate::H, [2]).unwrap()]);
        let before = p.to_string();
        p.wrap_in_numshots_loop(100);
        assert_eq!(p.num_shots(), 100);
        assert_eq!(p.to_string(), before);
    }

    #[test]
    fn test_qubits_and_regions() {
        let mut p = Program::new();
        p.declare(Declaration::bits("m0", 2)).unwrap();
        p.declare(Declaration::real("t")).unwrap();
        p.push(Instruction::gate(QuilGate::Cz, [5, 3]).unwrap());
        p.push(Instruction::measure(3, "m0", 0));
        assert_eq!(p.qubits().into_iter().collect::<Vec<_>>(), vec![3, 5]);
        let bits: Vec<_> = p.regions_of(ScalarType::Bit).map(|d| d.name.as_str()).collect();
        assert_eq!(bits, vec!["m0"]);
    }
}
