//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qcs_hal::QuantumProcessor;
use qcs_quil::Program;

use crate::error::CompileResult;
use crate::pass::{CompileContext, Pass};
use crate::passes::{
    ConnectivityCheck, MergeRotations, NativeTranslation, ProtoquilCheck, QubitValidation,
};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given program.
    #[instrument(skip(self, program, context), fields(processor = %context.processor.id()))]
    pub fn run(&self, program: &mut Program, context: &CompileContext) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on program with {} instructions",
            self.passes.len(),
            program.instructions().len()
        );

        for pass in &self.passes {
            if pass.should_run(program, context) {
                debug!("Running pass: {}", pass.name());
                pass.run(program, context)?;
                debug!(
                    "Pass {} completed, instructions: {}",
                    pass.name(),
                    program.instructions().len()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, instructions: {}",
            program.instructions().len()
        );
        Ok(())
    }

    /// Names of the passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the standard native-compilation pipeline.
pub struct PassManagerBuilder {
    processor: QuantumProcessor,
    protoquil: bool,
    optimize: bool,
}

impl PassManagerBuilder {
    /// Start a pipeline for `processor`, with optimization on and
    /// protoquil off.
    pub fn new(processor: QuantumProcessor) -> Self {
        Self {
            processor,
            protoquil: false,
            optimize: true,
        }
    }

    /// Require protoquil output.
    #[must_use]
    pub fn with_protoquil(mut self, protoquil: bool) -> Self {
        self.protoquil = protoquil;
        self
    }

    /// Enable or disable rotation merging.
    #[must_use]
    pub fn with_optimization(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Build the pass manager and return it with its context.
    pub fn build(self) -> (PassManager, CompileContext) {
        let mut pm = PassManager::new();
        pm.add_pass(QubitValidation);
        pm.add_pass(NativeTranslation);
        if self.optimize {
            pm.add_pass(MergeRotations);
        }
        pm.add_pass(ConnectivityCheck);
        // Skips itself unless the context asks for protoquil.
        pm.add_pass(ProtoquilCheck);

        let context = CompileContext {
            processor: self.processor,
            protoquil: self.protoquil,
        };
        (pm, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_quil::{Instruction, QuilGate};

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_builder_pass_order() {
        let (pm, context) = PassManagerBuilder::new(QuantumProcessor::fully_connected("2q", 2))
            .with_protoquil(true)
            .build();
        assert_eq!(
            pm.pass_names(),
            vec![
                "QubitValidation",
                "NativeTranslation",
                "MergeRotations",
                "ConnectivityCheck",
                "ProtoquilCheck"
            ]
        );
        assert!(context.protoquil);

        let (pm, _) = PassManagerBuilder::new(QuantumProcessor::fully_connected("2q", 2))
            .with_optimization(false)
            .build();
        assert!(!pm.pass_names().contains(&"MergeRotations"));
    }

    #[test]
    fn test_bell_compiles_to_native() {
        let (pm, context) = PassManagerBuilder::new(QuantumProcessor::grid("9q-square", 3, 3))
            .with_protoquil(true)
            .build();
        let mut program = Program::from_instructions([
            Instruction::gate(QuilGate::H, [0]).unwrap(),
            Instruction::gate(QuilGate::Cnot, [0, 1]).unwrap(),
            Instruction::measure(0, "ro", 0),
            Instruction::measure(1, "ro", 1),
        ]);
        program.wrap_in_numshots_loop(5);
        pm.run(&mut program, &context).unwrap();

        assert_eq!(program.num_shots(), 5);
        assert!(program.instructions().iter().all(|i| match i {
            Instruction::Gate { gate, .. } => gate.is_native(),
            _ => true,
        }));
        assert!(program.to_string().contains("CZ 0 1\n"));
    }

    #[test]
    fn test_uncoupled_gate_fails_after_translation() {
        let (pm, context) = PassManagerBuilder::new(QuantumProcessor::grid("9q-square", 3, 3)).build();
        let mut program =
            Program::from_instructions([Instruction::gate(QuilGate::Cnot, [0, 8]).unwrap()]);
        assert!(pm.run(&mut program, &context).is_err());
    }
}
