//! The native compiler behind [`qcs_hal::Compiler`].

use tracing::{debug, instrument};

use qcs_hal::{Compiler, Executable, HalResult, QuantumProcessor};
use qcs_quil::{Instruction, Program};

use crate::error::CompileError;
use crate::manager::PassManagerBuilder;

/// Compiles Quil for one processor using the built-in pass pipeline.
#[derive(Debug, Clone)]
pub struct NativeCompiler {
    processor: QuantumProcessor,
    optimize: bool,
    require_native: bool,
}

impl NativeCompiler {
    /// A compiler for `processor` with optimization on.
    ///
    /// Executables are accepted as-is; simulators run any standard gate.
    pub fn new(processor: QuantumProcessor) -> Self {
        Self {
            processor,
            optimize: true,
            require_native: false,
        }
    }

    /// Enable or disable rotation merging.
    #[must_use]
    pub fn with_optimization(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Reject non-native gates when building executables, as hardware
    /// targets do.
    #[must_use]
    pub fn with_require_native(mut self, require_native: bool) -> Self {
        self.require_native = require_native;
        self
    }

    /// The target processor.
    pub fn processor(&self) -> &QuantumProcessor {
        &self.processor
    }
}

impl Compiler for NativeCompiler {
    #[instrument(skip(self, program), fields(processor = %self.processor.id()))]
    fn quil_to_native_quil(&self, program: &Program, protoquil: bool) -> HalResult<Program> {
        let (pm, context) = PassManagerBuilder::new(self.processor.clone())
            .with_protoquil(protoquil)
            .with_optimization(self.optimize)
            .build();
        let mut native = program.clone();
        pm.run(&mut native, &context)?;
        Ok(native)
    }

    fn native_quil_to_executable(&self, program: &Program) -> HalResult<Executable> {
        if self.require_native {
            let offending = program.instructions().iter().find(|i| match i {
                Instruction::Gate { gate, .. } => !gate.is_native(),
                _ => false,
            });
            if let Some(instruction) = offending {
                return Err(CompileError::NonNativeGate(instruction.to_string()).into());
            }
        }
        debug!(
            "Packaging {} instructions for {} shots",
            program.instructions().len(),
            program.num_shots()
        );
        Ok(Executable::new(program.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_hal::HalError;
    use qcs_quil::QuilGate;

    fn x_program() -> Program {
        Program::from_instructions([Instruction::gate(QuilGate::X, [0]).unwrap()])
    }

    #[test]
    fn test_compile_errors_become_hal_errors() {
        let compiler = NativeCompiler::new(QuantumProcessor::fully_connected("1q", 1));
        let program =
            Program::from_instructions([Instruction::gate(QuilGate::X, [3]).unwrap()]);
        let err = compiler.quil_to_native_quil(&program, true).unwrap_err();
        assert!(matches!(err, HalError::Compilation(msg) if msg.contains("Qubit 3")));
    }

    #[test]
    fn test_native_quil_translates_x() {
        let compiler = NativeCompiler::new(QuantumProcessor::fully_connected("1q", 1));
        let native = compiler.quil_to_native_quil(&x_program(), false).unwrap();
        assert_eq!(native.to_string(), "RX(pi) 0\n");
    }

    #[test]
    fn test_require_native() {
        let processor = QuantumProcessor::fully_connected("1q", 1);
        let lenient = NativeCompiler::new(processor.clone());
        assert!(lenient.native_quil_to_executable(&x_program()).is_ok());

        let strict = NativeCompiler::new(processor).with_require_native(true);
        let err = strict.native_quil_to_executable(&x_program()).unwrap_err();
        assert!(matches!(err, HalError::Compilation(msg) if msg.contains("X 0")));
    }
}
