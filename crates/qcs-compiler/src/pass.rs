//! Pass trait and compile context.

use qcs_hal::QuantumProcessor;
use qcs_quil::Program;

use crate::error::CompileResult;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads the program and may reject it.
    Analysis,
    /// Rewrites the program.
    Transformation,
}

/// Target information shared by all passes.
#[derive(Debug, Clone)]
pub struct CompileContext {
    /// The processor being compiled for.
    pub processor: QuantumProcessor,
    /// Whether the output must be protoquil.
    pub protoquil: bool,
}

/// A compilation pass over a Quil program.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass. Analysis passes must leave `program` untouched.
    fn run(&self, program: &mut Program, context: &CompileContext) -> CompileResult<()>;

    /// Check if this pass should run for the given context.
    fn should_run(&self, _program: &Program, _context: &CompileContext) -> bool {
        true
    }
}
