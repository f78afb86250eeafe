//! The quantum computer handle.

use std::sync::Arc;

use qcs_quil::Program;
use tracing::{debug, instrument};

use crate::compiler::Compiler;
use crate::error::HalResult;
use crate::executable::Executable;
use crate::processor::QuantumProcessor;
use crate::qam::Qam;
use crate::result::QamExecutionResult;

/// A QAM paired with a compiler for its processor.
///
/// This is the backend handle that samplers borrow; it is built once by the
/// caller and never owned by the code that runs circuits on it.
pub struct QuantumComputer {
    name: String,
    processor: QuantumProcessor,
    qam: Arc<dyn Qam>,
    compiler: Arc<dyn Compiler>,
}

impl std::fmt::Debug for QuantumComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantumComputer")
            .field("name", &self.name)
            .field("processor", &self.processor.id())
            .field("qam", &self.qam.name())
            .finish_non_exhaustive()
    }
}

impl QuantumComputer {
    /// Assemble a quantum computer.
    pub fn new(
        name: impl Into<String>,
        processor: QuantumProcessor,
        qam: Arc<dyn Qam>,
        compiler: Arc<dyn Compiler>,
    ) -> Self {
        Self {
            name: name.into(),
            processor,
            qam,
            compiler,
        }
    }

    /// Name, e.g. `9q-square-qvm`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The processor topology.
    pub fn processor(&self) -> &QuantumProcessor {
        &self.processor
    }

    /// Qubit addresses, sorted.
    pub fn qubits(&self) -> Vec<u64> {
        self.processor.qubits()
    }

    /// The QAM.
    pub fn qam(&self) -> &dyn Qam {
        self.qam.as_ref()
    }

    /// The compiler.
    pub fn compiler(&self) -> &dyn Compiler {
        self.compiler.as_ref()
    }

    /// Compile to native protoquil and package as an executable.
    #[instrument(skip(self, program), fields(qc = %self.name))]
    pub fn compile(&self, program: &Program) -> HalResult<Executable> {
        let native = self.compiler.quil_to_native_quil(program, true)?;
        debug!(
            "Native program has {} instructions",
            native.instructions().len()
        );
        self.compiler.native_quil_to_executable(&native)
    }

    /// Run an executable on the QAM.
    pub fn run(&self, executable: &Executable) -> HalResult<QamExecutionResult> {
        self.qam.run(executable)
    }
}
