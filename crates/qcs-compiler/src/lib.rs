//! Pass-based Quil compiler for the Rigetti native gate set.
//!
//! Programs are rewritten in place by a [`PassManager`]. The standard
//! pipeline built by [`PassManagerBuilder`] runs:
//!
//! 1. [`QubitValidation`]: every qubit exists on the processor
//! 2. [`NativeTranslation`]: decompose into `RZ(θ)`, `RX(±π/2)`, `RX(±π)`
//!    and `CZ`
//! 3. [`MergeRotations`]: fold adjacent `RZ`s (optional)
//! 4. [`ConnectivityCheck`]: two-qubit gates sit on processor edges
//! 5. [`ProtoquilCheck`]: measurements are final (protoquil only)
//!
//! Symbolic angles survive compilation, so a parametric program compiles
//! once and is bound per sweep point through executable memory.
//!
//! ```rust
//! use qcs_compiler::NativeCompiler;
//! use qcs_hal::{Compiler, QuantumProcessor};
//! use qcs_quil::{Instruction, Program, QuilGate};
//!
//! let compiler = NativeCompiler::new(QuantumProcessor::grid("9q-square", 3, 3));
//! let program = Program::from_instructions([
//!     Instruction::gate(QuilGate::Cnot, [0, 1]).unwrap(),
//! ]);
//! let native = compiler.quil_to_native_quil(&program, true).unwrap();
//! assert!(native.to_string().contains("CZ 0 1"));
//! ```

pub mod error;
pub mod manager;
pub mod native;
pub mod pass;
pub mod passes;

#[cfg(test)]
mod unitary;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use native::NativeCompiler;
pub use pass::{CompileContext, Pass, PassKind};
pub use passes::{
    ConnectivityCheck, MergeRotations, NativeTranslation, ProtoquilCheck, QubitValidation,
};
