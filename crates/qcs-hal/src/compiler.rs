//! The compiler trait.

use qcs_quil::Program;

use crate::error::HalResult;
use crate::executable::Executable;

/// Turns arbitrary Quil into executables for a specific processor.
pub trait Compiler: Send + Sync {
    /// Rewrite `program` into the processor's native gate set.
    ///
    /// With `protoquil` set, the result must also be protoquil: every
    /// measurement is final on its qubit.
    fn quil_to_native_quil(&self, program: &Program, protoquil: bool) -> HalResult<Program>;

    /// Package an already-native program as an executable.
    fn native_quil_to_executable(&self, program: &Program) -> HalResult<Executable>;
}
