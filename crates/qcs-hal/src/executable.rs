//! Executables: compiled programs plus parameter memory.

use qcs_quil::Program;
use rustc_hash::FxHashMap;

/// A program ready for a QAM, together with values for its parameter
/// regions.
///
/// Memory can be rewritten between runs, which is how one compiled
/// parametric program serves many resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct Executable {
    program: Program,
    memory: FxHashMap<String, Vec<f64>>,
}

impl Executable {
    /// Wrap a program with empty memory.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            memory: FxHashMap::default(),
        }
    }

    /// The program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Shots per run.
    pub fn num_shots(&self) -> u32 {
        self.program.num_shots()
    }

    /// Set the contents of a parameter region.
    pub fn write_memory(&mut self, region: impl Into<String>, values: impl Into<Vec<f64>>) -> &mut Self {
        self.memory.insert(region.into(), values.into());
        self
    }

    /// The contents of a parameter region, if written.
    pub fn memory(&self, region: &str) -> Option<&[f64]> {
        self.memory.get(region).map(Vec::as_slice)
    }

    /// All written regions.
    pub fn memory_map(&self) -> &FxHashMap<String, Vec<f64>> {
        &self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_memory_overwrites() {
        let mut exe = Executable::new(Program::new());
        exe.write_memory("t", vec![0.5]);
        exe.write_memory("t", [1.5]);
        assert_eq!(exe.memory("t"), Some(&[1.5][..]));
        assert_eq!(exe.memory("u"), None);
        assert_eq!(exe.num_shots(), 1);
    }
}
