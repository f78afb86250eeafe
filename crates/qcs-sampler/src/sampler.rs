//! The sampler: run a circuit over a parameter sweep.

use std::sync::Arc;

use tracing::{debug, instrument};

use qcs_circuit::{Circuit, ParamResolver, StudyResult, Sweepable, to_resolvers};
use qcs_hal::QuantumComputer;

use crate::error::{SamplerError, SamplerResult};
use crate::executors::{CircuitSweepExecutor, WithQuilcCompilationAndParameterResolution};
use crate::transformers::{self, CircuitTransformer};

/// Samples circuits over sweeps of parameter values.
pub trait Sampler {
    /// Run `circuit` `repetitions` times for every resolver in `params`.
    ///
    /// Results are in resolver order, one per resolver.
    fn run_sweep(
        &self,
        circuit: &Circuit,
        params: &Sweepable,
        repetitions: u32,
    ) -> SamplerResult<Vec<StudyResult>>;

    /// Run `circuit` under a single resolver.
    fn run(
        &self,
        circuit: &Circuit,
        resolver: &ParamResolver,
        repetitions: u32,
    ) -> SamplerResult<StudyResult> {
        let params = Sweepable::Resolver(resolver.clone());
        single(self.run_sweep(circuit, &params, repetitions)?)
    }
}

/// Take the only element of `results`.
pub(crate) fn single(mut results: Vec<StudyResult>) -> SamplerResult<StudyResult> {
    let got = results.len();
    match results.pop() {
        Some(result) if got == 1 => Ok(result),
        _ => Err(SamplerError::UnexpectedResultCount { expected: 1, got }),
    }
}

/// A [`Sampler`] backed by a Rigetti QCS quantum computer or QVM.
///
/// The quantum computer is borrowed; the sampler never owns or reconfigures
/// it. Each sweep makes exactly one executor call.
pub struct RigettiQcsSampler<'qc> {
    quantum_computer: &'qc QuantumComputer,
    executor: Arc<dyn CircuitSweepExecutor>,
    transformer: Arc<dyn CircuitTransformer>,
}

impl std::fmt::Debug for RigettiQcsSampler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigettiQcsSampler")
            .field("quantum_computer", &self.quantum_computer.name())
            .finish_non_exhaustive()
    }
}

impl<'qc> RigettiQcsSampler<'qc> {
    /// A sampler with the default executor and transformer.
    pub fn new(quantum_computer: &'qc QuantumComputer) -> Self {
        Self {
            quantum_computer,
            executor: Arc::new(WithQuilcCompilationAndParameterResolution),
            transformer: Arc::new(transformers::default()),
        }
    }

    /// Use a different executor.
    #[must_use]
    pub fn with_executor(mut self, executor: impl CircuitSweepExecutor + 'static) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Use a different transformer.
    #[must_use]
    pub fn with_transformer(mut self, transformer: impl CircuitTransformer + 'static) -> Self {
        self.transformer = Arc::new(transformer);
        self
    }

    pub(crate) fn from_parts(
        quantum_computer: &'qc QuantumComputer,
        executor: Arc<dyn CircuitSweepExecutor>,
        transformer: Arc<dyn CircuitTransformer>,
    ) -> Self {
        Self {
            quantum_computer,
            executor,
            transformer,
        }
    }

    /// The quantum computer this sampler runs on.
    pub fn quantum_computer(&self) -> &'qc QuantumComputer {
        self.quantum_computer
    }
}

impl Sampler for RigettiQcsSampler<'_> {
    #[instrument(skip_all, fields(qc = %self.quantum_computer.name(), repetitions = repetitions))]
    fn run_sweep(
        &self,
        circuit: &Circuit,
        params: &Sweepable,
        repetitions: u32,
    ) -> SamplerResult<Vec<StudyResult>> {
        let resolvers = to_resolvers(params)?;
        debug!("Sweeping {} resolvers", resolvers.len());
        self.executor.execute(
            self.quantum_computer,
            circuit,
            &resolvers,
            repetitions,
            self.transformer.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result() -> StudyResult {
        StudyResult::new(ParamResolver::new(), BTreeMap::new()).unwrap()
    }

    #[test]
    fn test_single_takes_the_only_result() {
        assert!(single(vec![result()]).is_ok());
    }

    #[test]
    fn test_single_rejects_other_counts() {
        assert!(matches!(
            single(vec![]),
            Err(SamplerError::UnexpectedResultCount { expected: 1, got: 0 })
        ));
        assert!(matches!(
            single(vec![result(), result()]),
            Err(SamplerError::UnexpectedResultCount { expected: 1, got: 2 })
        ));
    }
}
