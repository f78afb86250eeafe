//! Sweep executors: how a circuit is compiled and run for each resolver.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use qcs_circuit::{Circuit, ParamResolver, StudyResult};
use qcs_hal::{Executable, QuantumComputer};
use qcs_quil::{Declaration, MeasurementIdMap};

use crate::error::{SamplerError, SamplerResult};
use crate::transformers::CircuitTransformer;

/// Runs a circuit on a quantum computer once per resolver.
///
/// Implementations return exactly one result per resolver, in resolver
/// order, each carrying the resolver it was produced with.
pub trait CircuitSweepExecutor: Send + Sync {
    /// Execute `circuit` for every resolver in `resolvers`.
    fn execute(
        &self,
        quantum_computer: &QuantumComputer,
        circuit: &Circuit,
        resolvers: &[ParamResolver],
        repetitions: u32,
        transformer: &dyn CircuitTransformer,
    ) -> SamplerResult<Vec<StudyResult>>;
}

impl<F> CircuitSweepExecutor for F
where
    F: Fn(
            &QuantumComputer,
            &Circuit,
            &[ParamResolver],
            u32,
            &dyn CircuitTransformer,
        ) -> SamplerResult<Vec<StudyResult>>
        + Send
        + Sync,
{
    fn execute(
        &self,
        quantum_computer: &QuantumComputer,
        circuit: &Circuit,
        resolvers: &[ParamResolver],
        repetitions: u32,
        transformer: &dyn CircuitTransformer,
    ) -> SamplerResult<Vec<StudyResult>> {
        self(quantum_computer, circuit, resolvers, repetitions, transformer)
    }
}

/// Run an executable and package its readout as a result for `resolver`.
fn execute_and_read_result(
    quantum_computer: &QuantumComputer,
    executable: &Executable,
    measurement_id_map: &MeasurementIdMap,
    resolver: &ParamResolver,
) -> SamplerResult<StudyResult> {
    let qam_result = quantum_computer.run(executable)?;
    let mut measurements = BTreeMap::new();
    for (key, region) in measurement_id_map {
        let bits = qam_result
            .readout(region)
            .ok_or_else(|| SamplerError::MissingMeasurement {
                key: key.clone(),
                region: region.clone(),
            })?;
        measurements.insert(key.clone(), bits.clone());
    }
    Ok(StudyResult::new(resolver.clone(), measurements)?)
}

// ============================================================================
// Executors
// ============================================================================

/// Resolve parameters in the circuit, then compile and run, once per
/// resolver. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithQuilcCompilationAndParameterResolution;

impl CircuitSweepExecutor for WithQuilcCompilationAndParameterResolution {
    #[instrument(skip_all, fields(qc = %quantum_computer.name(), points = resolvers.len(), repetitions = repetitions))]
    fn execute(
        &self,
        quantum_computer: &QuantumComputer,
        circuit: &Circuit,
        resolvers: &[ParamResolver],
        repetitions: u32,
        transformer: &dyn CircuitTransformer,
    ) -> SamplerResult<Vec<StudyResult>> {
        let mut results = Vec::with_capacity(resolvers.len());
        for resolver in resolvers {
            let resolved = circuit.resolve_parameters(resolver);
            let (mut program, measurement_id_map) = transformer.transform(&resolved)?;
            program.wrap_in_numshots_loop(repetitions);
            let executable = quantum_computer.compile(&program)?;
            debug!("Running point {}", resolver);
            results.push(execute_and_read_result(
                quantum_computer,
                &executable,
                &measurement_id_map,
                resolver,
            )?);
        }
        Ok(results)
    }
}

/// Compile the symbolic circuit once, then bind each resolver through
/// executable memory.
///
/// Every resolver key is declared as a `REAL[1]` region of the same name.
/// Each point runs against a fresh copy of the compiled executable, so
/// values never leak from one point to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithQuilcParametricCompilation;

impl CircuitSweepExecutor for WithQuilcParametricCompilation {
    #[instrument(skip_all, fields(qc = %quantum_computer.name(), points = resolvers.len(), repetitions = repetitions))]
    fn execute(
        &self,
        quantum_computer: &QuantumComputer,
        circuit: &Circuit,
        resolvers: &[ParamResolver],
        repetitions: u32,
        transformer: &dyn CircuitTransformer,
    ) -> SamplerResult<Vec<StudyResult>> {
        let (mut program, measurement_id_map) = transformer.transform(circuit)?;
        let keys: BTreeSet<&str> = resolvers.iter().flat_map(|r| r.keys()).collect();
        for key in &keys {
            program.declare(Declaration::real(*key))?;
        }
        program.wrap_in_numshots_loop(repetitions);
        let executable = quantum_computer.compile(&program)?;
        debug!("Compiled once with {} parameter regions", keys.len());

        let mut results = Vec::with_capacity(resolvers.len());
        for resolver in resolvers {
            let mut bound = executable.clone();
            for (key, value) in resolver.iter() {
                bound.write_memory(key, [value]);
            }
            results.push(execute_and_read_result(
                quantum_computer,
                &bound,
                &measurement_id_map,
                resolver,
            )?);
        }
        Ok(results)
    }
}

/// Treat the transformed program as native Quil: package it as an
/// executable directly, once per resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithoutQuilcCompilation;

impl CircuitSweepExecutor for WithoutQuilcCompilation {
    #[instrument(skip_all, fields(qc = %quantum_computer.name(), points = resolvers.len(), repetitions = repetitions))]
    fn execute(
        &self,
        quantum_computer: &QuantumComputer,
        circuit: &Circuit,
        resolvers: &[ParamResolver],
        repetitions: u32,
        transformer: &dyn CircuitTransformer,
    ) -> SamplerResult<Vec<StudyResult>> {
        let mut results = Vec::with_capacity(resolvers.len());
        for resolver in resolvers {
            let resolved = circuit.resolve_parameters(resolver);
            let (mut program, measurement_id_map) = transformer.transform(&resolved)?;
            program.wrap_in_numshots_loop(repetitions);
            let executable = quantum_computer
                .compiler()
                .native_quil_to_executable(&program)?;
            results.push(execute_and_read_result(
                quantum_computer,
                &executable,
                &measurement_id_map,
                resolver,
            )?);
        }
        Ok(results)
    }
}
