//! Service facade: single runs, samplers and QCS API lookups.

use std::sync::Arc;

use tracing::instrument;

use qcs_circuit::{Circuit, ParamResolver, StudyResult};
use qcs_hal::{
    GetQuiltCalibrationsResponse, InstructionSetArchitecture, QcsClient, QcsClientConfiguration,
    QuantumComputer, QuantumProcessorSummary,
};

use crate::error::SamplerResult;
use crate::executors::{CircuitSweepExecutor, WithQuilcCompilationAndParameterResolution};
use crate::sampler::{RigettiQcsSampler, single};
use crate::transformers::{self, CircuitTransformer};

/// Runs circuits on a quantum computer and queries the QCS API.
pub struct RigettiQcsService<'qc> {
    quantum_computer: &'qc QuantumComputer,
    executor: Arc<dyn CircuitSweepExecutor>,
    transformer: Arc<dyn CircuitTransformer>,
    client_configuration: Option<QcsClientConfiguration>,
}

impl std::fmt::Debug for RigettiQcsService<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigettiQcsService")
            .field("quantum_computer", &self.quantum_computer.name())
            .field("client_configuration", &self.client_configuration)
            .finish_non_exhaustive()
    }
}

impl<'qc> RigettiQcsService<'qc> {
    /// A service with the default executor and transformer.
    ///
    /// API calls load the client configuration from the environment unless
    /// one is set with [`with_client_configuration`](Self::with_client_configuration).
    pub fn new(quantum_computer: &'qc QuantumComputer) -> Self {
        Self {
            quantum_computer,
            executor: Arc::new(WithQuilcCompilationAndParameterResolution),
            transformer: Arc::new(transformers::default()),
            client_configuration: None,
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

    /// Use an explicit QCS client configuration for API calls.
    #[must_use]
    pub fn with_client_configuration(mut self, configuration: QcsClientConfiguration) -> Self {
        self.client_configuration = Some(configuration);
        self
    }

    /// Run `circuit` once under `resolver`, `repetitions` times.
    ///
    /// Arguments follow [`Sampler::run`](crate::Sampler::run).
    #[instrument(skip_all, fields(qc = %self.quantum_computer.name(), repetitions = repetitions))]
    pub fn run(
        &self,
        circuit: &Circuit,
        resolver: &ParamResolver,
        repetitions: u32,
    ) -> SamplerResult<StudyResult> {
        let results = self.executor.execute(
            self.quantum_computer,
            circuit,
            std::slice::from_ref(resolver),
            repetitions,
            self.transformer.as_ref(),
        )?;
        single(results)
    }

    /// A sampler sharing this service's quantum computer, executor and
    /// transformer.
    pub fn sampler(&self) -> RigettiQcsSampler<'qc> {
        RigettiQcsSampler::from_parts(
            self.quantum_computer,
            Arc::clone(&self.executor),
            Arc::clone(&self.transformer),
        )
    }

    // -----------------------------------------------------------------------
    // QCS API
    // -----------------------------------------------------------------------

    fn client(&self) -> SamplerResult<QcsClient> {
        let client = match &self.client_configuration {
            Some(configuration) => QcsClient::from_configuration(configuration)?,
            None => QcsClient::from_configuration(&QcsClientConfiguration::load()?)?,
        };
        Ok(client)
    }

    /// List the available quantum processors.
    pub async fn list_quantum_processors(&self) -> SamplerResult<Vec<QuantumProcessorSummary>> {
        Ok(self.client()?.list_quantum_processors().await?)
    }

    /// Fetch the Quil-T calibrations of a processor.
    pub async fn get_quilt_calibrations(
        &self,
        quantum_processor_id: &str,
    ) -> SamplerResult<GetQuiltCalibrationsResponse> {
        Ok(self
            .client()?
            .get_quilt_calibrations(quantum_processor_id)
            .await?)
    }

    /// Fetch the instruction set architecture of a processor, including its
    /// native gates and topology.
    pub async fn get_instruction_set_architecture(
        &self,
        quantum_processor_id: &str,
    ) -> SamplerResult<InstructionSetArchitecture> {
        Ok(self
            .client()?
            .get_instruction_set_architecture(quantum_processor_id)
            .await?)
    }
}
