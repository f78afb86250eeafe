//! Circuit to Quil program transformers.

use std::sync::Arc;

use tracing::debug;

use qcs_circuit::{Circuit, Qubit};
use qcs_quil::{
    Instruction, MeasurementIdMap, Program, QubitIdMap, QuilOutput, default_measurement_id_map,
    default_qubit_id_map,
};

use crate::error::SamplerResult;

/// Converts a circuit into a Quil program.
///
/// The returned [`MeasurementIdMap`] says which memory region holds each
/// measurement key's bits.
pub trait CircuitTransformer: Send + Sync {
    /// Transform `circuit`.
    fn transform(&self, circuit: &Circuit) -> SamplerResult<(Program, MeasurementIdMap)>;
}

impl<F> CircuitTransformer for F
where
    F: Fn(&Circuit) -> SamplerResult<(Program, MeasurementIdMap)> + Send + Sync,
{
    fn transform(&self, circuit: &Circuit) -> SamplerResult<(Program, MeasurementIdMap)> {
        self(circuit)
    }
}

/// Rewrites a freshly transformed program, e.g. to add a preamble.
pub trait PostTransformationHook: Send + Sync {
    /// Apply the hook.
    fn apply(
        &self,
        program: Program,
        measurement_id_map: MeasurementIdMap,
    ) -> SamplerResult<(Program, MeasurementIdMap)>;
}

impl<F> PostTransformationHook for F
where
    F: Fn(Program, MeasurementIdMap) -> SamplerResult<(Program, MeasurementIdMap)> + Send + Sync,
{
    fn apply(
        &self,
        program: Program,
        measurement_id_map: MeasurementIdMap,
    ) -> SamplerResult<(Program, MeasurementIdMap)> {
        self(program, measurement_id_map)
    }
}

/// Prepends a global `RESET` so every shot starts from the ground state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveReset;

impl PostTransformationHook for ActiveReset {
    fn apply(
        &self,
        mut program: Program,
        measurement_id_map: MeasurementIdMap,
    ) -> SamplerResult<(Program, MeasurementIdMap)> {
        program.prepend(Instruction::Reset(None));
        Ok((program, measurement_id_map))
    }
}

/// A configurable transformer, made with [`build`].
#[derive(Clone, Default)]
pub struct Transformer {
    qubits: Option<Vec<Qubit>>,
    qubit_id_map: Option<QubitIdMap>,
    hooks: Vec<Arc<dyn PostTransformationHook>>,
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("qubits", &self.qubits)
            .field("qubit_id_map", &self.qubit_id_map)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Transformer {
    /// Fix the qubit order used to assign addresses `0..n`.
    ///
    /// Ignored when an explicit qubit id map is set.
    #[must_use]
    pub fn with_qubits(mut self, qubits: impl IntoIterator<Item = Qubit>) -> Self {
        self.qubits = Some(qubits.into_iter().collect());
        self
    }

    /// Map circuit qubits to explicit physical addresses.
    #[must_use]
    pub fn with_qubit_id_map(mut self, qubit_id_map: QubitIdMap) -> Self {
        self.qubit_id_map = Some(qubit_id_map);
        self
    }

    /// Append a hook; hooks run in the order they were added.
    #[must_use]
    pub fn with_hook(mut self, hook: impl PostTransformationHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    fn qubit_id_map_for(&self, circuit: &Circuit) -> QubitIdMap {
        match (&self.qubit_id_map, &self.qubits) {
            (Some(map), _) => map.clone(),
            (None, Some(qubits)) => qubits
                .iter()
                .enumerate()
                .map(|(i, q)| (q.clone(), i as u64))
                .collect(),
            (None, None) => default_qubit_id_map(&circuit.all_qubits()),
        }
    }
}

impl CircuitTransformer for Transformer {
    fn transform(&self, circuit: &Circuit) -> SamplerResult<(Program, MeasurementIdMap)> {
        let qubit_id_map = self.qubit_id_map_for(circuit);
        let measurement_id_map = default_measurement_id_map(circuit);
        let program =
            QuilOutput::new(circuit.all_operations(), &qubit_id_map, &measurement_id_map)
                .to_program()?;
        debug!(
            "Transformed circuit into {} instructions",
            program.instructions().len()
        );

        self.hooks
            .iter()
            .try_fold((program, measurement_id_map), |(program, map), hook| {
                hook.apply(program, map)
            })
    }
}

/// Start configuring a transformer.
pub fn build() -> Transformer {
    Transformer::default()
}

/// The default transformer: sorted qubits on addresses `0..n`, no hooks.
pub fn default() -> Transformer {
    build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transformer_on_resolved_circuit() {
        let circuit = Circuit::parametric_flip(Qubit::grid(1, 1), "t", "m")
            .unwrap()
            .resolve_parameters(&qcs_circuit::ParamResolver::new().with("t", 0.5));
        let (program, map) = default().transform(&circuit).unwrap();
        let text = program.to_string();

        assert!(text.contains("RX(pi/2) 0\n"));
        assert!(text.contains("DECLARE m0 BIT[1]\n"));
        assert!(text.contains("MEASURE 0 m0[0]\n"));
        assert_eq!(map.get("m").map(String::as_str), Some("m0"));
    }

    #[test]
    fn test_explicit_qubit_order() {
        let (a, b) = (Qubit::line(0), Qubit::line(1));
        let circuit = Circuit::bell(a.clone(), b.clone(), "m").unwrap();
        let (program, _) = build().with_qubits([b, a]).transform(&circuit).unwrap();
        assert!(program.to_string().contains("CNOT 1 0\n"));
    }

    #[test]
    fn test_active_reset_hook() {
        let circuit = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
        let (program, _) = build().with_hook(ActiveReset).transform(&circuit).unwrap();
        assert!(matches!(program.instructions()[0], Instruction::Reset(None)));
    }

    #[test]
    fn test_closure_transformer() {
        let fixed = |_: &Circuit| -> SamplerResult<(Program, MeasurementIdMap)> {
            Ok((Program::new(), MeasurementIdMap::new()))
        };
        let circuit = Circuit::new();
        let (program, map) = fixed.transform(&circuit).unwrap();
        assert!(program.instructions().is_empty());
        assert!(map.is_empty());
    }
}
