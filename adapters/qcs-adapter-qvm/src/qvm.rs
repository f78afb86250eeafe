//! The QVM: a [`Qam`] that simulates Quil programs shot by shot.

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};

use qcs_circuit::{IrError, ParamResolver};
use qcs_hal::{Executable, HalError, HalResult, JobId, Qam, QamExecutionResult};
use qcs_quil::{Instruction, ScalarType};

use crate::statevector::Statevector;

/// Default cap on simulated qubits.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Local statevector QVM.
///
/// Each shot starts from |0...0⟩ over the qubits the program touches.
/// Measurements sample and collapse the state. Gate parameters read
/// classical memory: a symbol `t` is `t[0]` in the executable.
///
/// A seeded QVM restarts its random stream at the seed for every run, so
/// equal programs give equal readout. Results are kept until collected with
/// [`Qam::get_result`].
pub struct Qvm {
    name: String,
    max_qubits: usize,
    random_seed: Mutex<Option<u64>>,
    jobs: Mutex<FxHashMap<String, QamExecutionResult>>,
}

impl Qvm {
    /// Create an unseeded QVM.
    pub fn new() -> Self {
        Self {
            name: "qvm".into(),
            max_qubits: DEFAULT_MAX_QUBITS,
            random_seed: Mutex::new(None),
            jobs: Mutex::new(FxHashMap::default()),
        }
    }

    /// Seed every run.
    #[must_use]
    pub fn with_random_seed(self, seed: u64) -> Self {
        self.set_random_seed(seed);
        self
    }

    /// Cap the number of simulated qubits.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Seed every later run.
    pub fn set_random_seed(&self, seed: u64) {
        *self
            .random_seed
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(seed);
    }

    /// The seed runs start from, if any.
    pub fn random_seed(&self) -> Option<u64> {
        *self
            .random_seed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn rng(&self) -> StdRng {
        match self.random_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Simulate every shot of `executable`.
    #[instrument(skip(self, executable), fields(shots = executable.num_shots()))]
    fn simulate(&self, executable: &Executable) -> HalResult<QamExecutionResult> {
        let start = Instant::now();
        let program = executable.program();
        let shots = executable.num_shots();
        if shots == 0 {
            return Err(HalError::InvalidShots(
                "programs must run at least one shot".into(),
            ));
        }

        // Physical address -> local index.
        let local: BTreeMap<u64, usize> = program
            .qubits()
            .into_iter()
            .enumerate()
            .map(|(i, q)| (q, i))
            .collect();
        if local.len() > self.max_qubits {
            return Err(HalError::InvalidProgram(format!(
                "program uses {} qubits but the QVM supports {}",
                local.len(),
                self.max_qubits
            )));
        }

        let memory = memory_resolver(executable);
        let steps = plan(program.instructions(), &local, &memory)?;

        let mut readout: FxHashMap<String, Array2<u8>> = program
            .regions_of(ScalarType::Bit)
            .map(|d| (d.name.clone(), Array2::zeros((shots as usize, d.size as usize))))
            .collect();
        for step in &steps {
            if let Step::Measure {
                target: Some((region, index)),
                ..
            } = step
            {
                let in_bounds = readout.get(region).is_some_and(|a| *index < a.ncols());
                if !in_bounds {
                    return Err(HalError::InvalidProgram(format!(
                        "measurement target {region}[{index}] is not a declared BIT"
                    )));
                }
            }
        }

        debug!(
            "Simulating {} steps on {} qubits for {} shots",
            steps.len(),
            local.len(),
            shots
        );

        let mut rng = self.rng();
        for shot in 0..shots as usize {
            let mut sv = Statevector::new(local.len());
            for step in &steps {
                match step {
                    Step::Gate {
                        gate,
                        angle,
                        qubits,
                    } => sv.apply_gate(gate, *angle, qubits),
                    Step::Measure { qubit, target } => {
                        let bit = sv.measure(*qubit, &mut rng);
                        if let Some((region, index)) = target {
                            if let Some(array) = readout.get_mut(region) {
                                array[[shot, *index]] = bit;
                            }
                        }
                    }
                    Step::Reset(Some(qubit)) => sv.reset(*qubit, &mut rng),
                    Step::Reset(None) => {
                        for qubit in 0..sv.num_qubits() {
                            sv.reset(qubit, &mut rng);
                        }
                    }
                }
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);
        Ok(QamExecutionResult::new(readout).with_duration(elapsed))
    }
}

impl Default for Qvm {
    fn default() -> Self {
        Self::new()
    }
}

impl Qam for Qvm {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, executable: &Executable) -> HalResult<JobId> {
        let result = self.simulate(executable)?;
        let job_id = JobId::generate();
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id.0.clone(), result);
        debug!("Completed job: {}", job_id);
        Ok(job_id)
    }

    fn get_result(&self, job_id: &JobId) -> HalResult<QamExecutionResult> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

/// A program instruction with parameters evaluated and qubits localized.
enum Step {
    Gate {
        gate: qcs_quil::QuilGate,
        angle: Option<f64>,
        qubits: Vec<usize>,
    },
    Measure {
        qubit: usize,
        target: Option<(String, usize)>,
    },
    Reset(Option<usize>),
}

/// Each memory region's first element, keyed by region name.
fn memory_resolver(executable: &Executable) -> ParamResolver {
    executable
        .memory_map()
        .iter()
        .filter_map(|(name, values)| values.first().map(|v| (name.clone(), *v)))
        .collect()
}

fn plan(
    instructions: &[Instruction],
    local: &BTreeMap<u64, usize>,
    memory: &ParamResolver,
) -> HalResult<Vec<Step>> {
    // Every address in the program is in `local`.
    let at = |q: &u64| local[q];
    let mut steps = Vec::with_capacity(instructions.len());
    for instruction in instructions {
        let step = match instruction {
            Instruction::Gate { gate, qubits } => {
                let angle = gate
                    .parameter()
                    .map(|p| p.evaluate(memory))
                    .transpose()
                    .map_err(|e| match e {
                        IrError::UnboundParameter(name) => HalError::MissingMemory(name),
                        other => HalError::InvalidProgram(other.to_string()),
                    })?;
                Step::Gate {
                    gate: gate.clone(),
                    angle,
                    qubits: qubits.iter().map(at).collect(),
                }
            }
            Instruction::Measure { qubit, target } => Step::Measure {
                qubit: at(qubit),
                target: target
                    .as_ref()
                    .map(|t| (t.name.clone(), t.index as usize)),
            },
            Instruction::Reset(qubit) => Step::Reset(qubit.as_ref().map(at)),
            Instruction::Declare(_) | Instruction::Pragma { .. } => continue,
        };
        steps.push(step);
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcs_circuit::ParameterExpression;
    use qcs_quil::{Declaration, Program, QuilGate};

    fn flip_program(shots: u32) -> Program {
        let mut p = Program::new();
        p.declare(Declaration::bits("ro", 1)).unwrap();
        p.push(Instruction::gate(QuilGate::X, [5]).unwrap());
        p.push(Instruction::measure(5, "ro", 0));
        p.wrap_in_numshots_loop(shots);
        p
    }

    #[test]
    fn test_x_reads_one_every_shot() {
        let qvm = Qvm::new().with_random_seed(0);
        let result = qvm.run(&Executable::new(flip_program(4))).unwrap();
        let ro = result.readout("ro").unwrap();
        assert_eq!(ro.dim(), (4, 1));
        assert!(ro.iter().all(|&b| b == 1));
        assert!(result.execution_duration().is_some());
    }

    fn half_flip_program(angle: ParameterExpression, shots: u32) -> Program {
        let mut p = Program::new();
        p.declare(Declaration::bits("ro", 1)).unwrap();
        p.push(Instruction::gate(QuilGate::Rx(angle), [0]).unwrap());
        p.push(Instruction::measure(0, "ro", 0));
        p.wrap_in_numshots_loop(shots);
        p
    }

    #[test]
    fn test_seeded_runs_restart_the_stream() {
        let qvm = Qvm::new().with_random_seed(0);
        let half = ParameterExpression::pi() / ParameterExpression::constant(2.0);
        let exe = Executable::new(half_flip_program(half, 10));
        let first = qvm.run(&exe).unwrap().readout("ro").unwrap().clone();
        let second = qvm.run(&exe).unwrap().readout("ro").unwrap().clone();
        assert_eq!(first, second);
        // StdRng seeded with 0 draws three values below 0.5 first.
        assert_eq!(first.iter().filter(|&&b| b == 1).count(), 3);
    }

    #[test]
    fn test_equal_probabilities_give_equal_readout() {
        let qvm = Qvm::new().with_random_seed(10);
        let rx_half_pi = ParameterExpression::pi() / ParameterExpression::constant(2.0);
        let rx_three_half_pi =
            ParameterExpression::constant(3.0) * ParameterExpression::pi()
                / ParameterExpression::constant(2.0);
        let a = qvm
            .run(&Executable::new(half_flip_program(rx_half_pi, 10)))
            .unwrap();
        let b = qvm
            .run(&Executable::new(half_flip_program(rx_three_half_pi, 10)))
            .unwrap();
        assert_eq!(a.readout("ro"), b.readout("ro"));
    }

    #[test]
    fn test_reseeding_applies_to_later_runs() {
        let qvm = Qvm::new();
        assert_eq!(qvm.random_seed(), None);
        qvm.set_random_seed(10);
        assert_eq!(qvm.random_seed(), Some(10));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let qvm = Qvm::new();
        let err = qvm.execute(&Executable::new(flip_program(0))).unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[test]
    fn test_parameters_read_memory() {
        let mut p = Program::new();
        p.declare(Declaration::bits("ro", 1)).unwrap();
        p.declare(Declaration::real("theta")).unwrap();
        let theta = ParameterExpression::pi() * ParameterExpression::symbol("theta");
        p.push(Instruction::gate(QuilGate::Rx(theta), [0]).unwrap());
        p.push(Instruction::measure(0, "ro", 0));
        p.wrap_in_numshots_loop(3);

        let qvm = Qvm::new().with_random_seed(3);
        let mut exe = Executable::new(p.clone());
        exe.write_memory("theta", [1.0]);
        let ro = qvm.run(&exe).unwrap().readout("ro").unwrap().clone();
        assert!(ro.iter().all(|&b| b == 1));

        let err = qvm.run(&Executable::new(p)).unwrap_err();
        assert!(matches!(err, HalError::MissingMemory(name) if name == "theta"));
    }

    #[test]
    fn test_undeclared_target_rejected() {
        let mut p = Program::from_instructions([Instruction::measure(0, "ro", 0)]);
        p.wrap_in_numshots_loop(1);
        let err = Qvm::new().run(&Executable::new(p)).unwrap_err();
        assert!(matches!(err, HalError::InvalidProgram(_)));
    }

    #[test]
    fn test_results_are_collected_once() {
        let qvm = Qvm::new();
        let job = qvm.execute(&Executable::new(flip_program(1))).unwrap();
        assert!(qvm.get_result(&job).is_ok());
        assert!(matches!(qvm.get_result(&job), Err(HalError::JobNotFound(_))));
    }

    #[test]
    fn test_too_many_qubits() {
        let qvm = Qvm::new().with_max_qubits(0);
        let err = qvm.run(&Executable::new(flip_program(1))).unwrap_err();
        assert!(matches!(err, HalError::InvalidProgram(_)));
    }
}
