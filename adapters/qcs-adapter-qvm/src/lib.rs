//! Local QVM backend for Rigetti QCS programs.
//!
//! [`Qvm`] is a statevector [`Qam`](qcs_hal::Qam). [`get_qc`] pairs it
//! with a [`NativeCompiler`] for a named processor topology:
//!
//! | Name | Topology |
//! |------|----------|
//! | `9q-square`, `9q-square-qvm` | 3x3 grid, qubits 0..9 row-major |
//! | `Nq-qvm` | `N` fully connected qubits |
//!
//! ```rust
//! use qcs_adapter_qvm::get_qc;
//!
//! let qc = get_qc("9q-square", true).unwrap();
//! assert_eq!(qc.name(), "9q-square-qvm");
//! assert_eq!(qc.qubits().len(), 9);
//! ```

mod qvm;
mod statevector;

use std::sync::Arc;

use tracing::info;

use qcs_compiler::NativeCompiler;
use qcs_hal::{HalError, HalResult, QuantumComputer, QuantumProcessor};

pub use qvm::{DEFAULT_MAX_QUBITS, Qvm};

/// Resolve a quantum computer name to its processor topology.
pub fn processor_for(name: &str) -> HalResult<QuantumProcessor> {
    let base = name.strip_suffix("-qvm").unwrap_or(name);
    if base == "9q-square" {
        return Ok(QuantumProcessor::grid(base, 3, 3));
    }
    base.strip_suffix('q')
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .map(|n| QuantumProcessor::fully_connected(base, n))
        .ok_or_else(|| HalError::BackendUnavailable(format!("unknown quantum computer '{name}'")))
}

/// Get a quantum computer by name, backed by a fresh unseeded QVM.
///
/// Only QVM targets exist locally, so `as_qvm` must be `true`.
pub fn get_qc(name: &str, as_qvm: bool) -> HalResult<QuantumComputer> {
    if !as_qvm {
        return Err(HalError::Unsupported(format!(
            "'{name}' is only available as a QVM"
        )));
    }
    qvm_computer(name, Arc::new(Qvm::new()))
}

/// Build a quantum computer around a caller-owned QVM, e.g. a seeded one.
pub fn qvm_computer(name: &str, qvm: Arc<Qvm>) -> HalResult<QuantumComputer> {
    let processor = processor_for(name)?;
    let qc_name = format!("{}-qvm", processor.id());
    info!(
        "Created {} with {} qubits and {} edges",
        qc_name,
        processor.qubits().len(),
        processor.num_edges()
    );
    let compiler = NativeCompiler::new(processor.clone());
    Ok(QuantumComputer::new(
        qc_name,
        processor,
        qvm,
        Arc::new(compiler),
    ))
}
