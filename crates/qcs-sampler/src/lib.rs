//! Sample circuits over parameter sweeps on Rigetti QCS.
//!
//! [`RigettiQcsSampler`] normalizes a [`Sweepable`](qcs_circuit::Sweepable)
//! into resolvers and hands them, with the untouched circuit, to a
//! [`CircuitSweepExecutor`] in a single call. The executor decides how to
//! compile and run; a [`CircuitTransformer`] turns circuits into Quil.
//!
//! | Executor | Compiles | Binds parameters |
//! |----------|----------|------------------|
//! | [`WithQuilcCompilationAndParameterResolution`] (default) | per resolver | in the circuit |
//! | [`WithQuilcParametricCompilation`] | once | through memory |
//! | [`WithoutQuilcCompilation`] | never | in the circuit |
//!
//! Errors from the circuit model, compiler and QAM are passed through
//! unchanged inside [`SamplerError`].
//!
//! # Example
//!
//! ```rust
//! use qcs_adapter_qvm::get_qc;
//! use qcs_circuit::{Circuit, Qubit, Sweep};
//! use qcs_sampler::{RigettiQcsSampler, Sampler};
//!
//! let qc = get_qc("9q-square", true).unwrap();
//! let circuit = Circuit::parametric_flip(Qubit::grid(1, 1), "t", "m").unwrap();
//! let sampler = RigettiQcsSampler::new(&qc);
//!
//! let results = sampler
//!     .run_sweep(&circuit, &Sweep::linspace("t", 0.0, 2.0, 5).into(), 10)
//!     .unwrap();
//! assert_eq!(results.len(), 5);
//! assert_eq!(results[2].measurement("m").unwrap().dim(), (10, 1));
//! ```

pub mod error;
pub mod executors;
pub mod sampler;
pub mod service;
pub mod transformers;

pub use error::{SamplerError, SamplerResult};
pub use executors::{
    CircuitSweepExecutor, WithQuilcCompilationAndParameterResolution,
    WithQuilcParametricCompilation, WithoutQuilcCompilation,
};
pub use sampler::{RigettiQcsSampler, Sampler};
pub use service::RigettiQcsService;
pub use transformers::{ActiveReset, CircuitTransformer, PostTransformationHook, Transformer};
