//! Circuit model for QCS sampling.
//!
//! This crate holds everything a sampler needs to describe *what* to run:
//!
//! - **Qubits**: [`Qubit`] addressed on a line, on a grid, or by name
//! - **Gates**: [`Gate`], including Pauli powers with symbolic exponents
//! - **Parameters**: [`ParameterExpression`] for symbolic angles and exponents
//! - **Circuits**: [`Circuit`] built from [`Operation`]s grouped into [`Moment`]s
//! - **Resolvers and sweeps**: [`ParamResolver`], [`Sweep`], [`Sweepable`] and
//!   [`to_resolvers`], which turns any sweepable into an ordered resolver list
//! - **Results**: [`StudyResult`], one per resolver, holding bit arrays of
//!   shape `(repetitions, qubits)` per measurement key
//!
//! # Example
//!
//! ```rust
//! use qcs_circuit::{Circuit, Qubit, Sweep, Sweepable, to_resolvers};
//!
//! let circuit = Circuit::parametric_flip(Qubit::grid(1, 1), "t", "m").unwrap();
//! assert!(circuit.is_parameterized());
//!
//! let sweep: Sweepable = Sweep::linspace("t", 0.0, 2.0, 5).into();
//! let resolvers = to_resolvers(&sweep).unwrap();
//! assert_eq!(resolvers.len(), 5);
//! assert_eq!(resolvers[2].get("t"), Some(1.0));
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod parameter;
pub mod qubit;
pub mod resolver;
pub mod result;
pub mod sweep;

pub use circuit::{Circuit, Moment};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use operation::{Operation, OperationKind};
pub use parameter::ParameterExpression;
pub use qubit::Qubit;
pub use resolver::ParamResolver;
pub use result::StudyResult;
pub use sweep::{Sweep, Sweepable, to_resolvers};
