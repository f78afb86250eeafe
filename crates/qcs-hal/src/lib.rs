//! Hardware abstraction for Rigetti QCS.
//!
//! This crate defines what a sampler talks to:
//!
//! - [`Qam`]: a quantum abstract machine that runs [`Executable`]s and
//!   returns [`QamExecutionResult`]s
//! - [`Compiler`]: turns Quil into native Quil and executables
//! - [`QuantumComputer`]: a named QAM and compiler bound to a
//!   [`QuantumProcessor`] topology
//! - [`QcsClientConfiguration`] and [`QcsClient`]: settings files and the
//!   QCS REST API
//!
//! Execution is synchronous. Only the REST client is async.

pub mod api;
pub mod compiler;
pub mod computer;
pub mod config;
pub mod error;
pub mod executable;
pub mod job;
pub mod processor;
pub mod qam;
pub mod result;

pub use api::{
    GetQuiltCalibrationsResponse, InstructionSetArchitecture, QcsClient, QuantumProcessorSummary,
};
pub use compiler::Compiler;
pub use computer::QuantumComputer;
pub use config::QcsClientConfiguration;
pub use error::{HalError, HalResult};
pub use executable::Executable;
pub use job::JobId;
pub use processor::QuantumProcessor;
pub use qam::Qam;
pub use result::QamExecutionResult;
