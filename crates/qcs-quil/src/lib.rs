//! Quil program model.
//!
//! [`Program`] is an ordered list of [`Instruction`]s (declarations, gates,
//! measurements, resets and pragmas) plus the number of shots to run.
//! Programs render as Quil text through `Display`.
//!
//! [`QuilOutput`] converts circuit operations into a program, given a
//! [`QubitIdMap`] and a [`MeasurementIdMap`].
//!
//! ```rust
//! use qcs_circuit::{Circuit, Qubit};
//! use qcs_quil::{QuilOutput, default_measurement_id_map, default_qubit_id_map};
//!
//! let circuit = Circuit::bell(Qubit::line(0), Qubit::line(1), "m").unwrap();
//! let qubits = default_qubit_id_map(&circuit.all_qubits());
//! let keys = default_measurement_id_map(&circuit);
//! let program = QuilOutput::new(circuit.all_operations(), &qubits, &keys)
//!     .to_program()
//!     .unwrap();
//! assert!(program.to_string().starts_with("DECLARE m0 BIT[2]\nH 0\nCNOT 0 1\n"));
//! ```

pub mod error;
pub mod expression;
pub mod gate;
pub mod instruction;
pub mod memory;
pub mod output;
pub mod program;

pub use error::{QuilError, QuilResult};
pub use expression::format_expression;
pub use gate::{QuilGate, is_native_rx_angle};
pub use instruction::Instruction;
pub use memory::{Declaration, MemoryReference, ScalarType};
pub use output::{
    MeasurementIdMap, QubitIdMap, QuilOutput, default_measurement_id_map, default_qubit_id_map,
    gate_to_quil,
};
pub use program::Program;
