//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qubit addressed by its position on a line, on a grid, or by name.
///
/// Qubits are totally ordered: line qubits sort before grid qubits, which
/// sort before named qubits. Within a kind, ordering follows the coordinates
/// (row-major for grid qubits) or the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Qubit {
    /// A qubit at an integer position on a line.
    Line(i32),
    /// A qubit at a row/column position on a grid.
    Grid {
        /// Row coordinate.
        row: i32,
        /// Column coordinate.
        col: i32,
    },
    /// A qubit identified only by name.
    Named(String),
}

impl Qubit {
    /// Create a line qubit.
    pub fn line(x: i32) -> Self {
        Qubit::Line(x)
    }

    /// Create `count` consecutive line qubits starting at 0.
    pub fn line_range(count: i32) -> Vec<Self> {
        (0..count).map(Qubit::Line).collect()
    }

    /// Create a grid qubit.
    pub fn grid(row: i32, col: i32) -> Self {
        Qubit::Grid { row, col }
    }

    /// Create a named qubit.
    pub fn named(name: impl Into<String>) -> Self {
        Qubit::Named(name.into())
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qubit::Line(x) => write!(f, "q({x})"),
            Qubit::Grid { row, col } => write!(f, "q({row}, {col})"),
            Qubit::Named(name) => write!(f, "{name}"),
        }
    }
}
