//! Classical memory declarations and references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of a declared memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// Single bits, used for readout.
    Bit,
    /// Floating point values, used for gate parameters.
    Real,
    /// Signed integers.
    Integer,
    /// Bytes.
    Octet,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScalarType::Bit => "BIT",
            ScalarType::Real => "REAL",
            ScalarType::Integer => "INTEGER",
            ScalarType::Octet => "OCTET",
        };
        f.write_str(s)
    }
}

/// `DECLARE name TYPE[size]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Region name.
    pub name: String,
    /// Element type.
    pub scalar_type: ScalarType,
    /// Number of elements.
    pub size: u64,
}

impl Declaration {
    /// Create a declaration.
    pub fn new(name: impl Into<String>, scalar_type: ScalarType, size: u64) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            size,
        }
    }

    /// A readout region of `size` bits.
    pub fn bits(name: impl Into<String>, size: u64) -> Self {
        Self::new(name, ScalarType::Bit, size)
    }

    /// A single real-valued parameter.
    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, ScalarType::Real, 1)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {} {}[{}]", self.name, self.scalar_type, self.size)
    }
}

/// `name[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryReference {
    /// Region name.
    pub name: String,
    /// Element index.
    pub index: u64,
}

impl MemoryReference {
    /// Create a memory reference.
    pub fn new(name: impl Into<String>, index: u64) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for MemoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}
