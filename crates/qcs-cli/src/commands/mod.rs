//! CLI command implementations.

pub mod common;
pub mod isa;
pub mod processors;
pub mod sweep;
