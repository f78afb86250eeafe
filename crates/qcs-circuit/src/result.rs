//! Per-resolver sampling results.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::resolver::ParamResolver;

/// Widest measurement whose rows fit in a `u64` outcome.
const MAX_OUTCOME_BITS: usize = u64::BITS as usize;

/// The outcome of sampling a circuit under one resolver.
///
/// Each measurement key maps to a `(repetitions, qubits)` array of bits.
/// Rows are repetitions; columns follow the qubit order of the measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResult {
    params: ParamResolver,
    measurements: BTreeMap<String, Array2<u8>>,
}

impl StudyResult {
    /// Build a result, checking that all arrays share one repetition count.
    pub fn new(
        params: ParamResolver,
        measurements: BTreeMap<String, Array2<u8>>,
    ) -> IrResult<Self> {
        let mut expected: Option<usize> = None;
        for (key, bits) in &measurements {
            let rows = bits.nrows();
            match expected {
                None => expected = Some(rows),
                Some(e) if e != rows => {
                    return Err(IrError::InconsistentRepetitions {
                        key: key.clone(),
                        expected: e,
                        got: rows,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            params,
            measurements,
        })
    }

    /// The resolver this result was produced under.
    pub fn params(&self) -> &ParamResolver {
        &self.params
    }

    /// All measurement arrays by key.
    pub fn measurements(&self) -> &BTreeMap<String, Array2<u8>> {
        &self.measurements
    }

    /// The measurement array for `key`.
    pub fn measurement(&self, key: &str) -> Option<&Array2<u8>> {
        self.measurements.get(key)
    }

    /// Number of repetitions, or 0 when nothing was measured.
    pub fn repetitions(&self) -> usize {
        self.measurements.values().next().map_or(0, Array2::nrows)
    }

    /// Count how often each outcome of `key` occurred.
    ///
    /// Each row is read as a big-endian integer, so the first measured qubit
    /// is the most significant bit. Keys spanning more than 64 qubits are
    /// rejected.
    pub fn histogram(&self, key: &str) -> IrResult<BTreeMap<u64, usize>> {
        let bits = self
            .measurements
            .get(key)
            .ok_or_else(|| IrError::UnknownMeasurementKey(key.to_string()))?;
        if bits.ncols() > MAX_OUTCOME_BITS {
            return Err(IrError::MeasurementTooWide {
                key: key.to_string(),
                qubits: bits.ncols(),
                max: MAX_OUTCOME_BITS,
            });
        }
        let mut counts = BTreeMap::new();
        for row in bits.rows() {
            let value = row
                .iter()
                .fold(0u64, |acc, &b| (acc << 1) | u64::from(b & 1));
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
