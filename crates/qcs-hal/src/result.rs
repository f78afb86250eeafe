//! Raw results returned by a QAM.

use std::time::Duration;

use ndarray::Array2;
use rustc_hash::FxHashMap;

/// Readout data of one execution.
///
/// Each `BIT` region of the program maps to a `(shots, region size)` array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QamExecutionResult {
    readout_data: FxHashMap<String, Array2<u8>>,
    execution_duration: Option<Duration>,
}

impl QamExecutionResult {
    /// Create a result from readout arrays.
    pub fn new(readout_data: FxHashMap<String, Array2<u8>>) -> Self {
        Self {
            readout_data,
            execution_duration: None,
        }
    }

    /// Attach the wall-clock execution time.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.execution_duration = Some(duration);
        self
    }

    /// The readout array of `region`.
    pub fn readout(&self, region: &str) -> Option<&Array2<u8>> {
        self.readout_data.get(region)
    }

    /// All readout arrays.
    pub fn readout_data(&self) -> &FxHashMap<String, Array2<u8>> {
        &self.readout_data
    }

    /// Time spent executing, if measured.
    pub fn execution_duration(&self) -> Option<Duration> {
        self.execution_duration
    }
}
