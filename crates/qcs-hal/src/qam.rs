//! The quantum abstract machine trait.

use crate::error::HalResult;
use crate::executable::Executable;
use crate::job::JobId;
use crate::result::QamExecutionResult;

/// A machine that runs executables and returns readout data.
///
/// Execution is synchronous from the caller's point of view: `execute`
/// queues work and `get_result` blocks until it is available.
pub trait Qam: Send + Sync {
    /// Name of this QAM.
    fn name(&self) -> &str;

    /// Start running an executable.
    fn execute(&self, executable: &Executable) -> HalResult<JobId>;

    /// Collect the result of a previous `execute`. Each job's result can be
    /// collected once.
    fn get_result(&self, job_id: &JobId) -> HalResult<QamExecutionResult>;

    /// Execute and wait for the result.
    fn run(&self, executable: &Executable) -> HalResult<QamExecutionResult> {
        let job_id = self.execute(executable)?;
        self.get_result(&job_id)
    }
}
