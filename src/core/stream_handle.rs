use std::sync::Arc;

use spin::Mutex;

use super::{DriveOutcome, GraphInterpreter, StageId, StageState, StreamError, StreamState};

/// Shared handle driving one materialized run.
///
/// Cloneable and sendable; all access funnels through one lock, so drives
/// from different threads serialize.
#[derive(Clone)]
pub struct StreamHandle {
  inner: Arc<Mutex<GraphInterpreter>>,
}

impl StreamHandle {
  pub(crate) fn new(interpreter: GraphInterpreter) -> Self {
    Self { inner: Arc::new(Mutex::new(interpreter)) }
  }

  /// Runs one drive pass.
  pub fn drive(&self) -> DriveOutcome {
    self.inner.lock().drive()
  }

  /// Drives until a pass makes no progress, then reports the run state.
  /// A `Running` result here means the run is stalled until external input
  /// (a probe, a cancel) arrives.
  pub fn drive_until_settled(&self) -> StreamState {
    while self.inner.lock().drive() == DriveOutcome::Progressed {}
    self.state()
  }

  /// Returns the run state.
  #[must_use]
  pub fn state(&self) -> StreamState {
    self.inner.lock().state()
  }

  /// Returns the failure that terminated the run, if any.
  #[must_use]
  pub fn failure(&self) -> Option<StreamError> {
    self.inner.lock().failure().cloned()
  }

  /// Cancels the run.
  pub fn cancel(&self) {
    self.inner.lock().cancel();
  }

  /// Returns the lifecycle state of every stage. After a run ends, every
  /// stage is `Completed` or `Failed`.
  #[must_use]
  pub fn stage_states(&self) -> Vec<(StageId, StageState)> {
    self.inner.lock().stage_states()
  }
}
