/// Lifecycle state of a materialized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
  /// Materialized but not started.
  Idle,
  /// Signals are being processed; a run with an empty work queue that makes
  /// no progress is stalled, not finished.
  Running,
  /// Every stage finished normally.
  Completed,
  /// A stage failure terminated the run.
  Failed,
  /// The run was cancelled from the outside.
  Cancelled,
}

impl StreamState {
  /// Returns `true` when the run can no longer make progress.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
  }
}
