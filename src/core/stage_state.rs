/// Lifecycle state of a single stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
  /// The stage has not been activated yet.
  Idle,
  /// The stage has an outstanding pull on at least one inlet.
  AwaitingInput,
  /// The stage is waiting for downstream demand.
  AwaitingDemand,
  /// At least one port has closed; the stage is winding down.
  Completing,
  /// The stage finished normally.
  Completed,
  /// The stage finished with an error.
  Failed,
}

impl StageState {
  /// Returns `true` when the stage can no longer be activated.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Completed | Self::Failed)
  }
}
