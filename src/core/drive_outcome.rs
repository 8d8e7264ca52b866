/// Result of one [`GraphInterpreter::drive`](super::GraphInterpreter::drive) pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
  /// At least one signal was dispatched or a stage made external progress.
  Progressed,
  /// Nothing to do; the run is finished or stalled.
  Idle,
}
