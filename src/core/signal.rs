/// Work-queue entry addressed to one connection.
///
/// Dispatching a signal delivers exactly one activation to exactly one
/// stage, so no two stages of a run ever execute concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
  /// Demand became available; activate the upstream stage.
  Pull { connection: usize },
  /// A buffered element is ready for a pulling downstream stage.
  Push { connection: usize },
  /// Upstream completed and the connection buffer drained.
  Complete { connection: usize },
  /// Upstream failed; buffered elements were dropped.
  Fail { connection: usize },
  /// Downstream cancelled; activate the upstream stage.
  Cancel { connection: usize },
}
