/// Closed set of built-in stage kinds.
///
/// Stages are not an open extension point; the interpreter only ever runs
/// the kinds listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
  /// Element-producing stage.
  Source,
  /// One-to-one transform.
  Map,
  /// Predicate-gated pass-through.
  Filter,
  /// Forwards a fixed number of elements, then completes.
  Take,
  /// Collects elements into fixed-size groups.
  Grouped,
  /// Bounded buffer with an overflow strategy.
  Buffer,
  /// Fair n-way fan-in.
  Merge,
  /// Fan-in with one always-winning preferred inlet.
  MergePreferred,
  /// n-way fan-out duplicating each element.
  Broadcast,
  /// Pairs elements from two inputs.
  Zip,
  /// Drains inputs sequentially in port order.
  Concat,
  /// Rotates over inputs in fixed-size segments.
  Interleave,
  /// Element-consuming stage.
  Sink,
  /// Externally fed test source.
  SourceProbe,
  /// Externally observed test sink.
  SinkProbe,
}
