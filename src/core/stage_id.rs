//! Stage identifier for stream graph components.

/// Arena index of a stage within a sealed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId(usize);

impl StageId {
  /// Creates a new stage identifier from an arena index.
  #[must_use]
  pub const fn new(index: usize) -> Self {
    Self(index)
  }

  /// Returns the arena index.
  #[must_use]
  pub const fn index(self) -> usize {
    self.0
  }
}
