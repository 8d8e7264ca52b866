use crate::core::Inlet;

/// Shape with one free inlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkShape<In> {
  inlet: Inlet<In>,
}

impl<In> SinkShape<In> {
  /// Creates a shape over the given inlet.
  #[must_use]
  pub const fn new(inlet: Inlet<In>) -> Self {
    Self { inlet }
  }

  /// Returns the free inlet.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<In> {
    self.inlet
  }
}
