use crate::core::Outlet;

/// Shape with one free outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceShape<Out> {
  outlet: Outlet<Out>,
}

impl<Out> SourceShape<Out> {
  /// Creates a shape over the given outlet.
  #[must_use]
  pub const fn new(outlet: Outlet<Out>) -> Self {
    Self { outlet }
  }

  /// Returns the free outlet.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }
}
