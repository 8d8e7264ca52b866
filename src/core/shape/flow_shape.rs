use crate::core::{Inlet, Outlet};

/// Shape with one free inlet and one free outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowShape<In, Out> {
  inlet:  Inlet<In>,
  outlet: Outlet<Out>,
}

impl<In, Out> FlowShape<In, Out> {
  /// Creates a shape over the given ports.
  #[must_use]
  pub const fn new(inlet: Inlet<In>, outlet: Outlet<Out>) -> Self {
    Self { inlet, outlet }
  }

  /// Returns the free inlet.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<In> {
    self.inlet
  }

  /// Returns the free outlet.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }
}
