use crate::core::{Inlet, Outlet};

/// Shape of a two-input junction whose inputs may differ in type.
#[derive(Debug, Clone, Copy)]
pub struct FanInShape2<A, B, Out> {
  in0:    Inlet<A>,
  in1:    Inlet<B>,
  outlet: Outlet<Out>,
}

impl<A, B, Out> FanInShape2<A, B, Out> {
  pub(crate) const fn new(in0: Inlet<A>, in1: Inlet<B>, outlet: Outlet<Out>) -> Self {
    Self { in0, in1, outlet }
  }

  /// Returns the first inlet.
  #[must_use]
  pub const fn in0(&self) -> Inlet<A> {
    self.in0
  }

  /// Returns the second inlet.
  #[must_use]
  pub const fn in1(&self) -> Inlet<B> {
    self.in1
  }

  /// Returns the single outlet.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<Out> {
    self.outlet
  }
}
