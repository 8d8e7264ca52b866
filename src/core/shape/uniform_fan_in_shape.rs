use crate::core::{Inlet, Outlet};

/// Shape of an n-input, one-output junction with uniform element type.
#[derive(Debug, Clone)]
pub struct UniformFanInShape<T> {
  inlets: Vec<Inlet<T>>,
  outlet: Outlet<T>,
}

impl<T> UniformFanInShape<T> {
  pub(crate) fn new(inlets: Vec<Inlet<T>>, outlet: Outlet<T>) -> Self {
    Self { inlets, outlet }
  }

  /// Returns the inlet at `index`.
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of range.
  #[must_use]
  pub fn inlet(&self, index: usize) -> Inlet<T> {
    self.inlets[index]
  }

  /// Returns all inlets in port order.
  #[must_use]
  pub fn inlets(&self) -> &[Inlet<T>] {
    &self.inlets
  }

  /// Returns the single outlet.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<T> {
    self.outlet
  }
}
