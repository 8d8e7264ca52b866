use crate::core::{Inlet, Outlet};

/// Shape of a one-input, n-output junction with uniform element type.
#[derive(Debug, Clone)]
pub struct UniformFanOutShape<T> {
  inlet:   Inlet<T>,
  outlets: Vec<Outlet<T>>,
}

impl<T> UniformFanOutShape<T> {
  pub(crate) fn new(inlet: Inlet<T>, outlets: Vec<Outlet<T>>) -> Self {
    Self { inlet, outlets }
  }

  /// Returns the single inlet.
  #[must_use]
  pub const fn inlet(&self) -> Inlet<T> {
    self.inlet
  }

  /// Returns the outlet at `index`.
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of range.
  #[must_use]
  pub fn outlet(&self, index: usize) -> Outlet<T> {
    self.outlets[index]
  }

  /// Returns all outlets in port order.
  #[must_use]
  pub fn outlets(&self) -> &[Outlet<T>] {
    &self.outlets
  }
}
