use crate::core::{Inlet, Outlet};

/// Shape of a preferred-inlet fan-in: one always-winning inlet plus n
/// regular inlets.
#[derive(Debug, Clone)]
pub struct MergePreferredShape<T> {
  preferred: Inlet<T>,
  inlets:    Vec<Inlet<T>>,
  outlet:    Outlet<T>,
}

impl<T> MergePreferredShape<T> {
  pub(crate) fn new(preferred: Inlet<T>, inlets: Vec<Inlet<T>>, outlet: Outlet<T>) -> Self {
    Self { preferred, inlets, outlet }
  }

  /// Returns the preferred inlet.
  #[must_use]
  pub const fn preferred(&self) -> Inlet<T> {
    self.preferred
  }

  /// Returns the regular inlet at `index`.
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of range.
  #[must_use]
  pub fn inlet(&self, index: usize) -> Inlet<T> {
    self.inlets[index]
  }

  /// Returns the single outlet.
  #[must_use]
  pub const fn outlet(&self) -> Outlet<T> {
    self.outlet
  }
}
