#[cfg(test)]
mod tests;

use core::{
  fmt,
  hash::{Hash, Hasher},
  marker::PhantomData,
};

use super::PortId;

/// Typed inlet port.
pub struct Inlet<T> {
  id:  PortId,
  _pd: PhantomData<fn() -> T>,
}

impl<T> Inlet<T> {
  /// Creates a new inlet.
  #[must_use]
  pub fn new() -> Self {
    Self { id: PortId::next(), _pd: PhantomData }
  }

  /// Returns the port identifier.
  #[must_use]
  pub const fn id(&self) -> PortId {
    self.id
  }

  pub(crate) const fn from_id(id: PortId) -> Self {
    Self { id, _pd: PhantomData }
  }
}

// Manual impls: the element type is phantom, so an inlet stays a plain
// copyable identifier whatever `T` is. Derives would bound `T`.
impl<T> Clone for Inlet<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Inlet<T> {}

impl<T> PartialEq for Inlet<T> {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl<T> Eq for Inlet<T> {}

impl<T> Hash for Inlet<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl<T> fmt::Debug for Inlet<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Inlet").field("id", &self.id).finish()
  }
}

impl<T> Default for Inlet<T> {
  fn default() -> Self {
    Self::new()
  }
}
