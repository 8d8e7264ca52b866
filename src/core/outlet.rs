#[cfg(test)]
mod tests;

use core::{
  fmt,
  hash::{Hash, Hasher},
  marker::PhantomData,
};

use super::PortId;

/// Typed outlet port.
pub struct Outlet<T> {
  id:  PortId,
  _pd: PhantomData<fn() -> T>,
}

impl<T> Outlet<T> {
  /// Creates a new outlet.
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

// Manual impls: the element type is phantom, so an outlet stays a plain
// copyable identifier whatever `T` is. Derives would bound `T`.
impl<T> Clone for Outlet<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Outlet<T> {}

impl<T> PartialEq for Outlet<T> {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl<T> Eq for Outlet<T> {}

impl<T> Hash for Outlet<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl<T> fmt::Debug for Outlet<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Outlet").field("id", &self.id).finish()
  }
}

impl<T> Default for Outlet<T> {
  fn default() -> Self {
    Self::new()
  }
}
