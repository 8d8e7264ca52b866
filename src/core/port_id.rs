//! Port identifier shared by inlets and outlets.

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU64;

/// Unique identifier for a stage port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(u64);

impl PortId {
  /// Creates a new port identifier from a raw value.
  #[must_use]
  pub const fn new(value: u64) -> Self {
    Self(value)
  }

  /// Returns the raw identifier value.
  #[must_use]
  pub const fn value(self) -> u64 {
    self.0
  }

  /// Generates a monotonically increasing port identifier.
  #[must_use]
  pub fn next() -> Self {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    let value = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    Self(value)
  }
}
