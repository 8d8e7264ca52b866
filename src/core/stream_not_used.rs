/// Marker materialized value for stages that materialize nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamNotUsed;

impl StreamNotUsed {
  /// Creates the marker.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}
