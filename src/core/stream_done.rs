/// Marker returned by sinks that consume a stream without producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamDone;

impl StreamDone {
  /// Creates the marker.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}
