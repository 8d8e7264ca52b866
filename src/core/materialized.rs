use super::StreamHandle;

/// Result of running a graph: the combined materialized value plus the
/// handle driving the run.
pub struct Materialized<Mat> {
  value:  Mat,
  handle: StreamHandle,
}

impl<Mat> Materialized<Mat> {
  pub(crate) fn new(value: Mat, handle: StreamHandle) -> Self {
    Self { value, handle }
  }

  /// Returns the materialized value.
  #[must_use]
  pub const fn value(&self) -> &Mat {
    &self.value
  }

  /// Returns the run handle.
  #[must_use]
  pub const fn handle(&self) -> &StreamHandle {
    &self.handle
  }

  /// Splits into the materialized value and the run handle.
  #[must_use]
  pub fn into_parts(self) -> (Mat, StreamHandle) {
    (self.value, self.handle)
  }
}
