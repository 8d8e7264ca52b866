use super::StreamError;

/// Poll result of a [`StreamCompletion`](super::StreamCompletion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
  /// The stream has not produced a result yet.
  Pending,
  /// The stream finished with the given result.
  Ready(Result<T, StreamError>),
}

impl<T> Completion<T> {
  /// Returns `true` when a result is available.
  #[must_use]
  pub const fn is_ready(&self) -> bool {
    matches!(self, Self::Ready(_))
  }
}
