use crate::core::StreamError;

/// Event recorded by a [`TestSinkProbe`](super::TestSinkProbe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent<T> {
  /// An element was delivered.
  Next(T),
  /// Upstream completed.
  Complete,
  /// Upstream failed.
  Error(StreamError),
}
