//! Stream error definitions.

#[cfg(test)]
mod tests;

use thiserror::Error;

/// Errors raised while building or running a stream graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
  /// The requested wiring is structurally impossible.
  #[error("invalid stream connection")]
  InvalidConnection,
  /// A port is not registered in the graph being wired.
  #[error("unknown port")]
  UnknownPort,
  /// A port already has a connection.
  #[error("port is already connected")]
  PortAlreadyConnected,
  /// A non-exposed port was left unconnected when the graph was sealed.
  #[error("port is not connected")]
  UnconnectedPort,
  /// Element types of the two ends of a connection disagree.
  #[error("element type mismatch")]
  TypeMismatch,
  /// A stage constructor argument must be positive.
  #[error("argument must be positive: {0}")]
  InvalidArgument(&'static str),
  /// Demand accounting was violated.
  #[error("invalid demand request")]
  InvalidDemand,
  /// A bounded buffer overflowed under [`OverflowStrategy::Fail`](super::OverflowStrategy::Fail).
  #[error("buffer capacity exceeded")]
  BufferOverflow,
  /// The stream completed without producing the awaited element.
  #[error("stream completed without an element")]
  NoSuchElement,
  /// The run was cancelled before the awaited element arrived.
  #[error("stream was cancelled")]
  Cancelled,
  /// The pull/push protocol was violated by a stage.
  #[error("protocol violation: {0}")]
  Protocol(&'static str),
}
