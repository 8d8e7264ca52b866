use super::{MatCombineRule, StreamNotUsed};

/// Discards both materialized values.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepNone;

impl<L, R> MatCombineRule<L, R> for KeepNone {
  type Out = StreamNotUsed;

  fn combine(_left: L, _right: R) -> Self::Out {
    StreamNotUsed::new()
  }
}
