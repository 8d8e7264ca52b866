use super::MatCombineRule;

/// Keeps the left materialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLeft;

impl<L, R> MatCombineRule<L, R> for KeepLeft {
  type Out = L;

  fn combine(left: L, _right: R) -> Self::Out {
    left
  }
}
