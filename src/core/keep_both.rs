use super::MatCombineRule;

/// Keeps both materialized values as a tuple.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepBoth;

impl<L, R> MatCombineRule<L, R> for KeepBoth {
  type Out = (L, R);

  fn combine(left: L, right: R) -> Self::Out {
    (left, right)
  }
}
