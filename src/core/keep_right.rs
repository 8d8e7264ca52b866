use super::MatCombineRule;

/// Keeps the right materialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepRight;

impl<L, R> MatCombineRule<L, R> for KeepRight {
  type Out = R;

  fn combine(_left: L, right: R) -> Self::Out {
    right
  }
}
