/// Rule combining the materialized values of two composed fragments.
pub trait MatCombineRule<L, R> {
  /// Combined materialized value.
  type Out;

  /// Combines the two values.
  fn combine(left: L, right: R) -> Self::Out;
}
