use super::StageDefinition;

/// Stage blueprint that can be added to a
/// [`GraphBuilder`](super::GraphBuilder).
pub trait StreamStage {
  /// Typed port handles exposed once the stage is part of a graph.
  type Shape;

  /// Splits the stage into its port handles and its registered definition.
  fn into_parts(self) -> (Self::Shape, StageDefinition);
}
