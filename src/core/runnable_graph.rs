use super::{Materialized, StreamError, StreamGraph, StreamMaterializer};

/// A closed graph: every port connected, ready to run.
pub struct RunnableGraph<Mat> {
  graph: StreamGraph,
  mat:   Mat,
}

impl<Mat> RunnableGraph<Mat> {
  pub(crate) fn new(graph: StreamGraph, mat: Mat) -> Self {
    Self { graph, mat }
  }

  /// Materializes and starts the graph, driving it until it settles or
  /// stalls.
  ///
  /// # Errors
  ///
  /// Returns any compile-time validation error the materializer raises.
  pub fn run(self, materializer: &mut StreamMaterializer) -> Result<Materialized<Mat>, StreamError> {
    let handle = materializer.materialize(self.graph)?;
    Ok(Materialized::new(self.mat, handle))
  }
}
