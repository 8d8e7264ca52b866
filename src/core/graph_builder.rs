//! Wiring DSL for arbitrary, possibly cyclic topologies.

#[cfg(test)]
mod tests;

use crate::core::{
  Flow, FlowShape, Inlet, Outlet, RunnableGraph, Sink, SinkShape, Source, SourceShape, StreamError, StreamGraph,
  StreamNotUsed, StreamStage,
};

/// Builds a stream graph by adding stages and wiring their ports.
///
/// Every port must be used exactly once: sealing fails when a non-exposed
/// port dangles or an exposed port was claimed. Cycles are never checked
/// for; wiring a loop is the point.
pub struct GraphBuilder {
  graph: StreamGraph,
}

impl GraphBuilder {
  /// Creates an empty builder.
  #[must_use]
  pub fn new() -> Self {
    Self { graph: StreamGraph::new() }
  }

  /// Adds a junction or buffer stage, returning its typed port handles.
  pub fn add<S>(&mut self, stage: S) -> S::Shape
  where
    S: StreamStage, {
    let (shape, definition) = stage.into_parts();
    self.graph.add_stage(definition);
    shape
  }

  /// Absorbs a pre-built source fragment.
  pub fn add_source<T, Mat>(&mut self, source: Source<T, Mat>) -> (SourceShape<T>, Mat)
  where
    T: Send + Sync + 'static, {
    let (graph, outlet, mat) = source.into_inner();
    self.graph.absorb(graph);
    (SourceShape::new(Outlet::from_id(outlet)), mat)
  }

  /// Absorbs a pre-built linear flow fragment.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidConnection` for the identity flow, which
  /// has no ports to wire.
  pub fn add_flow<In, Out, Mat>(&mut self, flow: Flow<In, Out, Mat>) -> Result<(FlowShape<In, Out>, Mat), StreamError>
  where
    In: Send + Sync + 'static,
    Out: Send + Sync + 'static, {
    let (graph, ports, mat) = flow.into_inner();
    let Some((inlet, outlet)) = ports else {
      return Err(StreamError::InvalidConnection);
    };
    self.graph.absorb(graph);
    Ok((FlowShape::new(Inlet::from_id(inlet), Outlet::from_id(outlet)), mat))
  }

  /// Absorbs a pre-built sink fragment.
  pub fn add_sink<T, Mat>(&mut self, sink: Sink<T, Mat>) -> (SinkShape<T>, Mat)
  where
    T: Send + Sync + 'static, {
    let (graph, inlet, mat) = sink.into_inner();
    self.graph.absorb(graph);
    (SinkShape::new(Inlet::from_id(inlet)), mat)
  }

  /// Wires an outlet to an inlet of the same element type.
  ///
  /// # Errors
  ///
  /// Returns `UnknownPort` for ports of stages never added to this builder
  /// and `PortAlreadyConnected` for double wiring.
  pub fn connect<T>(&mut self, from: &Outlet<T>, to: &Inlet<T>) -> Result<(), StreamError> {
    self.graph.connect(from.id(), to.id())
  }

  /// Seals the graph into a flow exposing the given free ports.
  ///
  /// # Errors
  ///
  /// Returns `PortAlreadyConnected` when an exposed port was claimed and
  /// `UnconnectedPort` when any other port dangles.
  pub fn build_flow<In, Out>(self, shape: FlowShape<In, Out>) -> Result<Flow<In, Out, StreamNotUsed>, StreamError>
  where
    In: Send + Sync + 'static,
    Out: Send + Sync + 'static, {
    self.build_flow_mat(shape, StreamNotUsed::new())
  }

  /// Seals the graph into a flow exposing the given free ports, carrying
  /// `mat` as the materialized value.
  ///
  /// # Errors
  ///
  /// Same as [`GraphBuilder::build_flow`].
  pub fn build_flow_mat<In, Out, Mat>(
    self,
    shape: FlowShape<In, Out>,
    mat: Mat,
  ) -> Result<Flow<In, Out, Mat>, StreamError>
  where
    In: Send + Sync + 'static,
    Out: Send + Sync + 'static, {
    self.graph.validate_exposed(&[shape.inlet().id(), shape.outlet().id()])?;
    Ok(Flow::from_graph(self.graph, Some((shape.inlet().id(), shape.outlet().id())), mat))
  }

  /// Seals a fully wired graph.
  ///
  /// # Errors
  ///
  /// Returns `InvalidConnection` for an empty graph and `UnconnectedPort`
  /// when any port dangles.
  pub fn build_closed(self) -> Result<RunnableGraph<StreamNotUsed>, StreamError> {
    self.graph.validate_closed()?;
    Ok(RunnableGraph::new(self.graph, StreamNotUsed::new()))
  }
}

impl Default for GraphBuilder {
  fn default() -> Self {
    Self::new()
  }
}
