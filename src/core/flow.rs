//! Linear stage algebra: one-port operators, composition and the Join
//! combinator that closes a flow into a cycle.

#[cfg(test)]
mod tests;

use core::marker::PhantomData;

use crate::core::{
  Buffer, DynValue, KeepLeft, MatCombineRule, OverflowStrategy, PortId, RunnableGraph, Sink, StageContext,
  StageDefinition, StageKind, StageLogic, StreamError, StreamGraph, StreamNotUsed, StreamStage,
  downcast_value, validate_positive_argument,
};

/// Linear processing fragment with one free inlet and one free outlet.
///
/// A `Flow` owns an untyped graph fragment plus its eagerly created
/// materialized value; the element types are tracked statically. The
/// identity flow carries no stages at all.
pub struct Flow<In, Out, Mat> {
  graph: StreamGraph,
  /// Free (inlet, outlet) pair; `None` for the identity flow.
  ports: Option<(PortId, PortId)>,
  mat:   Mat,
  _pd:   PhantomData<fn(In) -> Out>,
}

impl<T> Flow<T, T, StreamNotUsed>
where
  T: Send + Sync + 'static,
{
  /// Creates the identity flow.
  #[must_use]
  pub fn new() -> Self {
    Self { graph: StreamGraph::new(), ports: None, mat: StreamNotUsed::new(), _pd: PhantomData }
  }
}

impl<T> Default for Flow<T, T, StreamNotUsed>
where
  T: Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<In, Out, Mat> Flow<In, Out, Mat>
where
  In: Send + Sync + 'static,
  Out: Send + Sync + 'static,
{
  pub(crate) fn from_graph(graph: StreamGraph, ports: Option<(PortId, PortId)>, mat: Mat) -> Self {
    Self { graph, ports, mat, _pd: PhantomData }
  }

  pub(crate) fn into_inner(self) -> (StreamGraph, Option<(PortId, PortId)>, Mat) {
    (self.graph, self.ports, self.mat)
  }

  fn append<Next>(mut self, inlet: PortId, outlet: PortId, definition: StageDefinition) -> Flow<In, Next, Mat>
  where
    Next: Send + Sync + 'static, {
    self.graph.add_stage(definition);
    let ports = match self.ports {
      | Some((first_in, last_out)) => {
        // fresh ports with statically equal element types
        let wired = self.graph.connect(last_out, inlet);
        debug_assert!(wired.is_ok());
        Some((first_in, outlet))
      },
      | None => Some((inlet, outlet)),
    };
    Flow { graph: self.graph, ports, mat: self.mat, _pd: PhantomData }
  }

  /// Appends a one-to-one transform.
  #[must_use]
  pub fn map<Next, F>(self, func: F) -> Flow<In, Next, Mat>
  where
    Next: Send + Sync + 'static,
    F: FnMut(Out) -> Next + Send + 'static, {
    let inlet = PortId::next();
    let outlet = PortId::next();
    let definition = StageDefinition::linear::<Out, Next>(
      StageKind::Map,
      inlet,
      outlet,
      Box::new(MapLogic::<Out, Next, F> { func, _pd: PhantomData }),
    );
    self.append(inlet, outlet, definition)
  }

  /// Appends a predicate gate; elements failing the predicate are dropped.
  #[must_use]
  pub fn filter<F>(self, predicate: F) -> Flow<In, Out, Mat>
  where
    F: FnMut(&Out) -> bool + Send + 'static, {
    let inlet = PortId::next();
    let outlet = PortId::next();
    let definition = StageDefinition::linear::<Out, Out>(
      StageKind::Filter,
      inlet,
      outlet,
      Box::new(FilterLogic::<Out, F> { predicate, _pd: PhantomData }),
    );
    self.append(inlet, outlet, definition)
  }

  /// Appends a stage forwarding the first `count` elements, then
  /// completing and cancelling upstream. `take(0)` completes immediately.
  #[must_use]
  pub fn take(self, count: u64) -> Flow<In, Out, Mat> {
    let inlet = PortId::next();
    let outlet = PortId::next();
    let definition =
      StageDefinition::linear::<Out, Out>(StageKind::Take, inlet, outlet, Box::new(TakeLogic { remaining: count }));
    self.append(inlet, outlet, definition)
  }

  /// Appends a stage collecting elements into `Vec`s of `size`; a partial
  /// group is flushed on upstream completion.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `size` is zero.
  pub fn grouped(self, size: usize) -> Result<Flow<In, Vec<Out>, Mat>, StreamError> {
    validate_positive_argument("size", size)?;
    let inlet = PortId::next();
    let outlet = PortId::next();
    let definition = StageDefinition::linear::<Out, Vec<Out>>(
      StageKind::Grouped,
      inlet,
      outlet,
      Box::new(GroupedLogic::<Out> { size, group: Vec::with_capacity(size), flush: None }),
    );
    Ok(self.append(inlet, outlet, definition))
  }

  /// Appends a [`Buffer`] stage.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `capacity` is zero.
  pub fn buffer(self, capacity: usize, strategy: OverflowStrategy) -> Result<Flow<In, Out, Mat>, StreamError> {
    let (shape, definition) = Buffer::<Out>::new(capacity, strategy)?.into_parts();
    Ok(self.append(shape.inlet().id(), shape.outlet().id(), definition))
  }

  /// Composes `self` with `flow`, keeping the left materialized value.
  #[must_use]
  pub fn via<Next, Mat2>(self, flow: Flow<Out, Next, Mat2>) -> Flow<In, Next, Mat>
  where
    Next: Send + Sync + 'static, {
    self.via_mat(flow, KeepLeft)
  }

  /// Composes `self` with `flow`, combining materialized values by `rule`.
  #[must_use]
  pub fn via_mat<Next, Mat2, Rule>(self, flow: Flow<Out, Next, Mat2>, _rule: Rule) -> Flow<In, Next, Rule::Out>
  where
    Next: Send + Sync + 'static,
    Rule: MatCombineRule<Mat, Mat2>, {
    let (mut graph, ports, mat) = self.into_inner();
    let (other_graph, other_ports, other_mat) = flow.into_inner();
    graph.absorb(other_graph);
    let ports = match (ports, other_ports) {
      | (Some((first_in, last_out)), Some((next_in, next_out))) => {
        let wired = graph.connect(last_out, next_in);
        debug_assert!(wired.is_ok());
        Some((first_in, next_out))
      },
      | (Some(ports), None) | (None, Some(ports)) => Some(ports),
      | (None, None) => None,
    };
    Flow::from_graph(graph, ports, Rule::combine(mat, other_mat))
  }

  /// Terminates `self` with `sink`, keeping the left materialized value.
  #[must_use]
  pub fn to<Mat2>(self, sink: Sink<Out, Mat2>) -> Sink<In, Mat> {
    self.to_mat(sink, KeepLeft)
  }

  /// Terminates `self` with `sink`, combining materialized values by
  /// `rule`.
  #[must_use]
  pub fn to_mat<Mat2, Rule>(self, sink: Sink<Out, Mat2>, _rule: Rule) -> Sink<In, Rule::Out>
  where
    Rule: MatCombineRule<Mat, Mat2>, {
    let (mut graph, ports, mat) = self.into_inner();
    let (sink_graph, sink_inlet, sink_mat) = sink.into_inner();
    graph.absorb(sink_graph);
    let inlet = match ports {
      | Some((first_in, last_out)) => {
        let wired = graph.connect(last_out, sink_inlet);
        debug_assert!(wired.is_ok());
        first_in
      },
      | None => sink_inlet,
    };
    Sink::from_graph(graph, inlet, Rule::combine(mat, sink_mat))
  }

  /// Closes `self` with `other` into a cycle, keeping the left
  /// materialized value.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidConnection` when both flows are the
  /// identity, and any wiring error the two closing connections raise.
  pub fn join<Mat2>(self, other: Flow<Out, In, Mat2>) -> Result<RunnableGraph<Mat>, StreamError> {
    self.join_mat(other, KeepLeft)
  }

  /// Closes `self` with `other` into a cycle: `self`'s outlet feeds
  /// `other`'s inlet and `other`'s outlet feeds back into `self`'s inlet.
  ///
  /// The engine's per-connection input buffers give a well-formed loop the
  /// slack it needs; a loop without enough give stalls observably instead
  /// of completing.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidConnection` when both flows are the
  /// identity, and any wiring error the two closing connections raise.
  pub fn join_mat<Mat2, Rule>(self, other: Flow<Out, In, Mat2>, _rule: Rule) -> Result<RunnableGraph<Rule::Out>, StreamError>
  where
    Rule: MatCombineRule<Mat, Mat2>, {
    let (mut graph, ports, mat) = self.into_inner();
    let (other_graph, other_ports, other_mat) = other.into_inner();
    graph.absorb(other_graph);
    match (ports, other_ports) {
      | (Some((self_in, self_out)), Some((other_in, other_out))) => {
        graph.connect(self_out, other_in)?;
        graph.connect(other_out, self_in)?;
      },
      // joining the identity loops the partner onto itself
      | (Some((self_in, self_out)), None) => graph.connect(self_out, self_in)?,
      | (None, Some((other_in, other_out))) => graph.connect(other_out, other_in)?,
      | (None, None) => return Err(StreamError::InvalidConnection),
    }
    graph.validate_closed()?;
    Ok(RunnableGraph::new(graph, Rule::combine(mat, other_mat)))
  }
}

struct MapLogic<In, Out, F> {
  func: F,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<In, Out, F> StageLogic for MapLogic<In, Out, F>
where
  In: Send + Sync + 'static,
  Out: Send + Sync + 'static,
  F: FnMut(In) -> Out + Send + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let value = downcast_value::<In>(value)?;
    ctx.push(0, Box::new((self.func)(value)))
  }
}

struct FilterLogic<In, F> {
  predicate: F,
  _pd:       PhantomData<fn(In)>,
}

impl<In, F> StageLogic for FilterLogic<In, F>
where
  In: Send + Sync + 'static,
  F: FnMut(&In) -> bool + Send + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let value = downcast_value::<In>(value)?;
    if (self.predicate)(&value) {
      ctx.push(0, Box::new(value))?;
    } else {
      // the dropped element still owes downstream one
      let _ = ctx.pull(0);
    }
    Ok(())
  }
}

struct TakeLogic {
  remaining: u64,
}

impl StageLogic for TakeLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.remaining == 0 {
      ctx.complete_stage();
    }
    Ok(())
  }

  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.push(0, value)?;
    self.remaining -= 1;
    if self.remaining == 0 {
      ctx.complete_stage();
    }
    Ok(())
  }
}

struct GroupedLogic<T> {
  size:  usize,
  group: Vec<T>,
  /// Partial group stashed at upstream completion until demand arrives.
  flush: Option<Vec<T>>,
}

impl<T> StageLogic for GroupedLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if let Some(group) = self.flush.take() {
      ctx.push(0, Box::new(group))?;
      ctx.complete_stage();
      return Ok(());
    }
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.group.push(downcast_value::<T>(value)?);
    if self.group.len() == self.size {
      let group = core::mem::replace(&mut self.group, Vec::with_capacity(self.size));
      ctx.push(0, Box::new(group))?;
    } else {
      let _ = ctx.pull(0);
    }
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.group.is_empty() {
      ctx.complete_stage();
      return Ok(());
    }
    let group = core::mem::take(&mut self.group);
    if ctx.is_available(0) {
      ctx.push(0, Box::new(group))?;
      ctx.complete_stage();
    } else {
      self.flush = Some(group);
    }
    Ok(())
  }
}
