//! Producer stages.


use core::marker::PhantomData;

use crate::core::{
  KeepLeft, MatCombineRule, PortId, RunnableGraph, Sink, StageContext, StageDefinition, StageKind, StageLogic,
  StreamError, StreamGraph, StreamNotUsed,
};

use super::Flow;

/// Element producer with one free outlet.
pub struct Source<Out, Mat> {
  graph:  StreamGraph,
  outlet: PortId,
  mat:    Mat,
  _pd:    PhantomData<fn() -> Out>,
}

impl<T> Source<T, StreamNotUsed>
where
  T: Send + Sync + 'static,
{
  /// Emits one element, then completes.
  #[must_use]
  pub fn single(value: T) -> Self {
    let outlet = PortId::next();
    Self::from_definition(
      StageDefinition::source::<T>(StageKind::Source, outlet, Box::new(SingleLogic { value: Some(value) })),
      outlet,
      StreamNotUsed::new(),
    )
  }

  /// Emits every element of `iter` in order, then completes.
  #[must_use]
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static, {
    let outlet = PortId::next();
    Self::from_definition(
      StageDefinition::source::<T>(StageKind::Source, outlet, Box::new(IterLogic { iter: iter.into_iter() })),
      outlet,
      StreamNotUsed::new(),
    )
  }
}

impl<Out, Mat> Source<Out, Mat>
where
  Out: Send + Sync + 'static,
{
  pub(crate) fn from_definition(definition: StageDefinition, outlet: PortId, mat: Mat) -> Self {
    let mut graph = StreamGraph::new();
    graph.add_stage(definition);
    Self { graph, outlet, mat, _pd: PhantomData }
  }

  pub(crate) fn into_inner(self) -> (StreamGraph, PortId, Mat) {
    (self.graph, self.outlet, self.mat)
  }

  /// Extends the source with `flow`, keeping the left materialized value.
  #[must_use]
  pub fn via<Next, Mat2>(self, flow: Flow<Out, Next, Mat2>) -> Source<Next, Mat>
  where
    Next: Send + Sync + 'static, {
    self.via_mat(flow, KeepLeft)
  }

  /// Extends the source with `flow`, combining materialized values by
  /// `rule`.
  #[must_use]
  pub fn via_mat<Next, Mat2, Rule>(self, flow: Flow<Out, Next, Mat2>, _rule: Rule) -> Source<Next, Rule::Out>
  where
    Next: Send + Sync + 'static,
    Rule: MatCombineRule<Mat, Mat2>, {
    let (mut graph, outlet, mat) = self.into_inner();
    let (flow_graph, flow_ports, flow_mat) = flow.into_inner();
    graph.absorb(flow_graph);
    let outlet = match flow_ports {
      | Some((flow_in, flow_out)) => {
        let wired = graph.connect(outlet, flow_in);
        debug_assert!(wired.is_ok());
        flow_out
      },
      | None => outlet,
    };
    Source { graph, outlet, mat: Rule::combine(mat, flow_mat), _pd: PhantomData }
  }

  /// Terminates the source with `sink`, keeping the left materialized
  /// value.
  #[must_use]
  pub fn to<Mat2>(self, sink: Sink<Out, Mat2>) -> RunnableGraph<Mat> {
    self.to_mat(sink, KeepLeft)
  }

  /// Terminates the source with `sink`, combining materialized values by
  /// `rule`.
  #[must_use]
  pub fn to_mat<Mat2, Rule>(self, sink: Sink<Out, Mat2>, _rule: Rule) -> RunnableGraph<Rule::Out>
  where
    Rule: MatCombineRule<Mat, Mat2>, {
    let (mut graph, outlet, mat) = self.into_inner();
    let (sink_graph, sink_inlet, sink_mat) = sink.into_inner();
    graph.absorb(sink_graph);
    let wired = graph.connect(outlet, sink_inlet);
    debug_assert!(wired.is_ok());
    RunnableGraph::new(graph, Rule::combine(mat, sink_mat))
  }
}

struct SingleLogic<T> {
  value: Option<T>,
}

impl<T> StageLogic for SingleLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if let Some(value) = self.value.take() {
      ctx.push(0, Box::new(value))?;
    }
    ctx.complete_stage();
    Ok(())
  }
}

struct IterLogic<I> {
  iter: I,
}

impl<I> StageLogic for IterLogic<I>
where
  I: Iterator + Send + 'static,
  I::Item: Send + Sync + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    while ctx.is_available(0) {
      match self.iter.next() {
        | Some(value) => ctx.push(0, Box::new(value))?,
        | None => {
          ctx.complete_stage();
          break;
        },
      }
    }
    Ok(())
  }
}
