//! Terminal consumer stages.
//!
//! Every value-producing sink creates its [`StreamCompletion`] handle
//! eagerly at construction; the handle is the sink's materialized value and
//! is resolved by the stage logic when the stream ends.

#[cfg(test)]
mod tests;

use core::marker::PhantomData;

use crate::core::{
  DynValue, PortId, StageContext, StageDefinition, StageKind, StageLogic, StreamCompletion, StreamDone, StreamError,
  StreamGraph, downcast_value,
};

/// Element consumer with one free inlet.
pub struct Sink<In, Mat> {
  graph: StreamGraph,
  inlet: PortId,
  mat:   Mat,
  _pd:   PhantomData<fn(In)>,
}

impl<T> Sink<T, StreamCompletion<T>>
where
  T: Send + Sync + 'static,
{
  /// Resolves with the first element, cancelling upstream afterwards;
  /// resolves with `NoSuchElement` when the stream completes empty.
  #[must_use]
  pub fn first() -> Self {
    let completion = StreamCompletion::new();
    Self::from_definition(
      StageKind::Sink,
      Box::new(FirstLogic { completion: completion.clone(), _pd: PhantomData::<fn(T)> }),
      completion,
    )
  }
}

impl<T, Acc> Sink<T, StreamCompletion<Acc>>
where
  T: Send + Sync + 'static,
  Acc: Send + Sync + 'static,
{
  /// Folds every element into an accumulator and resolves with it on
  /// completion.
  #[must_use]
  pub fn fold<F>(zero: Acc, func: F) -> Self
  where
    F: FnMut(Acc, T) -> Acc + Send + 'static, {
    let completion = StreamCompletion::new();
    Self::from_definition(
      StageKind::Sink,
      Box::new(FoldLogic { acc: Some(zero), func, completion: completion.clone(), _pd: PhantomData::<fn(T)> }),
      completion,
    )
  }
}

impl<T> Sink<T, StreamCompletion<Vec<T>>>
where
  T: Send + Sync + 'static,
{
  /// Collects every element and resolves with the full `Vec` on
  /// completion.
  #[must_use]
  pub fn collect() -> Self {
    let completion = StreamCompletion::new();
    Self::from_definition(
      StageKind::Sink,
      Box::new(CollectLogic { items: Vec::new(), completion: completion.clone() }),
      completion,
    )
  }
}

impl<T> Sink<T, StreamCompletion<StreamDone>>
where
  T: Send + Sync + 'static,
{
  /// Runs `func` for every element and resolves with [`StreamDone`] on
  /// completion.
  #[must_use]
  pub fn foreach<F>(func: F) -> Self
  where
    F: FnMut(T) + Send + 'static, {
    let completion = StreamCompletion::new();
    Self::from_definition(
      StageKind::Sink,
      Box::new(ForeachLogic { func, completion: completion.clone(), _pd: PhantomData::<fn(T)> }),
      completion,
    )
  }

  /// Discards every element and resolves with [`StreamDone`] on
  /// completion.
  #[must_use]
  pub fn ignore() -> Self {
    Self::foreach(|_| ())
  }
}

impl<In, Mat> Sink<In, Mat>
where
  In: Send + Sync + 'static,
{
  fn from_definition(kind: StageKind, logic: Box<dyn StageLogic>, mat: Mat) -> Self {
    let inlet = PortId::next();
    let mut graph = StreamGraph::new();
    graph.add_stage(StageDefinition::sink::<In>(kind, inlet, logic));
    Self { graph, inlet, mat, _pd: PhantomData }
  }

  pub(crate) fn from_parts(kind: StageKind, logic: Box<dyn StageLogic>, mat: Mat) -> Self {
    Self::from_definition(kind, logic, mat)
  }

  pub(crate) fn from_graph(graph: StreamGraph, inlet: PortId, mat: Mat) -> Self {
    Self { graph, inlet, mat, _pd: PhantomData }
  }

  pub(crate) fn into_inner(self) -> (StreamGraph, PortId, Mat) {
    (self.graph, self.inlet, self.mat)
  }
}

struct FirstLogic<T> {
  completion: StreamCompletion<T>,
  _pd:        PhantomData<fn(T)>,
}

impl<T> StageLogic for FirstLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Ok(downcast_value::<T>(value)?));
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Err(StreamError::NoSuchElement));
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    self.completion.complete(Err(error.clone()));
    ctx.fail_stage(error);
    Ok(())
  }

  fn on_run_cancel(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Err(StreamError::Cancelled));
    ctx.complete_stage();
    Ok(())
  }
}

struct FoldLogic<T, Acc, F> {
  acc:        Option<Acc>,
  func:       F,
  completion: StreamCompletion<Acc>,
  _pd:        PhantomData<fn(T)>,
}

impl<T, Acc, F> StageLogic for FoldLogic<T, Acc, F>
where
  T: Send + Sync + 'static,
  Acc: Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let value = downcast_value::<T>(value)?;
    match self.acc.take() {
      | Some(acc) => {
        self.acc = Some((self.func)(acc, value));
        let _ = ctx.pull(0);
        Ok(())
      },
      | None => Err(StreamError::Protocol("fold accumulator missing")),
    }
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    match self.acc.take() {
      | Some(acc) => self.completion.complete(Ok(acc)),
      | None => self.completion.complete(Err(StreamError::Protocol("fold accumulator missing"))),
    }
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    self.completion.complete(Err(error.clone()));
    ctx.fail_stage(error);
    Ok(())
  }

  fn on_run_cancel(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Err(StreamError::Cancelled));
    ctx.complete_stage();
    Ok(())
  }
}

struct CollectLogic<T> {
  items:      Vec<T>,
  completion: StreamCompletion<Vec<T>>,
}

impl<T> StageLogic for CollectLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.items.push(downcast_value::<T>(value)?);
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Ok(core::mem::take(&mut self.items)));
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    self.completion.complete(Err(error.clone()));
    ctx.fail_stage(error);
    Ok(())
  }

  fn on_run_cancel(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Err(StreamError::Cancelled));
    ctx.complete_stage();
    Ok(())
  }
}

struct ForeachLogic<T, F> {
  func:       F,
  completion: StreamCompletion<StreamDone>,
  _pd:        PhantomData<fn(T)>,
}

impl<T, F> StageLogic for ForeachLogic<T, F>
where
  T: Send + Sync + 'static,
  F: FnMut(T) + Send + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    (self.func)(downcast_value::<T>(value)?);
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Ok(StreamDone::new()));
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    self.completion.complete(Err(error.clone()));
    ctx.fail_stage(error);
    Ok(())
  }

  fn on_run_cancel(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.completion.complete(Err(StreamError::Cancelled));
    ctx.complete_stage();
    Ok(())
  }
}
