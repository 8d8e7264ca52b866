#[cfg(test)]
mod tests;

use core::{any::TypeId, marker::PhantomData};

use crate::core::{
  DynValue, Inlet, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError, StreamStage,
  UniformFanOutShape, downcast_value, validate_positive_argument,
};

/// Duplicating 1-to-n fan-out.
///
/// Pulls upstream only when every non-cancelled output has demand, so the
/// slowest live consumer paces the stage. With `eager_cancel` the first
/// output cancellation kills the whole stage; without it the stage keeps
/// serving the remaining outputs until all of them cancel.
pub struct Broadcast<T> {
  inlet:        Inlet<T>,
  outlets:      Vec<Outlet<T>>,
  eager_cancel: bool,
}

impl<T> Broadcast<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Creates a broadcast over `outputs` outlets.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `outputs` is zero.
  pub fn new(outputs: usize, eager_cancel: bool) -> Result<Self, StreamError> {
    validate_positive_argument("outputs", outputs)?;
    Ok(Self {
      inlet: Inlet::new(),
      outlets: (0..outputs).map(|_| Outlet::new()).collect(),
      eager_cancel,
    })
  }
}

impl<T> StreamStage for Broadcast<T>
where
  T: Clone + Send + Sync + 'static,
{
  type Shape = UniformFanOutShape<T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let element = TypeId::of::<T>();
    let outputs = self.outlets.len();
    let definition = StageDefinition::new(
      StageKind::Broadcast,
      vec![self.inlet.id()],
      vec![element],
      self.outlets.iter().map(|outlet| outlet.id()).collect(),
      vec![element; outputs],
      Box::new(BroadcastLogic::<T> {
        eager_cancel: self.eager_cancel,
        cancelled:    vec![false; outputs],
        _pd:          PhantomData,
      }),
    );
    (UniformFanOutShape::new(self.inlet, self.outlets), definition)
  }
}

struct BroadcastLogic<T> {
  eager_cancel: bool,
  cancelled:    Vec<bool>,
  _pd:          PhantomData<fn() -> T>,
}

impl<T> BroadcastLogic<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn maybe_pull(&self, ctx: &mut StageContext<'_>) {
    let mut open = 0;
    for outlet in 0..ctx.outlet_count() {
      if self.cancelled[outlet] {
        continue;
      }
      if !ctx.is_available(outlet) {
        return;
      }
      open += 1;
    }
    if open > 0 {
      let _ = ctx.pull(0);
    }
  }
}

impl<T> StageLogic for BroadcastLogic<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.maybe_pull(ctx);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let value = downcast_value::<T>(value)?;
    for outlet in 0..ctx.outlet_count() {
      if self.cancelled[outlet] {
        continue;
      }
      ctx.push(outlet, Box::new(value.clone()))?;
    }
    self.maybe_pull(ctx);
    Ok(())
  }

  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.maybe_pull(ctx);
    Ok(())
  }

  fn on_downstream_cancel(&mut self, outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.cancelled[outlet] = true;
    if self.eager_cancel || self.cancelled.iter().all(|cancelled| *cancelled) {
      ctx.complete_stage();
    } else {
      self.maybe_pull(ctx);
    }
    Ok(())
  }
}
