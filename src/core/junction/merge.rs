#[cfg(test)]
mod tests;

use core::any::TypeId;
use std::collections::VecDeque;

use crate::core::{
  DynValue, Inlet, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError, StreamStage,
  UniformFanInShape, validate_positive_argument,
};

/// Fair n-way fan-in.
///
/// Elements are forwarded in arrival order, so a ready input is never
/// starved and per-edge FIFO is preserved exactly. Completes once every
/// input completed and the pending queue drained; a downstream cancel
/// cancels all inputs.
pub struct Merge<T> {
  inlets: Vec<Inlet<T>>,
  outlet: Outlet<T>,
}

impl<T> Merge<T>
where
  T: Send + Sync + 'static,
{
  /// Creates a merge over `inputs` inlets.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `inputs` is zero.
  pub fn new(inputs: usize) -> Result<Self, StreamError> {
    validate_positive_argument("inputs", inputs)?;
    Ok(Self { inlets: (0..inputs).map(|_| Inlet::new()).collect(), outlet: Outlet::new() })
  }
}

impl<T> StreamStage for Merge<T>
where
  T: Send + Sync + 'static,
{
  type Shape = UniformFanInShape<T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let element = TypeId::of::<T>();
    let definition = StageDefinition::new(
      StageKind::Merge,
      self.inlets.iter().map(|inlet| inlet.id()).collect(),
      vec![element; self.inlets.len()],
      vec![self.outlet.id()],
      vec![element],
      Box::new(MergeLogic { pending: VecDeque::new(), finished: 0 }),
    );
    (UniformFanInShape::new(self.inlets, self.outlet), definition)
  }
}

struct MergeLogic {
  pending:  VecDeque<(usize, DynValue)>,
  finished: usize,
}

impl MergeLogic {
  fn emit_ready(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    loop {
      if !ctx.is_available(0) {
        break;
      }
      let Some((inlet, value)) = self.pending.pop_front() else {
        break;
      };
      ctx.push(0, value)?;
      let _ = ctx.pull(inlet);
    }
    if self.finished == ctx.inlet_count() && self.pending.is_empty() {
      ctx.complete_stage();
    }
    Ok(())
  }
}

impl StageLogic for MergeLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    for inlet in 0..ctx.inlet_count() {
      let _ = ctx.pull(inlet);
    }
    Ok(())
  }

  fn on_push(&mut self, inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.pending.push_back((inlet, value));
    self.emit_ready(ctx)
  }

  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.emit_ready(ctx)
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.finished += 1;
    self.emit_ready(ctx)
  }
}
