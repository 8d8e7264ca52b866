use core::any::TypeId;
use std::collections::VecDeque;

use crate::core::{
  DynValue, Inlet, MergePreferredShape, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError,
  StreamStage, validate_positive_argument,
};

/// Fan-in with one preferred inlet plus `inputs` regular inlets.
///
/// Whenever the preferred inlet has a pending element it wins; regular
/// inlets share the remaining capacity in arrival order.
pub struct MergePreferred<T> {
  preferred: Inlet<T>,
  inlets:    Vec<Inlet<T>>,
  outlet:    Outlet<T>,
}

impl<T> MergePreferred<T>
where
  T: Send + Sync + 'static,
{
  /// Creates a preferred merge over one preferred inlet and `inputs`
  /// regular inlets.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `inputs` is zero.
  pub fn new(inputs: usize) -> Result<Self, StreamError> {
    validate_positive_argument("inputs", inputs)?;
    Ok(Self {
      preferred: Inlet::new(),
      inlets:    (0..inputs).map(|_| Inlet::new()).collect(),
      outlet:    Outlet::new(),
    })
  }
}

impl<T> StreamStage for MergePreferred<T>
where
  T: Send + Sync + 'static,
{
  type Shape = MergePreferredShape<T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let element = TypeId::of::<T>();
    // inlet 0 is the preferred port
    let mut inlet_ids = vec![self.preferred.id()];
    inlet_ids.extend(self.inlets.iter().map(|inlet| inlet.id()));
    let definition = StageDefinition::new(
      StageKind::MergePreferred,
      inlet_ids,
      vec![element; self.inlets.len() + 1],
      vec![self.outlet.id()],
      vec![element],
      Box::new(MergePreferredLogic { preferred: VecDeque::new(), pending: VecDeque::new(), finished: 0 }),
    );
    (MergePreferredShape::new(self.preferred, self.inlets, self.outlet), definition)
  }
}

struct MergePreferredLogic {
  preferred: VecDeque<DynValue>,
  pending:   VecDeque<(usize, DynValue)>,
  finished:  usize,
}

impl MergePreferredLogic {
  fn emit_ready(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    loop {
      if !ctx.is_available(0) {
        break;
      }
      if let Some(value) = self.preferred.pop_front() {
        ctx.push(0, value)?;
        let _ = ctx.pull(0);
        continue;
      }
      let Some((inlet, value)) = self.pending.pop_front() else {
        break;
      };
      ctx.push(0, value)?;
      let _ = ctx.pull(inlet);
    }
    if self.finished == ctx.inlet_count() && self.preferred.is_empty() && self.pending.is_empty() {
      ctx.complete_stage();
    }
    Ok(())
  }
}

impl StageLogic for MergePreferredLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    for inlet in 0..ctx.inlet_count() {
      let _ = ctx.pull(inlet);
    }
    Ok(())
  }

  fn on_push(&mut self, inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if inlet == 0 {
      self.preferred.push_back(value);
    } else {
      self.pending.push_back((inlet, value));
    }
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
