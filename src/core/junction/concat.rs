use core::any::TypeId;

use crate::core::{
  DynValue, Inlet, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError, StreamStage,
  UniformFanInShape, validate_positive_argument,
};

/// Sequential n-way fan-in.
///
/// Drains input 0 to completion, then input 1, and so on; a later input is
/// never pulled before every earlier one completed. Completes after the
/// last input.
pub struct Concat<T> {
  inlets: Vec<Inlet<T>>,
  outlet: Outlet<T>,
}

impl<T> Concat<T>
where
  T: Send + Sync + 'static,
{
  /// Creates a concat over `inputs` inlets.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `inputs` is zero.
  pub fn new(inputs: usize) -> Result<Self, StreamError> {
    validate_positive_argument("inputs", inputs)?;
    Ok(Self { inlets: (0..inputs).map(|_| Inlet::new()).collect(), outlet: Outlet::new() })
  }
}

impl<T> StreamStage for Concat<T>
where
  T: Send + Sync + 'static,
{
  type Shape = UniformFanInShape<T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let element = TypeId::of::<T>();
    let inputs = self.inlets.len();
    let definition = StageDefinition::new(
      StageKind::Concat,
      self.inlets.iter().map(|inlet| inlet.id()).collect(),
      vec![element; inputs],
      vec![self.outlet.id()],
      vec![element],
      Box::new(ConcatLogic { active: 0, inputs }),
    );
    (UniformFanInShape::new(self.inlets, self.outlet), definition)
  }
}

struct ConcatLogic {
  active: usize,
  inputs: usize,
}

impl ConcatLogic {
  fn advance(&mut self, ctx: &mut StageContext<'_>) {
    self.active += 1;
    // inputs that completed before their turn are skipped
    while self.active < self.inputs && ctx.is_inlet_closed(self.active) {
      self.active += 1;
    }
    if self.active == self.inputs {
      ctx.complete_stage();
    } else if ctx.is_available(0) {
      let _ = ctx.pull(self.active);
    }
  }
}

impl StageLogic for ConcatLogic {
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.active < self.inputs {
      let _ = ctx.pull(self.active);
    }
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.push(0, value)
  }

  fn on_upstream_finish(&mut self, inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if inlet == self.active {
      self.advance(ctx);
    }
    Ok(())
  }
}
