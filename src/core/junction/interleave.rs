#[cfg(test)]
mod tests;

use core::any::TypeId;

use crate::core::{
  DynValue, Inlet, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError, StreamStage,
  UniformFanInShape, validate_positive_argument,
};

/// Segment-rotating n-way fan-in.
///
/// Forwards `segment_size` consecutive elements from the current input,
/// then rotates to the next live input in port order. Completes when every
/// input completed.
pub struct Interleave<T> {
  inlets:  Vec<Inlet<T>>,
  outlet:  Outlet<T>,
  segment: usize,
}

impl<T> Interleave<T>
where
  T: Send + Sync + 'static,
{
  /// Creates an interleave over `inputs` inlets with the given segment
  /// length.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `inputs` or
  /// `segment_size` is zero.
  pub fn new(inputs: usize, segment_size: usize) -> Result<Self, StreamError> {
    validate_positive_argument("inputs", inputs)?;
    validate_positive_argument("segment_size", segment_size)?;
    Ok(Self {
      inlets:  (0..inputs).map(|_| Inlet::new()).collect(),
      outlet:  Outlet::new(),
      segment: segment_size,
    })
  }
}

impl<T> StreamStage for Interleave<T>
where
  T: Send + Sync + 'static,
{
  type Shape = UniformFanInShape<T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let element = TypeId::of::<T>();
    let inputs = self.inlets.len();
    let definition = StageDefinition::new(
      StageKind::Interleave,
      self.inlets.iter().map(|inlet| inlet.id()).collect(),
      vec![element; inputs],
      vec![self.outlet.id()],
      vec![element],
      Box::new(InterleaveLogic { inputs, segment: self.segment, current: 0, taken: 0, finished: 0 }),
    );
    (UniformFanInShape::new(self.inlets, self.outlet), definition)
  }
}

struct InterleaveLogic {
  inputs:   usize,
  segment:  usize,
  current:  usize,
  taken:    usize,
  finished: usize,
}

impl InterleaveLogic {
  fn rotate(&mut self, ctx: &mut StageContext<'_>) {
    self.taken = 0;
    for offset in 1..=self.inputs {
      let candidate = (self.current + offset) % self.inputs;
      if !ctx.is_inlet_closed(candidate) {
        self.current = candidate;
        return;
      }
    }
  }
}

impl StageLogic for InterleaveLogic {
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.finished < self.inputs {
      let _ = ctx.pull(self.current);
    }
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.push(0, value)?;
    self.taken += 1;
    if self.taken >= self.segment {
      self.rotate(ctx);
    }
    Ok(())
  }

  fn on_upstream_finish(&mut self, inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.finished += 1;
    if self.finished == self.inputs {
      ctx.complete_stage();
      return Ok(());
    }
    if inlet == self.current {
      self.rotate(ctx);
      if ctx.is_available(0) {
        let _ = ctx.pull(self.current);
      }
    }
    Ok(())
  }
}
