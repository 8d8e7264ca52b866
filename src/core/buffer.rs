#[cfg(test)]
mod tests;

use crate::core::{
  DynValue, FlowShape, Inlet, Outlet, OverflowStrategy, StageContext, StageDefinition, StageKind, StageLogic,
  StreamBuffer, StreamError, StreamStage, validate_positive_argument,
};

/// Bounded buffer stage decoupling upstream from downstream.
///
/// Within capacity the stage keeps pulling regardless of downstream demand;
/// what happens beyond capacity is governed by the [`OverflowStrategy`].
/// Under `Backpressure` a full buffer simply stops pulling, which is the
/// slack a cycle closed with [`Flow::join`](super::Flow::join) usually
/// needs.
pub struct Buffer<T> {
  inlet:  Inlet<T>,
  outlet: Outlet<T>,
  queue:  StreamBuffer<DynValue>,
}

impl<T> Buffer<T>
where
  T: Send + Sync + 'static,
{
  /// Creates a buffer stage with the given capacity and overflow strategy.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `capacity` is zero.
  pub fn new(capacity: usize, strategy: OverflowStrategy) -> Result<Self, StreamError> {
    validate_positive_argument("capacity", capacity)?;
    Ok(Self {
      inlet:  Inlet::new(),
      outlet: Outlet::new(),
      queue:  StreamBuffer::new(capacity, strategy)?,
    })
  }
}

impl<T> StreamStage for Buffer<T>
where
  T: Send + Sync + 'static,
{
  type Shape = FlowShape<T, T>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let definition = StageDefinition::linear::<T, T>(
      StageKind::Buffer,
      self.inlet.id(),
      self.outlet.id(),
      Box::new(BufferLogic { queue: self.queue, completing: false }),
    );
    (FlowShape::new(self.inlet, self.outlet), definition)
  }
}

struct BufferLogic {
  queue:      StreamBuffer<DynValue>,
  completing: bool,
}

impl BufferLogic {
  fn gate_open(&self) -> bool {
    !(self.queue.strategy() == OverflowStrategy::Backpressure && self.queue.is_full())
  }
}

impl StageLogic for BufferLogic {
  fn on_start(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.queue.is_empty() && ctx.is_available(0) {
      ctx.push(0, value)?;
    } else {
      let _ = self.queue.offer(value)?;
    }
    if self.gate_open() {
      let _ = ctx.pull(0);
    }
    Ok(())
  }

  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if let Some(value) = self.queue.poll() {
      ctx.push(0, value)?;
    }
    if self.completing {
      if self.queue.is_empty() {
        ctx.complete_stage();
      }
      return Ok(());
    }
    let _ = ctx.pull(0);
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.queue.is_empty() {
      ctx.complete_stage();
    } else {
      self.completing = true;
    }
    Ok(())
  }
}
