use core::any::TypeId;

use crate::core::{
  DynValue, FanInShape2, Inlet, Outlet, StageContext, StageDefinition, StageKind, StageLogic, StreamError,
  StreamStage, downcast_value,
};

/// Pairing two-input fan-in emitting `(A, B)` tuples.
///
/// Pulls whichever side is missing its half of the next pair. Completes as
/// soon as a completed input has no pending half, because no further pair
/// can ever be formed.
pub struct Zip<A, B> {
  in0:    Inlet<A>,
  in1:    Inlet<B>,
  outlet: Outlet<(A, B)>,
}

impl<A, B> Zip<A, B>
where
  A: Send + Sync + 'static,
  B: Send + Sync + 'static,
{
  /// Creates a zip junction.
  #[must_use]
  pub fn new() -> Self {
    Self { in0: Inlet::new(), in1: Inlet::new(), outlet: Outlet::new() }
  }
}

impl<A, B> Default for Zip<A, B>
where
  A: Send + Sync + 'static,
  B: Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<A, B> StreamStage for Zip<A, B>
where
  A: Send + Sync + 'static,
  B: Send + Sync + 'static,
{
  type Shape = FanInShape2<A, B, (A, B)>;

  fn into_parts(self) -> (Self::Shape, StageDefinition) {
    let definition = StageDefinition::new(
      StageKind::Zip,
      vec![self.in0.id(), self.in1.id()],
      vec![TypeId::of::<A>(), TypeId::of::<B>()],
      vec![self.outlet.id()],
      vec![TypeId::of::<(A, B)>()],
      Box::new(ZipLogic::<A, B> { left: None, right: None, left_done: false, right_done: false }),
    );
    (FanInShape2::new(self.in0, self.in1, self.outlet), definition)
  }
}

struct ZipLogic<A, B> {
  left:       Option<A>,
  right:      Option<B>,
  left_done:  bool,
  right_done: bool,
}

impl<A, B> ZipLogic<A, B>
where
  A: Send + Sync + 'static,
  B: Send + Sync + 'static,
{
  fn try_emit(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.left.is_some() && self.right.is_some() && ctx.is_available(0) {
      let pair = (self.left.take(), self.right.take());
      if let (Some(left), Some(right)) = pair {
        ctx.push(0, Box::new((left, right)))?;
      }
      if self.left_done || self.right_done {
        ctx.complete_stage();
      }
    }
    Ok(())
  }
}

impl<A, B> StageLogic for ZipLogic<A, B>
where
  A: Send + Sync + 'static,
  B: Send + Sync + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if self.left.is_none() && !self.left_done {
      let _ = ctx.pull(0);
    }
    if self.right.is_none() && !self.right_done {
      let _ = ctx.pull(1);
    }
    self.try_emit(ctx)
  }

  fn on_push(&mut self, inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if inlet == 0 {
      self.left = Some(downcast_value::<A>(value)?);
    } else {
      self.right = Some(downcast_value::<B>(value)?);
    }
    self.try_emit(ctx)
  }

  fn on_upstream_finish(&mut self, inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    if inlet == 0 {
      self.left_done = true;
      if self.left.is_none() {
        ctx.complete_stage();
      }
    } else {
      self.right_done = true;
      if self.right.is_none() {
        ctx.complete_stage();
      }
    }
    Ok(())
  }
}
