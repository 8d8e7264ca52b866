use super::{DynValue, StageContext, StreamError};

/// Activation interface of a stage, driven by the interpreter.
///
/// Ports are addressed by local index (inlet 0..n, outlet 0..m). Defaults
/// encode the common lifecycle: upstream finish and downstream cancel
/// complete the stage, upstream failure fails it. Any `Err` returned from an
/// activation fails the stage with that error.
pub(crate) trait StageLogic: Send {
  /// Called once before the first signal is dispatched.
  fn on_start(&mut self, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Ok(())
  }

  /// An element previously pulled on `inlet` has arrived.
  fn on_push(&mut self, _inlet: usize, _value: DynValue, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Err(StreamError::Protocol("push delivered to a stage without inlets"))
  }

  /// Downstream demand became available on `outlet`.
  fn on_pull(&mut self, _outlet: usize, _ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    Ok(())
  }

  /// Upstream of `inlet` completed and all its buffered elements were
  /// consumed.
  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.complete_stage();
    Ok(())
  }

  /// Upstream of `inlet` failed.
  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    ctx.fail_stage(error);
    Ok(())
  }

  /// Downstream of `outlet` cancelled.
  fn on_downstream_cancel(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.complete_stage();
    Ok(())
  }

  /// Chance to inject externally arrived input (test probes). Returns
  /// `true` when the stage made progress.
  fn on_tick(&mut self, _ctx: &mut StageContext<'_>) -> Result<bool, StreamError> {
    Ok(false)
  }

  /// The whole run is being cancelled.
  fn on_run_cancel(&mut self, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    ctx.complete_stage();
    Ok(())
  }
}
