use core::fmt::Debug;
use std::{collections::VecDeque, sync::Arc};

use spin::Mutex;

use crate::core::{DynValue, StageContext, StageLogic, StreamError, downcast_value};

use super::ProbeEvent;

struct SinkProbeState<T> {
  requested: u64,
  events:    VecDeque<ProbeEvent<T>>,
  cancel:    bool,
}

/// Test-side handle observing a probe sink.
pub struct TestSinkProbe<T> {
  shared: Arc<Mutex<SinkProbeState<T>>>,
}

impl<T> Clone for TestSinkProbe<T> {
  fn clone(&self) -> Self {
    Self { shared: self.shared.clone() }
  }
}

impl<T> TestSinkProbe<T>
where
  T: Send + Sync + 'static,
{
  pub(crate) fn create() -> (Self, Box<dyn StageLogic>) {
    let shared = Arc::new(Mutex::new(SinkProbeState { requested: 0, events: VecDeque::new(), cancel: false }));
    (Self { shared: shared.clone() }, Box::new(SinkProbeLogic { shared }))
  }

  /// Grants demand for `count` more elements.
  pub fn request(&self, count: u64) {
    self.shared.lock().requested += count;
  }

  /// Cancels upstream on the next drive.
  pub fn cancel(&self) {
    self.shared.lock().cancel = true;
  }

  /// Removes and returns the oldest recorded event, if any.
  #[must_use]
  pub fn try_next(&self) -> Option<ProbeEvent<T>> {
    self.shared.lock().events.pop_front()
  }

  /// Removes the oldest event, which must be an element.
  ///
  /// # Panics
  ///
  /// Panics when the next event is not an element.
  pub fn expect_next(&self) -> T
  where
    T: Debug, {
    match self.try_next() {
      | Some(ProbeEvent::Next(value)) => value,
      | other => panic!("expected an element, got {other:?}"),
    }
  }

  /// Removes the oldest event, which must be the completion.
  ///
  /// # Panics
  ///
  /// Panics when the next event is not the completion.
  pub fn expect_complete(&self)
  where
    T: Debug, {
    match self.try_next() {
      | Some(ProbeEvent::Complete) => {},
      | other => panic!("expected completion, got {other:?}"),
    }
  }

  /// Removes the oldest event, which must be a failure, and returns its
  /// error.
  ///
  /// # Panics
  ///
  /// Panics when the next event is not a failure.
  pub fn expect_error(&self) -> StreamError
  where
    T: Debug, {
    match self.try_next() {
      | Some(ProbeEvent::Error(error)) => error,
      | other => panic!("expected a failure, got {other:?}"),
    }
  }
}

struct SinkProbeLogic<T> {
  shared: Arc<Mutex<SinkProbeState<T>>>,
}

impl<T> StageLogic for SinkProbeLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_push(&mut self, _inlet: usize, value: DynValue, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    let value = downcast_value::<T>(value)?;
    let more = {
      let mut guard = self.shared.lock();
      guard.requested = guard.requested.saturating_sub(1);
      guard.events.push_back(ProbeEvent::Next(value));
      guard.requested > 0
    };
    if more {
      let _ = ctx.pull(0);
    }
    Ok(())
  }

  fn on_upstream_finish(&mut self, _inlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.shared.lock().events.push_back(ProbeEvent::Complete);
    ctx.complete_stage();
    Ok(())
  }

  fn on_upstream_failure(
    &mut self,
    _inlet: usize,
    error: StreamError,
    ctx: &mut StageContext<'_>,
  ) -> Result<(), StreamError> {
    self.shared.lock().events.push_back(ProbeEvent::Error(error.clone()));
    ctx.fail_stage(error);
    Ok(())
  }

  fn on_tick(&mut self, ctx: &mut StageContext<'_>) -> Result<bool, StreamError> {
    let cancel = {
      let mut guard = self.shared.lock();
      core::mem::replace(&mut guard.cancel, false)
    };
    if cancel {
      ctx.complete_stage();
      return Ok(true);
    }
    let wants = { self.shared.lock().requested > 0 };
    if wants {
      return Ok(ctx.pull(0));
    }
    Ok(false)
  }
}
