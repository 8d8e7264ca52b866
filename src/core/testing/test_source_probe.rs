use std::{collections::VecDeque, sync::Arc};

use spin::Mutex;

use crate::core::{StageContext, StageLogic, StreamError};

struct SourceProbeState<T> {
  queue:     VecDeque<T>,
  completed: bool,
  failed:    Option<StreamError>,
}

/// Test-side handle feeding a probe source.
pub struct TestSourceProbe<T> {
  shared: Arc<Mutex<SourceProbeState<T>>>,
}

impl<T> Clone for TestSourceProbe<T> {
  fn clone(&self) -> Self {
    Self { shared: self.shared.clone() }
  }
}

impl<T> TestSourceProbe<T>
where
  T: Send + Sync + 'static,
{
  pub(crate) fn create() -> (Self, Box<dyn StageLogic>) {
    let shared = Arc::new(Mutex::new(SourceProbeState { queue: VecDeque::new(), completed: false, failed: None }));
    (Self { shared: shared.clone() }, Box::new(SourceProbeLogic { shared }))
  }

  /// Queues one element; it flows on the next drive with demand.
  pub fn send_next(&self, value: T) {
    self.shared.lock().queue.push_back(value);
  }

  /// Completes the source once the queued elements drained.
  pub fn send_complete(&self) {
    self.shared.lock().completed = true;
  }

  /// Fails the source on the next drive.
  pub fn send_error(&self, error: StreamError) {
    self.shared.lock().failed = Some(error);
  }
}

struct SourceProbeLogic<T> {
  shared: Arc<Mutex<SourceProbeState<T>>>,
}

impl<T> SourceProbeLogic<T>
where
  T: Send + Sync + 'static,
{
  fn drain(&mut self, ctx: &mut StageContext<'_>) -> Result<bool, StreamError> {
    let mut progressed = false;
    loop {
      let failed = { self.shared.lock().failed.take() };
      if let Some(error) = failed {
        ctx.fail_stage(error);
        return Ok(true);
      }
      if !ctx.is_available(0) {
        break;
      }
      let next = { self.shared.lock().queue.pop_front() };
      match next {
        | Some(value) => {
          ctx.push(0, Box::new(value))?;
          progressed = true;
        },
        | None => break,
      }
    }
    let completed = {
      let guard = self.shared.lock();
      guard.completed && guard.queue.is_empty()
    };
    if completed {
      ctx.complete_stage();
      progressed = true;
    }
    Ok(progressed)
  }
}

impl<T> StageLogic for SourceProbeLogic<T>
where
  T: Send + Sync + 'static,
{
  fn on_pull(&mut self, _outlet: usize, ctx: &mut StageContext<'_>) -> Result<(), StreamError> {
    self.drain(ctx).map(|_| ())
  }

  fn on_tick(&mut self, ctx: &mut StageContext<'_>) -> Result<bool, StreamError> {
    self.drain(ctx)
  }
}
