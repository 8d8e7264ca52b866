use std::collections::VecDeque;

use super::{ConnectionRuntime, DynValue, Signal, StageState, StreamError};

/// Port operations available to a stage while it is being activated.
///
/// Every operation only mutates connection state and enqueues signals; the
/// actual delivery happens when the interpreter dispatches the queue.
pub(crate) struct StageContext<'a> {
  /// Connection index per local inlet.
  pub(crate) in_conns:    &'a [usize],
  /// Connection index per local outlet.
  pub(crate) out_conns:   &'a [usize],
  pub(crate) connections: &'a mut [ConnectionRuntime],
  pub(crate) queue:       &'a mut VecDeque<Signal>,
  pub(crate) state:       &'a mut StageState,
  pub(crate) run_failure: &'a mut Option<StreamError>,
}

impl StageContext<'_> {
  /// Number of inlets on the active stage.
  pub(crate) fn inlet_count(&self) -> usize {
    self.in_conns.len()
  }

  /// Number of outlets on the active stage.
  pub(crate) fn outlet_count(&self) -> usize {
    self.out_conns.len()
  }

  /// Returns `true` when `outlet` is open and has demand for one push.
  pub(crate) fn is_available(&self, outlet: usize) -> bool {
    let conn = &self.connections[self.out_conns[outlet]];
    !conn.upstream_closed() && conn.has_demand()
  }

  /// Returns `true` when `inlet` can never deliver another element.
  pub(crate) fn is_inlet_closed(&self, inlet: usize) -> bool {
    let conn = &self.connections[self.in_conns[inlet]];
    conn.downstream_closed() || (conn.completed && conn.buffer.is_empty())
  }

  /// Requests the next element on `inlet`. Idempotent: a second pull while
  /// one is outstanding is a no-op. Returns `true` when the pull was newly
  /// initiated.
  pub(crate) fn pull(&mut self, inlet: usize) -> bool {
    let index = self.in_conns[inlet];
    let conn = &mut self.connections[index];
    if conn.cancelled || conn.finished || conn.awaiting {
      return false;
    }
    conn.awaiting = true;
    if !conn.buffer.is_empty() {
      if !conn.push_queued {
        conn.push_queued = true;
        self.queue.push_back(Signal::Push { connection: index });
      }
    } else if conn.completed {
      conn.awaiting = false;
      if !conn.finish_queued {
        conn.finish_queued = true;
        self.queue.push_back(Signal::Complete { connection: index });
      }
      return false;
    }
    true
  }

  /// Emits one element on `outlet`, consuming one unit of demand.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidDemand` when the outlet has no demand and
  /// `StreamError::Protocol` when pushing after `complete`. Pushing on a
  /// cancelled outlet drops the element silently.
  pub(crate) fn push(&mut self, outlet: usize, value: DynValue) -> Result<(), StreamError> {
    let index = self.out_conns[outlet];
    let conn = &mut self.connections[index];
    if conn.cancelled {
      return Ok(());
    }
    if conn.completed {
      return Err(StreamError::Protocol("push after complete"));
    }
    if !conn.consume_demand() {
      return Err(StreamError::InvalidDemand);
    }
    conn.buffer.push_back(value);
    if conn.awaiting && !conn.push_queued {
      conn.push_queued = true;
      self.queue.push_back(Signal::Push { connection: index });
    }
    // remaining demand keeps the producing side scheduled
    if conn.has_demand() && !conn.pull_queued {
      conn.pull_queued = true;
      self.queue.push_back(Signal::Pull { connection: index });
    }
    Ok(())
  }

  /// Marks `outlet` complete. Buffered elements are still delivered; the
  /// finish follows them.
  pub(crate) fn complete(&mut self, outlet: usize) {
    let index = self.out_conns[outlet];
    let conn = &mut self.connections[index];
    if conn.cancelled || conn.completed {
      return;
    }
    conn.completed = true;
    if conn.buffer.is_empty() && !conn.finish_queued {
      conn.finish_queued = true;
      self.queue.push_back(Signal::Complete { connection: index });
    }
  }

  /// Fails `outlet` immediately, dropping any buffered elements.
  pub(crate) fn fail(&mut self, outlet: usize, error: StreamError) {
    let index = self.out_conns[outlet];
    let conn = &mut self.connections[index];
    if conn.cancelled || conn.completed {
      return;
    }
    conn.completed = true;
    conn.buffer.clear();
    conn.failure = Some(error);
    if !conn.finish_queued {
      conn.finish_queued = true;
      self.queue.push_back(Signal::Fail { connection: index });
    }
  }

  /// Cancels `inlet` eagerly and irreversibly, dropping buffered elements.
  pub(crate) fn cancel(&mut self, inlet: usize) {
    let index = self.in_conns[inlet];
    let conn = &mut self.connections[index];
    if conn.cancelled || conn.finished {
      return;
    }
    conn.cancelled = true;
    conn.buffer.clear();
    conn.awaiting = false;
    self.queue.push_back(Signal::Cancel { connection: index });
  }

  /// Completes the whole stage: cancels open inlets, completes open outlets
  /// and transitions to `Completed`.
  pub(crate) fn complete_stage(&mut self) {
    for inlet in 0..self.in_conns.len() {
      self.cancel(inlet);
    }
    for outlet in 0..self.out_conns.len() {
      self.complete(outlet);
    }
    *self.state = StageState::Completed;
  }

  /// Fails the whole stage: cancels open inlets, fails open outlets and
  /// transitions to `Failed`. The first failure becomes the run failure.
  pub(crate) fn fail_stage(&mut self, error: StreamError) {
    if self.run_failure.is_none() {
      *self.run_failure = Some(error.clone());
    }
    for inlet in 0..self.in_conns.len() {
      self.cancel(inlet);
    }
    for outlet in 0..self.out_conns.len() {
      self.fail(outlet, error.clone());
    }
    *self.state = StageState::Failed;
  }
}
