#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use super::{DynValue, StreamError};

/// Demand outstanding on a connection. Accumulation saturates to an
/// unbounded state instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Demand {
  Finite(u64),
  Unbounded,
}

/// Runtime state of one port-to-port connection.
///
/// Every connection carries a bounded FIFO input buffer; the initial demand
/// seeded at start equals its capacity. This per-edge slack is what lets a
/// cycle turn over at all.
pub(crate) struct ConnectionRuntime {
  /// Upstream endpoint as (stage index, outlet index).
  pub(crate) from:          (usize, usize),
  /// Downstream endpoint as (stage index, inlet index).
  pub(crate) to:            (usize, usize),
  pub(crate) buffer:        VecDeque<DynValue>,
  pub(crate) capacity:      usize,
  demand:                   Demand,
  /// Downstream has an unsatisfied pull outstanding.
  pub(crate) awaiting:      bool,
  /// A `Push` signal for this connection is already queued.
  pub(crate) push_queued:   bool,
  /// A `Pull` signal for this connection is already queued.
  pub(crate) pull_queued:   bool,
  /// Upstream marked the connection complete; no more pushes arrive.
  pub(crate) completed:     bool,
  /// A `Complete` or `Fail` signal has been queued for delivery.
  pub(crate) finish_queued: bool,
  /// The finish was delivered downstream.
  pub(crate) finished:      bool,
  pub(crate) cancelled:     bool,
  pub(crate) failure:       Option<StreamError>,
}

impl ConnectionRuntime {
  pub(crate) fn new(from: (usize, usize), to: (usize, usize), capacity: usize) -> Self {
    Self {
      from,
      to,
      buffer: VecDeque::with_capacity(capacity),
      capacity,
      demand: Demand::Finite(0),
      awaiting: false,
      push_queued: false,
      pull_queued: false,
      completed: false,
      finish_queued: false,
      finished: false,
      cancelled: false,
      failure: None,
    }
  }

  /// The upstream side can no longer push.
  pub(crate) const fn upstream_closed(&self) -> bool {
    self.cancelled || self.completed
  }

  /// The downstream side can no longer receive.
  pub(crate) const fn downstream_closed(&self) -> bool {
    self.cancelled || self.finished
  }

  /// Returns `true` when at least one more element may be pushed.
  pub(crate) const fn has_demand(&self) -> bool {
    match self.demand {
      | Demand::Unbounded => true,
      | Demand::Finite(value) => value > 0,
    }
  }

  /// Grants `amount` more units of demand.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidDemand` when `amount` is zero.
  pub(crate) const fn request_demand(&mut self, amount: u64) -> Result<Demand, StreamError> {
    if amount == 0 {
      return Err(StreamError::InvalidDemand);
    }

    self.demand = match self.demand {
      | Demand::Unbounded => Demand::Unbounded,
      | Demand::Finite(current) => match current.checked_add(amount) {
        | Some(total) => Demand::Finite(total),
        | None => Demand::Unbounded,
      },
    };
    Ok(self.demand)
  }

  /// Consumes one unit of demand when available.
  #[must_use]
  pub(crate) const fn consume_demand(&mut self) -> bool {
    match self.demand {
      | Demand::Unbounded => true,
      | Demand::Finite(value) if value > 0 => {
        self.demand = Demand::Finite(value - 1);
        true
      },
      | Demand::Finite(_) => false,
    }
  }
}
