//! Cooperative interpreter over a sealed stream graph.

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use hashbrown::HashMap;
use tracing::{debug, trace};

use super::{
  ConnectionRuntime, DriveOutcome, MaterializerSettings, PortId, Signal, StageContext, StageId, StageKind, StageLogic,
  StageState, StreamError, StreamGraph, StreamState, validate_positive_argument,
};

struct StageRuntime {
  kind:  StageKind,
  logic: Option<Box<dyn StageLogic>>,
  state: StageState,
}

struct StagePorts {
  ins:  Vec<usize>,
  outs: Vec<usize>,
}

/// Executes one materialized run of a stream graph.
///
/// Signals are dispatched from an explicit work queue, one stage activation
/// at a time. Cycles are legal: every connection carries a bounded input
/// buffer seeded with demand equal to its capacity, which is the slack a
/// loop needs to turn over. A run that stops making progress without
/// finishing stays `Running` and `drive` reports `Idle` — stalls are
/// observable, never an error.
pub struct GraphInterpreter {
  stages:      Vec<StageRuntime>,
  ports:       Vec<StagePorts>,
  connections: Vec<ConnectionRuntime>,
  queue:       VecDeque<Signal>,
  state:       StreamState,
  failure:     Option<StreamError>,
}

impl GraphInterpreter {
  pub(crate) fn new(graph: StreamGraph, settings: &MaterializerSettings) -> Result<Self, StreamError> {
    validate_positive_argument("input_buffer", settings.input_buffer())?;
    let (definitions, links) = graph.into_parts();

    let mut inlet_of: HashMap<PortId, (usize, usize)> = HashMap::new();
    let mut outlet_of: HashMap<PortId, (usize, usize)> = HashMap::new();
    for (stage_index, definition) in definitions.iter().enumerate() {
      for (local, port) in definition.inlets.iter().enumerate() {
        inlet_of.insert(*port, (stage_index, local));
      }
      for (local, port) in definition.outlets.iter().enumerate() {
        outlet_of.insert(*port, (stage_index, local));
      }
    }

    let mut ports: Vec<StagePorts> = definitions
      .iter()
      .map(|definition| StagePorts {
        ins:  vec![usize::MAX; definition.inlets.len()],
        outs: vec![usize::MAX; definition.outlets.len()],
      })
      .collect();
    let mut connections = Vec::with_capacity(links.len());
    for (from, to) in links {
      let Some(&(from_stage, outlet)) = outlet_of.get(&from) else {
        return Err(StreamError::UnknownPort);
      };
      let Some(&(to_stage, inlet)) = inlet_of.get(&to) else {
        return Err(StreamError::UnknownPort);
      };
      let index = connections.len();
      connections.push(ConnectionRuntime::new(
        (from_stage, outlet),
        (to_stage, inlet),
        settings.input_buffer(),
      ));
      ports[from_stage].outs[outlet] = index;
      ports[to_stage].ins[inlet] = index;
    }
    for stage_ports in &ports {
      if stage_ports.ins.iter().chain(stage_ports.outs.iter()).any(|&index| index == usize::MAX) {
        return Err(StreamError::UnconnectedPort);
      }
    }

    let stages = definitions
      .into_iter()
      .map(|definition| StageRuntime { kind: definition.kind, logic: Some(definition.logic), state: StageState::Idle })
      .collect();
    Ok(Self {
      stages,
      ports,
      connections,
      queue: VecDeque::new(),
      state: StreamState::Idle,
      failure: None,
    })
  }

  /// Seeds initial demand on every connection and starts all stages.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidDemand` when demand seeding is violated;
  /// this cannot happen for a validated settings object.
  pub(crate) fn start(&mut self) -> Result<(), StreamError> {
    if self.state != StreamState::Idle {
      return Ok(());
    }
    self.state = StreamState::Running;
    debug!(stages = self.stages.len(), connections = self.connections.len(), "stream started");
    for index in 0..self.connections.len() {
      let capacity = self.connections[index].capacity as u64;
      let _ = self.connections[index].request_demand(capacity)?;
      self.connections[index].pull_queued = true;
      self.queue.push_back(Signal::Pull { connection: index });
    }
    for stage in 0..self.stages.len() {
      self.activate(stage, |logic, ctx| logic.on_start(ctx));
      self.refresh_stage_state(stage);
    }
    Ok(())
  }

  /// Dispatches queued signals until the queue drains and no stage reports
  /// external progress.
  pub fn drive(&mut self) -> DriveOutcome {
    if self.state != StreamState::Running {
      return DriveOutcome::Idle;
    }
    let mut progressed = false;
    loop {
      let mut moved = false;
      while let Some(signal) = self.queue.pop_front() {
        self.dispatch(signal);
        moved = true;
      }
      for stage in 0..self.stages.len() {
        let mut ticked = false;
        self.activate(stage, |logic, ctx| {
          ticked = logic.on_tick(ctx)?;
          Ok(())
        });
        if ticked {
          self.refresh_stage_state(stage);
          moved = true;
        }
      }
      if !moved {
        break;
      }
      progressed = true;
    }
    self.finalize_if_settled();
    if progressed {
      DriveOutcome::Progressed
    } else {
      DriveOutcome::Idle
    }
  }

  /// Cancels the whole run: every live stage receives `on_run_cancel`, the
  /// resulting signals are drained and the run transitions to `Cancelled`.
  pub fn cancel(&mut self) {
    if self.state.is_terminal() {
      return;
    }
    debug!("stream cancel requested");
    for stage in 0..self.stages.len() {
      self.activate(stage, |logic, ctx| logic.on_run_cancel(ctx));
    }
    while let Some(signal) = self.queue.pop_front() {
      self.dispatch(signal);
    }
    self.state = StreamState::Cancelled;
  }

  /// Returns the run state.
  #[must_use]
  pub const fn state(&self) -> StreamState {
    self.state
  }

  /// Returns the failure that terminated the run, if any.
  #[must_use]
  pub const fn failure(&self) -> Option<&StreamError> {
    self.failure.as_ref()
  }

  /// Returns the lifecycle state of every stage, in arena order.
  #[must_use]
  pub fn stage_states(&self) -> Vec<(StageId, StageState)> {
    self
      .stages
      .iter()
      .enumerate()
      .map(|(index, stage)| (StageId::new(index), stage.state))
      .collect()
  }

  fn dispatch(&mut self, signal: Signal) {
    trace!(?signal, "dispatching");
    match signal {
      | Signal::Pull { connection } => {
        let (stage, outlet) = self.connections[connection].from;
        {
          let conn = &mut self.connections[connection];
          conn.pull_queued = false;
          if conn.upstream_closed() || !conn.has_demand() {
            return;
          }
        }
        self.activate(stage, |logic, ctx| logic.on_pull(outlet, ctx));
        self.refresh_stage_state(stage);
      },
      | Signal::Push { connection } => {
        let (stage, inlet) = self.connections[connection].to;
        let value = {
          let conn = &mut self.connections[connection];
          conn.push_queued = false;
          if conn.cancelled {
            return;
          }
          let Some(value) = conn.buffer.pop_front() else {
            return;
          };
          conn.awaiting = false;
          // the freed slot replenishes upstream demand
          let _ = conn.request_demand(1);
          if !conn.completed && !conn.pull_queued {
            conn.pull_queued = true;
            self.queue.push_back(Signal::Pull { connection });
          }
          if conn.completed && conn.buffer.is_empty() && !conn.finish_queued {
            conn.finish_queued = true;
            self.queue.push_back(Signal::Complete { connection });
          }
          value
        };
        self.activate(stage, |logic, ctx| logic.on_push(inlet, value, ctx));
        self.refresh_stage_state(stage);
      },
      | Signal::Complete { connection } => {
        let (stage, inlet) = self.connections[connection].to;
        {
          let conn = &mut self.connections[connection];
          if conn.cancelled || conn.finished {
            return;
          }
          conn.finished = true;
        }
        self.activate(stage, |logic, ctx| logic.on_upstream_finish(inlet, ctx));
        self.refresh_stage_state(stage);
      },
      | Signal::Fail { connection } => {
        let (stage, inlet) = self.connections[connection].to;
        let error = {
          let conn = &mut self.connections[connection];
          if conn.cancelled || conn.finished {
            return;
          }
          conn.finished = true;
          conn.failure.take().unwrap_or(StreamError::Protocol("failure without a cause"))
        };
        self.activate(stage, |logic, ctx| logic.on_upstream_failure(inlet, error, ctx));
        self.refresh_stage_state(stage);
      },
      | Signal::Cancel { connection } => {
        let (stage, outlet) = self.connections[connection].from;
        self.activate(stage, |logic, ctx| logic.on_downstream_cancel(outlet, ctx));
        self.refresh_stage_state(stage);
      },
    }
  }

  fn activate<F>(&mut self, stage_index: usize, activation: F)
  where
    F: FnOnce(&mut dyn StageLogic, &mut StageContext<'_>) -> Result<(), StreamError>, {
    if self.stages[stage_index].state.is_terminal() {
      return;
    }
    let Some(mut logic) = self.stages[stage_index].logic.take() else {
      return;
    };
    let mut state = self.stages[stage_index].state;
    let result = {
      let mut ctx = StageContext {
        in_conns:    &self.ports[stage_index].ins,
        out_conns:   &self.ports[stage_index].outs,
        connections: &mut self.connections,
        queue:       &mut self.queue,
        state:       &mut state,
        run_failure: &mut self.failure,
      };
      activation(logic.as_mut(), &mut ctx)
    };
    if let Err(error) = result {
      debug!(kind = ?self.stages[stage_index].kind, %error, "stage activation failed");
      let mut ctx = StageContext {
        in_conns:    &self.ports[stage_index].ins,
        out_conns:   &self.ports[stage_index].outs,
        connections: &mut self.connections,
        queue:       &mut self.queue,
        state:       &mut state,
        run_failure: &mut self.failure,
      };
      ctx.fail_stage(error);
    }
    self.stages[stage_index].logic = Some(logic);
    self.stages[stage_index].state = state;
  }

  fn refresh_stage_state(&mut self, stage_index: usize) {
    if self.stages[stage_index].state.is_terminal() {
      return;
    }
    let stage_ports = &self.ports[stage_index];
    let all_closed = stage_ports.ins.iter().all(|&index| self.connections[index].downstream_closed())
      && stage_ports.outs.iter().all(|&index| self.connections[index].upstream_closed());
    if all_closed {
      self.stages[stage_index].state = StageState::Completed;
      return;
    }
    let any_closed = stage_ports.ins.iter().any(|&index| self.connections[index].downstream_closed())
      || stage_ports.outs.iter().any(|&index| self.connections[index].upstream_closed());
    let awaiting_input = stage_ports
      .ins
      .iter()
      .any(|&index| self.connections[index].awaiting && !self.connections[index].downstream_closed());
    self.stages[stage_index].state = if any_closed {
      StageState::Completing
    } else if awaiting_input {
      StageState::AwaitingInput
    } else {
      StageState::AwaitingDemand
    };
  }

  fn finalize_if_settled(&mut self) {
    if self.state != StreamState::Running || !self.queue.is_empty() {
      return;
    }
    if self.stages.iter().all(|stage| stage.state.is_terminal()) {
      self.state = match self.failure {
        | Some(_) => StreamState::Failed,
        | None => StreamState::Completed,
      };
      debug!(state = ?self.state, "stream settled");
    }
  }
}
