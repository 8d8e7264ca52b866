use core::any::TypeId;

use hashbrown::HashMap;

use super::{PortId, StageDefinition, StreamError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortDirection {
  In,
  Out,
}

struct PortRecord {
  direction: PortDirection,
  element:   TypeId,
  connected: bool,
}

/// Untyped blueprint of stages and port-to-port connections.
///
/// Wiring is validated as it happens (direction, element type, single use
/// per port); sealing validates that no port other than the exposed ones is
/// left dangling. Cycles are never rejected.
pub(crate) struct StreamGraph {
  stages: Vec<StageDefinition>,
  links:  Vec<(PortId, PortId)>,
  ports:  HashMap<PortId, PortRecord>,
}

impl StreamGraph {
  pub(crate) fn new() -> Self {
    Self { stages: Vec::new(), links: Vec::new(), ports: HashMap::new() }
  }

  pub(crate) fn add_stage(&mut self, definition: StageDefinition) {
    for (port, element) in definition.inlets.iter().zip(definition.inlet_types.iter()) {
      self
        .ports
        .insert(*port, PortRecord { direction: PortDirection::In, element: *element, connected: false });
    }
    for (port, element) in definition.outlets.iter().zip(definition.outlet_types.iter()) {
      self
        .ports
        .insert(*port, PortRecord { direction: PortDirection::Out, element: *element, connected: false });
    }
    self.stages.push(definition);
  }

  /// Wires `from` to `to`.
  ///
  /// # Errors
  ///
  /// Returns `UnknownPort` for unregistered ports, `InvalidConnection` for
  /// direction mismatches, `PortAlreadyConnected` for double wiring and
  /// `TypeMismatch` when the element types disagree.
  pub(crate) fn connect(&mut self, from: PortId, to: PortId) -> Result<(), StreamError> {
    let from_element = {
      let record = self.ports.get(&from).ok_or(StreamError::UnknownPort)?;
      if record.direction != PortDirection::Out {
        return Err(StreamError::InvalidConnection);
      }
      if record.connected {
        return Err(StreamError::PortAlreadyConnected);
      }
      record.element
    };
    {
      let record = self.ports.get(&to).ok_or(StreamError::UnknownPort)?;
      if record.direction != PortDirection::In {
        return Err(StreamError::InvalidConnection);
      }
      if record.connected {
        return Err(StreamError::PortAlreadyConnected);
      }
      if record.element != from_element {
        return Err(StreamError::TypeMismatch);
      }
    }
    if let Some(record) = self.ports.get_mut(&from) {
      record.connected = true;
    }
    if let Some(record) = self.ports.get_mut(&to) {
      record.connected = true;
    }
    self.links.push((from, to));
    Ok(())
  }

  /// Merges `other` into `self` without adding any connection.
  pub(crate) fn absorb(&mut self, other: Self) {
    self.stages.extend(other.stages);
    self.links.extend(other.links);
    self.ports.extend(other.ports);
  }

  /// Validates that the graph is non-empty and every port is connected.
  ///
  /// # Errors
  ///
  /// Returns `InvalidConnection` for an empty graph and `UnconnectedPort`
  /// when a port dangles.
  pub(crate) fn validate_closed(&self) -> Result<(), StreamError> {
    if self.stages.is_empty() {
      return Err(StreamError::InvalidConnection);
    }
    if self.ports.values().any(|record| !record.connected) {
      return Err(StreamError::UnconnectedPort);
    }
    Ok(())
  }

  /// Validates that exactly the `exposed` ports are unconnected.
  ///
  /// # Errors
  ///
  /// Returns `UnknownPort` when an exposed port is unregistered,
  /// `PortAlreadyConnected` when it was claimed by a connection and
  /// `UnconnectedPort` when any other port dangles.
  pub(crate) fn validate_exposed(&self, exposed: &[PortId]) -> Result<(), StreamError> {
    for port in exposed {
      let record = self.ports.get(port).ok_or(StreamError::UnknownPort)?;
      if record.connected {
        return Err(StreamError::PortAlreadyConnected);
      }
    }
    for (port, record) in &self.ports {
      if !record.connected && !exposed.contains(port) {
        return Err(StreamError::UnconnectedPort);
      }
    }
    Ok(())
  }

  pub(crate) fn into_parts(self) -> (Vec<StageDefinition>, Vec<(PortId, PortId)>) {
    (self.stages, self.links)
  }
}
