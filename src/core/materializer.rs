use tracing::debug;

use super::{GraphInterpreter, MaterializerSettings, StreamError, StreamGraph, StreamHandle};

/// Turns runnable graphs into running interpreters.
pub struct StreamMaterializer {
  settings: MaterializerSettings,
}

impl StreamMaterializer {
  /// Creates a materializer with default settings.
  #[must_use]
  pub fn new() -> Self {
    Self { settings: MaterializerSettings::new() }
  }

  /// Creates a materializer with the given settings.
  #[must_use]
  pub const fn with_settings(settings: MaterializerSettings) -> Self {
    Self { settings }
  }

  /// Returns the settings.
  #[must_use]
  pub const fn settings(&self) -> MaterializerSettings {
    self.settings
  }

  pub(crate) fn materialize(&mut self, graph: StreamGraph) -> Result<StreamHandle, StreamError> {
    let mut interpreter = GraphInterpreter::new(graph, &self.settings)?;
    interpreter.start()?;
    debug!(input_buffer = self.settings.input_buffer(), "graph materialized");
    let handle = StreamHandle::new(interpreter);
    let _ = handle.drive_until_settled();
    Ok(handle)
  }
}

impl Default for StreamMaterializer {
  fn default() -> Self {
    Self::new()
  }
}
