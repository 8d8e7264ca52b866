const DEFAULT_INPUT_BUFFER: usize = 16;

/// Tunables applied when a graph is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializerSettings {
  input_buffer: usize,
}

impl MaterializerSettings {
  /// Creates the default settings.
  #[must_use]
  pub const fn new() -> Self {
    Self { input_buffer: DEFAULT_INPUT_BUFFER }
  }

  /// Sets the per-connection input buffer capacity. Must be positive;
  /// materialization rejects zero.
  #[must_use]
  pub const fn with_input_buffer(mut self, capacity: usize) -> Self {
    self.input_buffer = capacity;
    self
  }

  /// Returns the per-connection input buffer capacity.
  #[must_use]
  pub const fn input_buffer(&self) -> usize {
    self.input_buffer
  }
}

impl Default for MaterializerSettings {
  fn default() -> Self {
    Self::new()
  }
}
