use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
  /// How long the file set has to stay unchanged before a run starts.
  pub debounce: Duration,
}

impl Default for PreviewOptions {
  fn default() -> Self {
    Self { debounce: Duration::from_millis(500) }
  }
}
