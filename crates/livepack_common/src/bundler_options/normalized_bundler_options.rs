use crate::{ESTarget, NormalizedJsxOptions};

pub const DEFAULT_ENTRY_CANDIDATES: [&str; 3] = ["src/index.jsx", "src/App.jsx", "App.jsx"];

pub const DEFAULT_HOST_MODULES: [&str; 2] = ["react", "react-dom"];

#[derive(Debug, Clone)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub entry: Option<String>,
  pub entry_candidates: Vec<String>,
  pub host_modules: Vec<String>,

  // --- Transform
  pub target: ESTarget,
  pub jsx: NormalizedJsxOptions,
}

impl NormalizedBundlerOptions {
  pub fn is_host_module(&self, specifier: &str) -> bool {
    self.host_modules.iter().any(|name| name == specifier)
  }
}

impl Default for NormalizedBundlerOptions {
  fn default() -> Self {
    Self {
      entry: None,
      entry_candidates: DEFAULT_ENTRY_CANDIDATES.iter().map(ToString::to_string).collect(),
      host_modules: DEFAULT_HOST_MODULES.iter().map(ToString::to_string).collect(),
      target: ESTarget::default(),
      jsx: NormalizedJsxOptions::default(),
    }
  }
}
