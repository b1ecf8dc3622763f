pub mod es_target;
pub mod jsx;
pub mod module_type;
pub mod normalized_bundler_options;

use crate::{ESTarget, JsxOptions};

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  /// Forces the entry file. Bundling fails when it is not a compiled module.
  pub entry: Option<String>,
  /// Paths checked in order when picking the entry file.
  pub entry_candidates: Option<Vec<String>>,
  /// Package names always satisfied by the host environment.
  pub host_modules: Option<Vec<String>>,

  // --- Transform
  pub target: Option<ESTarget>,
  pub jsx: Option<JsxOptions>,
}
