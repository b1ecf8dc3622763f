use arcstr::ArcStr;

use crate::ModuleType;

/// One file of the virtual file set after the transform stage.
///
/// `body` is the text of a CommonJS module body: it reads `module`, `exports` and `require` from
/// the enclosing function and populates `module.exports`.
#[derive(Debug, Clone)]
pub struct CompiledModule {
  pub path: ArcStr,
  pub module_type: ModuleType,
  pub body: String,
  /// Statically known `require` requests of the body, in source order.
  pub requests: Vec<String>,
  /// Set when the file failed to transpile and `body` only reports the failure.
  pub is_stand_in: bool,
}

impl CompiledModule {
  pub fn new(path: ArcStr, module_type: ModuleType, body: String, requests: Vec<String>) -> Self {
    Self { path, module_type, body, requests, is_stand_in: false }
  }

  pub fn stand_in(path: ArcStr, module_type: ModuleType, body: String) -> Self {
    Self { path, module_type, body, requests: Vec::new(), is_stand_in: true }
  }
}
