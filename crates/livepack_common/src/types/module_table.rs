use arcstr::ArcStr;
use livepack_utils::indexmap::FxIndexMap;

use crate::CompiledModule;

/// Compiled modules keyed by their virtual path, in the iteration order of the file set.
#[derive(Debug, Default)]
pub struct ModuleTable {
  modules: FxIndexMap<ArcStr, CompiledModule>,
}

impl ModuleTable {
  pub fn insert(&mut self, module: CompiledModule) {
    self.modules.insert(module.path.clone(), module);
  }

  pub fn get(&self, path: &str) -> Option<&CompiledModule> {
    self.modules.get(path)
  }

  pub fn contains(&self, path: &str) -> bool {
    self.modules.contains_key(path)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn first(&self) -> Option<&CompiledModule> {
    self.modules.first().map(|(_, module)| module)
  }

  pub fn iter(&self) -> impl Iterator<Item = &CompiledModule> {
    self.modules.values()
  }

  /// Module paths in insertion order.
  pub fn paths(&self) -> impl Iterator<Item = &ArcStr> {
    self.modules.keys()
  }
}
