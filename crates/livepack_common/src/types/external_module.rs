use livepack_utils::indexmap::FxIndexMap;

/// A pre-fetched external package.
///
/// `source` is a CommonJS body run once with `module` and `exports` in scope; whatever it leaves in
/// `module.exports` is what the package's importers receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalModule {
  pub name: String,
  pub source: String,
}

impl ExternalModule {
  pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
    Self { name: name.into(), source: source.into() }
  }
}

/// External packages resolved for one execution of a payload.
#[derive(Debug, Default, Clone)]
pub struct ExternalModuleTable {
  modules: FxIndexMap<String, ExternalModule>,
}

impl ExternalModuleTable {
  pub fn insert(&mut self, module: ExternalModule) {
    self.modules.insert(module.name.clone(), module);
  }

  pub fn get(&self, name: &str) -> Option<&ExternalModule> {
    self.modules.get(name)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ExternalModule> {
    self.modules.values()
  }
}

impl FromIterator<ExternalModule> for ExternalModuleTable {
  fn from_iter<T: IntoIterator<Item = ExternalModule>>(iter: T) -> Self {
    let mut table = Self::default();
    iter.into_iter().for_each(|module| table.insert(module));
    table
  }
}
