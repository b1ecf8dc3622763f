/// A module the hosted code gets from its environment instead of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBinding {
  /// The specifier the hosted code imports it by.
  pub name: String,
  /// A JS expression evaluating to the module object inside the execution boundary.
  pub expression: String,
}

impl HostBinding {
  pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
    Self { name: name.into(), expression: expression.into() }
  }
}

/// The UI framework and its renderer, handed to the execution boundary explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
  pub framework: HostBinding,
  pub renderer: HostBinding,
}

impl HostEnvironment {
  pub fn new(framework: HostBinding, renderer: HostBinding) -> Self {
    Self { framework, renderer }
  }

  pub fn bindings(&self) -> [&HostBinding; 2] {
    [&self.framework, &self.renderer]
  }
}
