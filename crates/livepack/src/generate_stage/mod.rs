use livepack_common::{
  BundlePayload, EntryPoint, ModuleTable, NormalizedBundlerOptions, SourceJoiner, HOST_PARAM,
};
use livepack_utils::{
  concat_string,
  ecmascript::{is_validate_identifier_name, js_string_literal},
};
use serde_json::{Map, Value};

use crate::link_stage::LinkStageOutput;

/// Module cache and `require` of the payload. Expects `__modules`, `__resolved` and
/// `__unresolved` to be declared before it.
const RUNTIME: &str = include_str!("runtime.js");

pub struct GenerateStage<'a> {
  module_table: &'a ModuleTable,
  link_output: &'a LinkStageOutput,
  entry: &'a EntryPoint,
  options: &'a NormalizedBundlerOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    module_table: &'a ModuleTable,
    link_output: &'a LinkStageOutput,
    entry: &'a EntryPoint,
    options: &'a NormalizedBundlerOptions,
  ) -> Self {
    Self { module_table, link_output, entry, options }
  }

  pub fn generate(&self, dependencies: Vec<String>) -> BundlePayload {
    let mut joiner = SourceJoiner::default();

    joiner.append_source(self.render_module_table());
    joiner.append_source(concat_string!(
      "var __resolved = ",
      request_table(self.link_output.resolved.iter().map(|(importer, requests)| {
        (importer.as_str(), requests.iter().map(|(request, path)| (request.as_str(), path.as_str())))
      })),
      ";"
    ));
    joiner.append_source(concat_string!(
      "var __unresolved = ",
      request_table(self.link_output.unresolved.iter().map(|(importer, requests)| {
        (
          importer.as_str(),
          requests.iter().map(|(request, message)| (request.as_str(), message.as_str())),
        )
      })),
      ";"
    ));
    joiner.append_source(RUNTIME);
    if let Some(binding) = self.render_pragma_binding() {
      joiner.append_source(binding);
    }
    joiner.append_source(concat_string!(
      "return __require(",
      js_string_literal(&self.entry.path),
      ", null);"
    ));

    BundlePayload { code: joiner.join(), entry: self.entry.path.clone(), dependencies }
  }

  /// Markup compiles to calls on the pragma's root object (`React` for `React.createElement`).
  /// Modules that use markup without importing the framework find it through this binding,
  /// which reads the framework from the host table instead of a global.
  fn render_pragma_binding(&self) -> Option<String> {
    let root = self.options.jsx.pragma.split('.').next()?;
    let framework = self.options.host_modules.first()?;
    if !is_validate_identifier_name(root) {
      return None;
    }
    let framework = js_string_literal(framework);
    Some(format!(
      "var {root} = {HOST_PARAM} != null && __hasOwn.call({HOST_PARAM}, {framework}) ? {HOST_PARAM}[{framework}] : undefined;"
    ))
  }

  fn render_module_table(&self) -> String {
    let mut ret = String::from("var __modules = {\n");
    for (idx, module) in self.module_table.iter().enumerate() {
      if idx > 0 {
        ret.push_str(",\n");
      }
      ret.push_str(&concat_string!(
        js_string_literal(&module.path),
        ": function (module, exports, require) {\n",
        module.body,
        "\n}"
      ));
    }
    ret.push_str("\n};");
    ret
  }
}

/// Renders importer → request → value as a JSON object literal.
fn request_table<'s, I, R>(tables: I) -> String
where
  I: Iterator<Item = (&'s str, R)>,
  R: Iterator<Item = (&'s str, &'s str)>,
{
  let object = tables
    .map(|(importer, requests)| {
      let requests = requests
        .map(|(request, value)| (request.to_string(), Value::String(value.to_string())))
        .collect::<Map<_, _>>();
      (importer.to_string(), Value::Object(requests))
    })
    .collect::<Map<_, _>>();
  Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
  use livepack_common::{CompiledModule, EntryPointKind, ModuleType};

  use super::*;
  use crate::link_stage::{ResolvedRequests, UnresolvedRequests};

  #[test]
  fn lays_out_the_payload() {
    let mut table = ModuleTable::default();
    table.insert(CompiledModule::new(
      "src/App.jsx".into(),
      ModuleType::Jsx,
      "module.exports = require(\"./Foo\");".to_string(),
      vec!["./Foo".to_string()],
    ));
    table.insert(CompiledModule::new(
      "src/Foo.jsx".into(),
      ModuleType::Jsx,
      "module.exports = 1; // trailing comment".to_string(),
      vec![],
    ));

    let mut resolved = ResolvedRequests::default();
    resolved
      .entry("src/App.jsx".into())
      .or_default()
      .insert("./Foo".to_string(), "src/Foo.jsx".into());
    let link_output =
      LinkStageOutput { resolved, unresolved: UnresolvedRequests::default(), warnings: vec![] };
    let entry = EntryPoint { path: "src/App.jsx".into(), kind: EntryPointKind::Candidate };

    let options = NormalizedBundlerOptions::default();

    let payload = GenerateStage::new(&table, &link_output, &entry, &options)
      .generate(vec!["left-pad".to_string()]);

    assert!(payload.code.starts_with("var __modules = {\n\"src/App.jsx\": function (module, exports, require) {\n"));
    assert!(payload.code.contains("module.exports = 1; // trailing comment\n}"));
    assert!(payload.code.contains(r#"var __resolved = {"src/App.jsx":{"./Foo":"src/Foo.jsx"}};"#));
    assert!(payload.code.contains("var __unresolved = {};"));
    assert!(payload.code.contains("function __require(name, from)"));
    assert!(payload.code.contains(
      r#"var React = __host != null && __hasOwn.call(__host, "react") ? __host["react"] : undefined;"#
    ));
    assert!(payload.code.ends_with("return __require(\"src/App.jsx\", null);"));
    assert_eq!(payload.entry, "src/App.jsx");
    assert_eq!(payload.dependencies, vec!["left-pad".to_string()]);
  }
}
