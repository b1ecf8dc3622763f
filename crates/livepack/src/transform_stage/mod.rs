pub mod loaders;

use arcstr::ArcStr;
use livepack_common::{CompiledModule, ModuleTable, ModuleType, NormalizedBundlerOptions};
use livepack_error::BundleError;
use livepack_fs::VirtualFileSet;
use livepack_utils::{concat_string, ecmascript::js_string_literal};

pub struct TransformStageOutput {
  pub module_table: ModuleTable,
  pub warnings: Vec<anyhow::Error>,
}

pub struct TransformStage<'a> {
  options: &'a NormalizedBundlerOptions,
}

impl<'a> TransformStage<'a> {
  pub fn new(options: &'a NormalizedBundlerOptions) -> Self {
    Self { options }
  }

  /// Compiles every script and stylesheet of the file set. Other files are left out.
  ///
  /// A script that fails to compile is replaced by a stand-in module and reported as a warning,
  /// so one broken file never takes the rest of the bundle down with it.
  pub fn transform(&self, files: &VirtualFileSet) -> TransformStageOutput {
    let mut module_table = ModuleTable::default();
    let mut warnings = vec![];

    for (path, content) in files.iter() {
      let Some(module_type) = ModuleType::from_path(path) else {
        tracing::trace!(path, "skipping file that is not a module");
        continue;
      };

      let module = match module_type {
        ModuleType::Css => loaders::css::compile(path, content),
        ModuleType::Js | ModuleType::Jsx => {
          match loaders::ecmascript::compile(path, content, module_type, self.options) {
            Ok(module) => module,
            Err(errors) => {
              let message = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
              tracing::warn!(path, %message, "failed to transpile, using a stand-in module");
              let error = BundleError::Transform { path: path.to_string(), message };
              let module = stand_in(path.into(), module_type, &error);
              warnings.push(error.into());
              module
            }
          }
        }
      };

      module_table.insert(module);
    }

    tracing::debug!(files = files.len(), modules = module_table.len(), "transform stage done");
    TransformStageOutput { module_table, warnings }
  }
}

/// A module that reports why the real one could not be built and exports nothing.
fn stand_in(path: ArcStr, module_type: ModuleType, error: &BundleError) -> CompiledModule {
  let body = concat_string!(
    "console.error(",
    js_string_literal(&error.to_string()),
    ");\nmodule.exports = {};\n"
  );
  CompiledModule::stand_in(path, module_type, body)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_scripts_and_stylesheets_become_modules() {
    let files = VirtualFileSet::from_iter([
      ("src/App.jsx", "export default function App() { return null; }"),
      ("src/util.js", "export const one = 1;"),
      ("src/App.css", "body { margin: 0; }"),
      ("README.md", "# readme"),
      ("package.json", "{}"),
      ("notes.txt", "todo"),
    ]);
    let options = NormalizedBundlerOptions::default();
    let output = TransformStage::new(&options).transform(&files);

    assert_eq!(output.module_table.len(), 3);
    assert!(output.module_table.contains("src/App.jsx"));
    assert!(output.module_table.contains("src/util.js"));
    assert!(output.module_table.contains("src/App.css"));
    assert!(!output.module_table.contains("README.md"));
    assert!(output.warnings.is_empty());
  }

  #[test]
  fn broken_script_becomes_stand_in() {
    let files = VirtualFileSet::from_iter([
      ("src/A.jsx", "export const a = 1;"),
      ("src/B.jsx", "export default () => <div>;"),
    ]);
    let options = NormalizedBundlerOptions::default();
    let output = TransformStage::new(&options).transform(&files);

    assert_eq!(output.module_table.len(), 2);
    assert!(!output.module_table.get("src/A.jsx").unwrap().is_stand_in);

    let broken = output.module_table.get("src/B.jsx").unwrap();
    assert!(broken.is_stand_in);
    assert!(broken.body.starts_with("console.error(\"Transpile error in src/B.jsx: "));
    assert!(broken.body.contains("module.exports = {};"));

    assert_eq!(output.warnings.len(), 1);
    let warning = output.warnings[0].downcast_ref::<BundleError>().unwrap();
    assert!(matches!(warning, BundleError::Transform { path, .. } if path == "src/B.jsx"));
  }
}
