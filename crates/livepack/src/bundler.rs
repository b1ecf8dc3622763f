use std::sync::Arc;

use livepack_common::{
  BundlerOptions, EntryPoint, EntryPointKind, ModuleTable, NormalizedBundlerOptions,
};
use livepack_error::{BuildResult, BundleError};
use livepack_fs::VirtualFileSet;

use crate::{
  external::{fetch_externals, ExternalResolver},
  generate_stage::GenerateStage,
  link_stage::LinkStage,
  scan_stage::{
    scan_dependencies,
    select_entry::select_entry,
    specifier_scanner::{RegexSpecifierScanner, SpecifierScanner},
  },
  transform_stage::{TransformStage, TransformStageOutput},
  types::{bundle_output::BundleOutput, prepared_bundle::PreparedBundle, SharedOptions},
  utils::normalize_options::normalize_options,
};

/// Turns a virtual file set into a single executable payload.
///
/// Every call starts from scratch. Nothing is cached between runs, so a bundler can be shared
/// freely and two runs never observe each other.
pub struct Bundler {
  options: SharedOptions,
  scanner: Box<dyn SpecifierScanner>,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> Self {
    Self { options: Arc::new(normalize_options(options)), scanner: Box::new(RegexSpecifierScanner) }
  }

  #[must_use]
  pub fn with_scanner(mut self, scanner: impl SpecifierScanner + 'static) -> Self {
    self.scanner = Box::new(scanner);
    self
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Transforms, links and generates. Only an empty file set or a missing forced entry fail the
  /// build, everything else degrades into warnings and errors thrown by the payload.
  pub fn bundle(&self, files: &VirtualFileSet) -> BuildResult<BundleOutput> {
    let TransformStageOutput { module_table, mut warnings } =
      TransformStage::new(&self.options).transform(files);

    let entry = self.select_entry(&module_table)?;
    if entry.kind == EntryPointKind::Fallback {
      tracing::warn!(entry = %entry.path, "no entry candidate found, using the first module");
      warnings.push(anyhow::anyhow!(
        "None of the entry candidates ({}) exist, falling back to '{}'",
        self.options.entry_candidates.join(", "),
        entry.path
      ));
    }

    let dependencies = scan_dependencies(files, self.scanner.as_ref(), &self.options);

    let mut link_output = LinkStage::new(&module_table, &self.options).link();
    warnings.append(&mut link_output.warnings);

    let payload =
      GenerateStage::new(&module_table, &link_output, &entry, &self.options).generate(dependencies);

    tracing::info!(
      entry = %entry.path,
      modules = module_table.len(),
      dependencies = payload.dependencies.len(),
      warnings = warnings.len(),
      "bundled"
    );

    Ok(BundleOutput { payload, module_table, entry, warnings })
  }

  /// Bundles, then fetches every dependency of the payload through `resolver`.
  pub async fn prepare(
    &self,
    files: &VirtualFileSet,
    resolver: &dyn ExternalResolver,
  ) -> BuildResult<PreparedBundle> {
    let output = self.bundle(files)?;
    let externals = fetch_externals(&output.payload.dependencies, resolver).await?;
    Ok(PreparedBundle { output, externals })
  }

  fn select_entry(&self, module_table: &ModuleTable) -> Result<EntryPoint, BundleError> {
    match &self.options.entry {
      Some(entry) => module_table
        .get(entry)
        .map(|module| EntryPoint { path: module.path.clone(), kind: EntryPointKind::Candidate })
        .ok_or_else(|| BundleError::EntryNotFound(entry.clone())),
      None => select_entry(module_table, &self.options.entry_candidates),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::MemoryExternalResolver;

  fn app() -> VirtualFileSet {
    VirtualFileSet::from_iter([
      (
        "src/App.jsx",
        "import React from 'react';\nimport pad from 'left-pad';\nimport Foo from './Foo';\nimport './App.css';\nexport default function App() {\n  return <Foo label={pad('x', 3)} />;\n}\n",
      ),
      ("src/Foo.jsx", "export default function Foo(props) {\n  return <span>{props.label}</span>;\n}\n"),
      ("src/App.css", "span { color: red; }"),
      ("README.md", "import nothing from 'markdown-dep';"),
    ])
  }

  #[test]
  fn bundles_a_small_app() {
    let output = Bundler::new(BundlerOptions::default()).bundle(&app()).unwrap();

    assert_eq!(output.entry.path, "src/App.jsx");
    assert_eq!(output.entry.kind, EntryPointKind::Candidate);
    assert_eq!(output.module_table.len(), 3);
    assert_eq!(output.payload.dependencies, vec!["left-pad".to_string(), "markdown-dep".to_string()]);
    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    assert!(output.payload.code.contains(r#""./Foo":"src/Foo.jsx""#));
    assert!(output.payload.code.contains(r#""./App.css":"src/App.css""#));
  }

  #[test]
  fn same_input_same_payload() {
    let bundler = Bundler::new(BundlerOptions::default());
    let first = bundler.bundle(&app()).unwrap();
    let second = bundler.bundle(&app()).unwrap();
    assert_eq!(first.payload.code, second.payload.code);
    assert_eq!(first.payload.dependencies, second.payload.dependencies);
  }

  #[test]
  fn reports_fallback_entry() {
    let files = VirtualFileSet::from_iter([("lib/main.js", "module.exports = 1;")]);
    let output = Bundler::new(BundlerOptions::default()).bundle(&files).unwrap();
    assert_eq!(output.entry.path, "lib/main.js");
    assert_eq!(output.entry.kind, EntryPointKind::Fallback);
    assert_eq!(output.warnings.len(), 1);
  }

  #[test]
  fn forced_entry_must_exist() {
    let bundler =
      Bundler::new(BundlerOptions { entry: Some("src/Main.jsx".to_string()), ..Default::default() });
    let err = bundler.bundle(&app()).unwrap_err();
    assert!(matches!(err.bundle_errors().next(), Some(BundleError::EntryNotFound(path)) if path == "src/Main.jsx"));
  }

  #[test]
  fn no_compilable_files() {
    let files = VirtualFileSet::from_iter([("README.md", "# hi")]);
    let err = Bundler::new(BundlerOptions::default()).bundle(&files).unwrap_err();
    assert!(matches!(err.bundle_errors().next(), Some(BundleError::EmptyFileSet)));
  }

  #[tokio::test]
  async fn prepare_fails_on_missing_dependency() {
    let resolver = MemoryExternalResolver::default().with_module("left-pad", "module.exports = 1;");
    let err = Bundler::new(BundlerOptions::default()).prepare(&app(), &resolver).await.unwrap_err();
    assert!(matches!(
      err.bundle_errors().next(),
      Some(BundleError::DependencyFetch { package, .. }) if package == "markdown-dep"
    ));
  }

  #[tokio::test]
  async fn prepare_collects_externals() {
    let resolver = MemoryExternalResolver::default()
      .with_module("left-pad", "module.exports = 1;")
      .with_module("markdown-dep", "module.exports = 2;");
    let prepared = Bundler::new(BundlerOptions::default()).prepare(&app(), &resolver).await.unwrap();
    assert_eq!(prepared.externals.len(), 2);
  }
}
