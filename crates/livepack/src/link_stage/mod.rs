use arcstr::ArcStr;
use livepack_common::{ModuleTable, NormalizedBundlerOptions};
use livepack_error::BundleError;
use livepack_resolver::{is_relative_specifier, ResolveError, Resolver};
use livepack_utils::indexmap::FxIndexMap;

/// Per importer, request → resolved module path.
pub type ResolvedRequests = FxIndexMap<ArcStr, FxIndexMap<String, ArcStr>>;

/// Per importer, request → message of the error the request throws when it is required.
pub type UnresolvedRequests = FxIndexMap<ArcStr, FxIndexMap<String, String>>;

pub struct LinkStageOutput {
  pub resolved: ResolvedRequests,
  pub unresolved: UnresolvedRequests,
  pub warnings: Vec<anyhow::Error>,
}

/// Resolves the requests recorded by the transform stage against the module table.
///
/// Nothing fails here. Requests that cannot be satisfied become errors thrown by the payload at
/// the first `require`, which keeps module evaluation lazy and lets the build report every
/// problem at once.
pub struct LinkStage<'a> {
  module_table: &'a ModuleTable,
  options: &'a NormalizedBundlerOptions,
}

impl<'a> LinkStage<'a> {
  pub fn new(module_table: &'a ModuleTable, options: &'a NormalizedBundlerOptions) -> Self {
    Self { module_table, options }
  }

  pub fn link(self) -> LinkStageOutput {
    let resolver = Resolver::new(self.module_table.paths().cloned());
    let mut resolved = ResolvedRequests::default();
    let mut unresolved = UnresolvedRequests::default();
    let mut warnings = vec![];

    for module in self.module_table.iter() {
      for request in &module.requests {
        if self.options.is_host_module(request) {
          continue;
        }

        match resolver.resolve(Some(module.path.as_str()), request) {
          Ok(ret) => {
            resolved.entry(module.path.clone()).or_default().insert(request.clone(), ret.path);
          }
          Err(err) if defers_error(request, &err) => {
            let error = BundleError::Resolution {
              specifier: request.clone(),
              importer: Some(module.path.to_string()),
              reason: err.to_string(),
            };
            tracing::warn!(importer = %module.path, request, "{error}");
            unresolved
              .entry(module.path.clone())
              .or_default()
              .insert(request.clone(), error.to_string());
            warnings.push(error.into());
          }
          Err(_) => {
            tracing::trace!(importer = %module.path, request, "leaving bare request to the runtime");
          }
        }
      }
    }

    LinkStageOutput { resolved, unresolved, warnings }
  }
}

/// Bare names that match no module are most likely external packages. Only path-like requests and
/// ambiguous matches are known to be broken at this point.
fn defers_error(request: &str, err: &ResolveError) -> bool {
  matches!(err, ResolveError::Ambiguous { .. })
    || is_relative_specifier(request)
    || request.starts_with('/')
}

#[cfg(test)]
mod tests {
  use livepack_common::{CompiledModule, ModuleType};

  use super::*;

  fn module(path: &str, requests: &[&str]) -> CompiledModule {
    CompiledModule::new(
      path.into(),
      ModuleType::Jsx,
      String::new(),
      requests.iter().map(ToString::to_string).collect(),
    )
  }

  fn link(modules: Vec<CompiledModule>) -> LinkStageOutput {
    let mut table = ModuleTable::default();
    modules.into_iter().for_each(|module| table.insert(module));
    let options = NormalizedBundlerOptions::default();
    LinkStage::new(&table, &options).link()
  }

  #[test]
  fn resolves_relative_requests() {
    let output = link(vec![
      module("src/App.jsx", &["react", "./Foo", "./App.css"]),
      module("src/Foo.jsx", &[]),
      module("src/App.css", &[]),
    ]);

    let app = &output.resolved["src/App.jsx"];
    assert_eq!(app["./Foo"], "src/Foo.jsx");
    assert_eq!(app["./App.css"], "src/App.css");
    assert!(!app.contains_key("react"));
    assert!(output.unresolved.is_empty());
    assert!(output.warnings.is_empty());
  }

  #[test]
  fn host_names_never_match_files() {
    let output = link(vec![module("src/App.jsx", &["react"]), module("react.js", &[])]);
    assert!(output.resolved.is_empty());
    assert!(output.unresolved.is_empty());
  }

  #[test]
  fn defers_broken_requests() {
    let output = link(vec![
      module("src/App.jsx", &["./Missing", "left-pad", "format"]),
      module("src/a/format.js", &[]),
      module("src/b/format.js", &[]),
    ]);

    let app = &output.unresolved["src/App.jsx"];
    assert_eq!(
      app["./Missing"],
      "Cannot find module './Missing' from 'src/App.jsx': no module matches"
    );
    assert!(app["format"].contains("src/a/format.js, src/b/format.js"));
    assert!(!app.contains_key("left-pad"));
    assert_eq!(output.warnings.len(), 2);
  }
}
