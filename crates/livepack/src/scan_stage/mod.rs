//! Work done on the raw file set before anything is compiled: picking the entry file and
//! collecting the bare package names the collaborator has to fetch.

pub mod select_entry;
pub mod specifier_scanner;

use livepack_common::NormalizedBundlerOptions;
use livepack_fs::VirtualFileSet;
use livepack_utils::indexmap::FxIndexSet;

use self::specifier_scanner::SpecifierScanner;

/// Collects the dependency set: bare specifiers of every file, minus the host-provided ones.
pub fn scan_dependencies(
  files: &VirtualFileSet,
  scanner: &dyn SpecifierScanner,
  options: &NormalizedBundlerOptions,
) -> Vec<String> {
  let mut dependencies = FxIndexSet::default();
  for (path, content) in files.iter() {
    let found = scanner.extract_bare_specifiers(content);
    tracing::trace!(path, count = found.len(), "scanned bare specifiers");
    dependencies.extend(found.into_iter().filter(|name| !options.is_host_module(name)));
  }
  dependencies.into_iter().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::RegexSpecifierScanner;

  #[test]
  fn excludes_relative_and_host_names() {
    let files = VirtualFileSet::from_iter([
      (
        "src/App.jsx".to_string(),
        "import React from 'react';\nimport x from 'left-pad';\nimport y from './local';\n"
          .to_string(),
      ),
      ("src/util.js".to_string(), "const pad = require('left-pad');\nrequire('react-dom');\n".to_string()),
      ("README.md".to_string(), "Run `import z from \"lodash\"` to try it.".to_string()),
    ]);

    let deps =
      scan_dependencies(&files, &RegexSpecifierScanner, &NormalizedBundlerOptions::default());
    assert_eq!(deps, vec!["left-pad".to_string(), "lodash".to_string()]);
  }
}
