use std::sync::LazyLock;

use livepack_utils::indexmap::FxIndexSet;
use regex::Regex;

/// Finds the bare (package) specifiers a source text refers to.
///
/// This is a hint for which external packages to fetch ahead of execution, not module
/// analysis. Implementations may over- or under-report.
pub trait SpecifierScanner: Send + Sync {
  fn extract_bare_specifiers(&self, text: &str) -> FxIndexSet<String>;
}

static PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
  [
    r#"import\s+(?:[\w\s{},*$]+from\s+)?['"]([^'"]+)['"]"#,
    r#"export\s+(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s+['"]([^'"]+)['"]"#,
    r#"import\(\s*['"]([^'"]+)['"]\s*\)"#,
    r#"require\(\s*['"]([^'"]+)['"]\s*\)"#,
  ]
  .map(|pattern| Regex::new(pattern).expect("specifier patterns are valid"))
});

/// Text-level scanner over `import`, `export … from`, `import()` and `require()` forms.
///
/// Matches inside strings and comments are reported too.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSpecifierScanner;

impl SpecifierScanner for RegexSpecifierScanner {
  fn extract_bare_specifiers(&self, text: &str) -> FxIndexSet<String> {
    let mut found = FxIndexSet::default();
    for pattern in PATTERNS.iter() {
      for captures in pattern.captures_iter(text) {
        if let Some(specifier) = captures.get(1).map(|m| m.as_str()) {
          if is_bare(specifier) {
            found.insert(specifier.to_string());
          }
        }
      }
    }
    found
  }
}

fn is_bare(specifier: &str) -> bool {
  !specifier.starts_with('.') && !specifier.starts_with('/')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scan(text: &str) -> Vec<String> {
    RegexSpecifierScanner.extract_bare_specifiers(text).into_iter().collect()
  }

  #[test]
  fn only_bare_names() {
    assert_eq!(scan("import x from 'left-pad'\nimport y from './local'"), ["left-pad"]);
  }

  #[test]
  fn import_forms() {
    let text = r#"
import "side-effect";
import * as d3 from "d3";
import Default, { named as alias } from 'framer-motion';
export { motion } from "motion";
export * from "zustand";
const lazy = () => import("lodash/debounce");
const legacy = require( "classnames" );
import abs from "/abs/path";
"#;
    let mut found = scan(text);
    found.sort();
    assert_eq!(
      found,
      ["classnames", "d3", "framer-motion", "lodash/debounce", "motion", "side-effect", "zustand"]
    );
  }

  #[test]
  fn duplicates_collapse() {
    assert_eq!(scan("require('a'); require('a'); import b from 'a';"), ["a"]);
  }
}
