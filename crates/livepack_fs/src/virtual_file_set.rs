use livepack_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

use crate::FileSetDelta;

/// An in-memory stand-in for a project directory: path → source text.
///
/// Paths are slash-separated keys such as `src/App.jsx`. Directories only exist as key prefixes.
/// Iteration follows insertion order, which is what the entry fallback and the module table rely on.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualFileSet {
  files: FxIndexMap<String, String>,
}

impl VirtualFileSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts or replaces a file. A replaced file keeps its position.
  pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
    self.files.insert(path.into(), content.into())
  }

  /// Removes a file, keeping the order of the remaining ones.
  pub fn remove(&mut self, path: &str) -> Option<String> {
    self.files.shift_remove(path)
  }

  pub fn get(&self, path: &str) -> Option<&str> {
    self.files.get(path).map(String::as_str)
  }

  pub fn contains(&self, path: &str) -> bool {
    self.files.contains_key(path)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.files.iter().map(|(path, content)| (path.as_str(), content.as_str()))
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.files.keys().map(String::as_str)
  }

  /// Applies a text-generation delta: deletions first, then creations and updates.
  pub fn apply_delta(&mut self, delta: &FileSetDelta) {
    for path in &delta.deleted_files {
      self.remove(path);
    }
    for (path, content) in &delta.files {
      self.insert(path.clone(), content.clone());
    }
  }

  pub fn to_json(&self) -> String {
    // Serializing a map of strings cannot fail.
    serde_json::to_string(&self.files).unwrap_or_default()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VirtualFileSet {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Self { files: iter.into_iter().map(|(path, content)| (path.into(), content.into())).collect() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_insertion_order() {
    let mut files = VirtualFileSet::from_iter([("src/b.js", "b"), ("src/a.js", "a")]);
    files.insert("src/b.js", "b2");
    assert_eq!(files.paths().collect::<Vec<_>>(), ["src/b.js", "src/a.js"]);
    assert_eq!(files.get("src/b.js"), Some("b2"));
  }

  #[test]
  fn applies_deletions_before_updates() {
    let mut files = VirtualFileSet::from_iter([("src/App.jsx", "old"), ("src/Old.jsx", "gone")]);
    let delta = FileSetDelta::from_json(
      r#"{"files":{"src/App.jsx":"new","src/Old.jsx":"recreated"},"deletedFiles":["src/Old.jsx"]}"#,
    )
    .unwrap();
    files.apply_delta(&delta);
    assert_eq!(files.get("src/App.jsx"), Some("new"));
    assert_eq!(files.get("src/Old.jsx"), Some("recreated"));
    assert_eq!(files.paths().collect::<Vec<_>>(), ["src/App.jsx", "src/Old.jsx"]);
  }

  #[test]
  fn round_trips_through_json() {
    let files = VirtualFileSet::from_iter([("src/App.jsx", "export default 1;\n")]);
    let json = files.to_json();
    assert_eq!(json, r#"{"src/App.jsx":"export default 1;\n"}"#);
    assert_eq!(serde_json::from_str::<VirtualFileSet>(&json).unwrap(), files);
  }
}
