//! Helpers for the slash-separated keys of a virtual file set.
//!
//! Keys never touch a real filesystem, so these work on `/` segments directly instead of going
//! through `std::path`, which would use the host separator.

/// The directory part of `path`, without the trailing slash. Top-level files have an empty dirname.
pub fn dirname(path: &str) -> &str {
  path.rfind('/').map_or("", |idx| &path[..idx])
}

/// The extension of the last segment, without the dot.
pub fn extension(path: &str) -> Option<&str> {
  let file_name = path.rsplit('/').next().unwrap_or(path);
  file_name.rfind('.').filter(|idx| *idx > 0).map(|idx| &file_name[idx + 1..])
}

/// Joins `request` onto `base_dir` and folds `.`/`..` segments.
///
/// Returns `None` when the request climbs above the root of the file set.
pub fn join_normalized(base_dir: &str, request: &str) -> Option<String> {
  let mut segments: Vec<&str> = Vec::new();
  for segment in base_dir.split('/').chain(request.split('/')) {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop()?;
      }
      _ => segments.push(segment),
    }
  }
  Some(segments.join("/"))
}

#[test]
fn test_dirname() {
  assert_eq!(dirname("src/components/Button.jsx"), "src/components");
  assert_eq!(dirname("App.jsx"), "");
}

#[test]
fn test_extension() {
  assert_eq!(extension("src/App.jsx"), Some("jsx"));
  assert_eq!(extension("src/.env"), None);
  assert_eq!(extension("src.d/README"), None);
  assert_eq!(extension("styles/main.css"), Some("css"));
}

#[test]
fn test_join_normalized() {
  assert_eq!(join_normalized("src", "./Foo").as_deref(), Some("src/Foo"));
  assert_eq!(join_normalized("src/components", "../utils/format").as_deref(), Some("src/utils/format"));
  assert_eq!(join_normalized("", "./App.css").as_deref(), Some("App.css"));
  assert_eq!(join_normalized("src", "../../escape"), None);
}
