use livepack_utils::virtual_path;

/// The kinds of file that take part in a bundle. Anything else is left out of the module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  Js,
  Jsx,
  Css,
}

impl ModuleType {
  /// Files are classified by extension only.
  pub fn from_path(path: &str) -> Option<Self> {
    match virtual_path::extension(path)? {
      "js" => Some(Self::Js),
      "jsx" => Some(Self::Jsx),
      "css" => Some(Self::Css),
      _ => None,
    }
  }
}

#[test]
fn test_module_type_from_path() {
  assert_eq!(ModuleType::from_path("src/App.jsx"), Some(ModuleType::Jsx));
  assert_eq!(ModuleType::from_path("src/utils/math.js"), Some(ModuleType::Js));
  assert_eq!(ModuleType::from_path("src/App.css"), Some(ModuleType::Css));
  assert_eq!(ModuleType::from_path("README.md"), None);
  assert_eq!(ModuleType::from_path("package.json"), None);
  assert_eq!(ModuleType::from_path("src/App.JSX"), None);
  assert_eq!(ModuleType::from_path(".env"), None);
}
