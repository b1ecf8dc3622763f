use livepack_common::{
  BundlerOptions, NormalizedBundlerOptions, DEFAULT_ENTRY_CANDIDATES, DEFAULT_HOST_MODULES,
};

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  NormalizedBundlerOptions {
    entry: raw_options.entry,
    entry_candidates: raw_options
      .entry_candidates
      .unwrap_or_else(|| DEFAULT_ENTRY_CANDIDATES.iter().map(ToString::to_string).collect()),
    host_modules: raw_options
      .host_modules
      .unwrap_or_else(|| DEFAULT_HOST_MODULES.iter().map(ToString::to_string).collect()),
    target: raw_options.target.unwrap_or_default(),
    jsx: raw_options.jsx.map(Into::into).unwrap_or_default(),
  }
}

#[test]
fn fills_in_defaults() {
  let options = normalize_options(BundlerOptions::default());
  assert_eq!(options.entry, None);
  assert_eq!(options.entry_candidates, ["src/index.jsx", "src/App.jsx", "App.jsx"]);
  assert!(options.is_host_module("react"));
  assert!(options.is_host_module("react-dom"));
  assert!(!options.is_host_module("left-pad"));
  assert_eq!(options.jsx.pragma, "React.createElement");
}

#[test]
fn keeps_user_values() {
  let options = normalize_options(BundlerOptions {
    entry_candidates: Some(vec!["main.js".to_string()]),
    host_modules: Some(vec!["preact".to_string()]),
    jsx: Some(livepack_common::JsxOptions { pragma: Some("h".to_string()), pragma_frag: None }),
    ..BundlerOptions::default()
  });
  assert_eq!(options.entry_candidates, ["main.js"]);
  assert!(options.is_host_module("preact"));
  assert!(!options.is_host_module("react"));
  assert_eq!(options.jsx.pragma, "h");
  assert_eq!(options.jsx.pragma_frag, "React.Fragment");
}
