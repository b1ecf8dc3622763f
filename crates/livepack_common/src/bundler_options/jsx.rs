/// Classic-runtime JSX settings. Generated code calls the pragma directly, so the framework has
/// to be in scope wherever markup is used.
#[derive(Debug, Default, Clone)]
pub struct JsxOptions {
  pub pragma: Option<String>,
  pub pragma_frag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NormalizedJsxOptions {
  pub pragma: String,
  pub pragma_frag: String,
}

impl Default for NormalizedJsxOptions {
  fn default() -> Self {
    Self { pragma: "React.createElement".to_string(), pragma_frag: "React.Fragment".to_string() }
  }
}

impl From<JsxOptions> for NormalizedJsxOptions {
  fn from(raw: JsxOptions) -> Self {
    let default = Self::default();
    Self {
      pragma: raw.pragma.unwrap_or(default.pragma),
      pragma_frag: raw.pragma_frag.unwrap_or(default.pragma_frag),
    }
  }
}
