use arcstr::ArcStr;

/// Name of the payload parameter holding the host-provided modules.
pub const HOST_PARAM: &str = "__host";

/// Name of the payload parameter holding the pre-fetched external modules.
pub const EXTERNALS_PARAM: &str = "__externals";

/// The single executable artifact of a bundle run.
///
/// `code` is the body of a function taking [`HOST_PARAM`] and [`EXTERNALS_PARAM`]. Running it
/// evaluates the entry module and returns its exports.
#[derive(Debug, Clone)]
pub struct BundlePayload {
  pub code: String,
  pub entry: ArcStr,
  /// Bare package names the caller has to resolve before running `code`.
  pub dependencies: Vec<String>,
}

impl BundlePayload {
  /// The payload as a function expression, ready to be called with the host and external tables.
  pub fn to_function_expression(&self) -> String {
    format!("(function ({HOST_PARAM}, {EXTERNALS_PARAM}) {{\n{}\n}})", self.code)
  }
}
