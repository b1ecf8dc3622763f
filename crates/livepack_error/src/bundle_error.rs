use std::fmt;

/// A line written to the hosted console while a payload was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
  pub level: String,
  pub message: String,
}

impl fmt::Display for ConsoleLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}] {}", self.level, self.message)
  }
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
  /// A single file failed to transpile. The bundle keeps going with a stand-in module.
  #[error("Transpile error in {path}: {message}")]
  Transform { path: String, message: String },

  #[error("Cannot find module '{specifier}'{}: {reason}", importer_suffix(.importer))]
  Resolution { specifier: String, importer: Option<String>, reason: String },

  #[error("Failed to load dependency: {package}")]
  DependencyFetch {
    package: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("Runtime Error: {message}")]
  PayloadExecution { message: String, console: Vec<ConsoleLine> },

  #[error("The file set contains no compilable files")]
  EmptyFileSet,

  #[error("Entry file '{0}' is not part of the compiled module table")]
  EntryNotFound(String),
}

#[allow(clippy::ref_option)]
fn importer_suffix(importer: &Option<String>) -> String {
  importer.as_ref().map(|importer| format!(" from '{importer}'")).unwrap_or_default()
}

#[test]
fn resolution_message_names_specifier_and_importer() {
  let error = BundleError::Resolution {
    specifier: "./Nope".into(),
    importer: Some("src/App.jsx".into()),
    reason: "no matching file".into(),
  };
  assert_eq!(error.to_string(), "Cannot find module './Nope' from 'src/App.jsx': no matching file");

  let error = BundleError::Resolution {
    specifier: "./Nope".into(),
    importer: None,
    reason: "no matching file".into(),
  };
  assert_eq!(error.to_string(), "Cannot find module './Nope': no matching file");
}
