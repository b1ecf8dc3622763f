use livepack_error::ConsoleLine;
use serde::Deserialize;

/// What a payload left behind after it ran to completion.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExecutionOutcome {
  pub console: Vec<ConsoleLine>,
  /// Style sheets appended to the document head, in insertion order.
  pub styles: Vec<String>,
  /// Own keys of the entry module's exports.
  pub exports: Vec<String>,
  /// The element tree handed to the renderer, if anything was rendered.
  pub rendered: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SandboxReport {
  pub console: Vec<ReportedLine>,
  pub styles: Vec<String>,
  pub exports: Vec<String>,
  pub rendered: Option<serde_json::Value>,
  pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportedLine {
  pub level: String,
  pub message: String,
}

impl SandboxReport {
  pub fn console_lines(&self) -> Vec<ConsoleLine> {
    self
      .console
      .iter()
      .map(|line| ConsoleLine { level: line.level.clone(), message: line.message.clone() })
      .collect()
  }

  pub fn into_outcome(self) -> ExecutionOutcome {
    ExecutionOutcome {
      console: self.console_lines(),
      styles: self.styles,
      exports: self.exports,
      rendered: self.rendered.filter(|rendered| !rendered.is_null()),
    }
  }
}

#[test]
fn missing_fields_fall_back_to_empty() {
  let report: SandboxReport =
    serde_json::from_str(r#"{"console":[{"level":"log","message":"hi"}],"rendered":null}"#).unwrap();
  assert!(report.error.is_none());
  let outcome = report.into_outcome();
  assert_eq!(outcome.console, [ConsoleLine { level: "log".into(), message: "hi".into() }]);
  assert!(outcome.rendered.is_none());
  assert!(outcome.styles.is_empty());
}
