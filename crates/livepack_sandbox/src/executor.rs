use boa_engine::{Context, Source};
use livepack_common::{BundlePayload, ExternalModuleTable, HostBinding, HostEnvironment};
use livepack_error::{BundleError, ConsoleLine};
use livepack_utils::{concat_string, ecmascript::js_string_literal};

use crate::{outcome::SandboxReport, ExecutionLimits, ExecutionOutcome};

const PRELUDE: &str = include_str!("./js/prelude.js");

/// A headless stand-in for the UI framework and its renderer.
///
/// Rendering records the element tree instead of drawing it. Pair it with [`react_shim_host`].
pub const REACT_SHIM: &str = include_str!("./js/react_shim.js");

/// Host bindings pointing at the objects defined by [`REACT_SHIM`].
pub fn react_shim_host() -> HostEnvironment {
  HostEnvironment::new(
    HostBinding::new("react", "__ReactShim.React"),
    HostBinding::new("react-dom", "__ReactShim.ReactDOM"),
  )
}

/// Runs a bundle payload with its host modules and pre-fetched externals.
pub trait PayloadExecutor {
  fn execute(
    &self,
    payload: &BundlePayload,
    host: &HostEnvironment,
    externals: &ExternalModuleTable,
  ) -> Result<ExecutionOutcome, BundleError>;
}

/// Executes payloads in a fresh JS engine per call, so no state leaks between runs.
#[derive(Debug, Default, Clone)]
pub struct SandboxExecutor {
  limits: ExecutionLimits,
  preludes: Vec<String>,
}

impl SandboxExecutor {
  pub fn new(limits: ExecutionLimits) -> Self {
    Self { limits, preludes: Vec::new() }
  }

  /// Adds a script evaluated before every payload, after the document and console shims.
  #[must_use]
  pub fn with_prelude(mut self, source: impl Into<String>) -> Self {
    self.preludes.push(source.into());
    self
  }

  #[must_use]
  pub fn with_react_shim(self) -> Self {
    self.with_prelude(REACT_SHIM)
  }

  pub fn limits(&self) -> ExecutionLimits {
    self.limits
  }

  fn create_context(&self) -> Result<Context, BundleError> {
    let mut context = Context::default();
    context.runtime_limits_mut().set_loop_iteration_limit(self.limits.loop_iteration_limit);
    context.runtime_limits_mut().set_recursion_limit(self.limits.recursion_limit);

    for source in std::iter::once(PRELUDE).chain(self.preludes.iter().map(String::as_str)) {
      context
        .eval(Source::from_bytes(source.as_bytes()))
        .map_err(|err| execution_error(err.to_string(), Vec::new()))?;
    }
    Ok(context)
  }
}

impl PayloadExecutor for SandboxExecutor {
  fn execute(
    &self,
    payload: &BundlePayload,
    host: &HostEnvironment,
    externals: &ExternalModuleTable,
  ) -> Result<ExecutionOutcome, BundleError> {
    let mut context = self.create_context()?;
    let script = render_script(payload, host, externals);

    tracing::debug!(entry = %payload.entry, externals = externals.len(), "executing payload");
    let evaluated = context.eval(Source::from_bytes(script.as_bytes()));
    if evaluated.is_ok() {
      // Promise reactions, including dynamic imports, only settle once the job queue drains.
      context.run_jobs();
    }
    let report = read_report(&mut context);

    // Engine-level failures such as exceeded limits cannot be caught by the script itself.
    if let Err(err) = evaluated {
      let console = report.map(|report| report.console_lines()).unwrap_or_default();
      tracing::warn!(entry = %payload.entry, %err, "payload aborted");
      return Err(execution_error(err.to_string(), console));
    }

    let mut report = report?;
    match report.error.take() {
      Some(message) => {
        tracing::warn!(entry = %payload.entry, %message, "payload threw");
        Err(BundleError::PayloadExecution { message, console: report.console_lines() })
      }
      None => Ok(report.into_outcome()),
    }
  }
}

fn execution_error(message: String, console: Vec<ConsoleLine>) -> BundleError {
  BundleError::PayloadExecution { message, console }
}

fn read_report(context: &mut Context) -> Result<SandboxReport, BundleError> {
  let json = context
    .eval(Source::from_bytes("__sandbox.report()"))
    .and_then(|value| value.to_string(context))
    .map_err(|err| execution_error(err.to_string(), Vec::new()))?
    .to_std_string_escaped();
  serde_json::from_str(&json)
    .map_err(|err| execution_error(format!("unreadable sandbox report: {err}"), Vec::new()))
}

fn render_script(
  payload: &BundlePayload,
  host: &HostEnvironment,
  externals: &ExternalModuleTable,
) -> String {
  let host_entries = host
    .bindings()
    .iter()
    .map(|binding| concat_string!(js_string_literal(&binding.name), ": (", binding.expression, ")"))
    .collect::<Vec<_>>()
    .join(",\n      ");

  let factories = externals
    .iter()
    .map(|module| {
      concat_string!(
        js_string_literal(&module.name),
        ": function (module, exports, require) {\n",
        module.source,
        "\n}"
      )
    })
    .collect::<Vec<_>>()
    .join(",\n");

  format!(
    "(function () {{\n  try {{\n    var host = {{\n      {host_entries}\n    }};\n    var externals = \
     __sandbox.externals(host, {{\n{factories}\n}});\n    var exports = {payload}(host, \
     externals);\n    __sandbox.finish(exports);\n  }} catch (error) {{\n    \
     __sandbox.fail(error);\n  }}\n}})();\n",
    payload = payload.to_function_expression(),
  )
}
