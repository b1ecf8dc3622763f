use std::io;

use tracing_subscriber::{
  fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::types::log_format::LogFormat;

/// Installs the global subscriber. `RUST_LOG` wins over `level` when both are set.
pub fn init(level: Option<&str>, format: LogFormat) {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(level.unwrap_or("warn")))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

  // Logs go to stderr so a payload printed to stdout stays usable.
  let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
    LogFormat::Pretty => fmt::layer().pretty().with_target(true).with_writer(io::stderr).boxed(),
    LogFormat::Compact => {
      fmt::layer().compact().with_target(false).without_time().with_writer(io::stderr).boxed()
    }
  };

  tracing_subscriber::registry().with(layer.with_filter(filter)).init();
}
