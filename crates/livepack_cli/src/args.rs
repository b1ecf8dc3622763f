use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::{es_target::ESTarget, log_format::LogFormat};

#[derive(Subcommand)]
pub enum Command {
  /// Bundle a project directory into a single payload
  Bundle {
    #[clap(flatten)]
    input: InputArgs,

    /// Write the payload here instead of printing it
    #[clap(long, short = 'o')]
    out: Option<PathBuf>,
  },
  /// Bundle, fetch dependencies and execute the payload in the sandbox
  Run {
    #[clap(flatten)]
    input: InputArgs,

    /// Directory holding one CommonJS file per external package
    #[clap(long)]
    externals: Option<PathBuf>,

    #[clap(long)]
    loop_iteration_limit: Option<u64>,
  },
  /// Print the bare package names the project depends on
  Deps {
    #[clap(flatten)]
    input: InputArgs,
  },
  /// Apply a generated file-set delta to a project directory
  Apply { dir: PathBuf, delta: PathBuf },
}

#[derive(Args)]
pub struct InputArgs {
  pub dir: PathBuf,

  /// Force the entry file instead of picking one of the candidates
  #[clap(long)]
  pub entry: Option<String>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub entry_candidate: Option<Vec<String>>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub host_module: Option<Vec<String>>,

  #[clap(long)]
  pub target: Option<ESTarget>,

  #[clap(long)]
  pub jsx_pragma: Option<String>,

  #[clap(long)]
  pub jsx_pragma_frag: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {
  /// Filter directives, e.g. `debug` or `livepack=trace`. Overridden by RUST_LOG
  #[clap(long, global = true)]
  pub log_level: Option<String>,

  #[clap(long, global = true, default_value = "compact")]
  pub log_format: LogFormat,
}
