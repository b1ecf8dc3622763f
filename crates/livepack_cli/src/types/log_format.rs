use clap::ValueEnum;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum LogFormat {
  /// Multi-line, with source locations.
  Pretty,
  #[default]
  Compact,
}
