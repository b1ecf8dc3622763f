use livepack_common::ExternalModuleTable;

use super::bundle_output::BundleOutput;

/// A bundle whose dependencies have all been fetched, ready for the execution boundary.
#[derive(Debug)]
pub struct PreparedBundle {
  pub output: BundleOutput,
  pub externals: ExternalModuleTable,
}
