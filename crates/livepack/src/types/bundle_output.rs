use livepack_common::{BundlePayload, EntryPoint, ModuleTable};

#[derive(Debug)]
pub struct BundleOutput {
  pub payload: BundlePayload,
  pub module_table: ModuleTable,
  pub entry: EntryPoint,
  /// Problems that degraded the bundle without failing it.
  pub warnings: Vec<anyhow::Error>,
}
