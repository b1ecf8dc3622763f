use livepack_common::{EntryPoint, EntryPointKind, ModuleTable};
use livepack_error::BundleError;

/// Picks the module evaluation starts from.
///
/// The first candidate present in the module table wins. Without any, the first compiled module
/// in file-set order is used and the result is marked as a fallback so callers can report it.
pub fn select_entry(
  module_table: &ModuleTable,
  candidates: &[String],
) -> Result<EntryPoint, BundleError> {
  if let Some(module) = candidates.iter().find_map(|candidate| module_table.get(candidate)) {
    return Ok(EntryPoint { path: module.path.clone(), kind: EntryPointKind::Candidate });
  }

  module_table
    .first()
    .map(|module| EntryPoint { path: module.path.clone(), kind: EntryPointKind::Fallback })
    .ok_or(BundleError::EmptyFileSet)
}
