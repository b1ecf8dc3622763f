use std::path::Path;

use crate::{FileSetDelta, VirtualFileSet};

/// Moves virtual file sets in and out of durable storage.
pub trait FileSystem {
  fn read_file_set(&self, root: &Path) -> anyhow::Result<VirtualFileSet>;

  fn write_file(&self, root: &Path, path: &str, content: &str) -> anyhow::Result<()>;

  fn remove_file(&self, root: &Path, path: &str) -> anyhow::Result<()>;

  fn apply_delta(&self, root: &Path, delta: &FileSetDelta) -> anyhow::Result<()> {
    for path in &delta.deleted_files {
      self.remove_file(root, path)?;
    }
    for (path, content) in &delta.files {
      self.write_file(root, path, content)?;
    }
    Ok(())
  }
}
