use std::path::{Path, PathBuf};

use livepack_utils::virtual_path;
use walkdir::{DirEntry, WalkDir};

use crate::{FileSystem, VirtualFileSet};

/// Maps a directory on disk onto a virtual file set.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
  fn resolve(root: &Path, path: &str) -> anyhow::Result<PathBuf> {
    let normalized = virtual_path::join_normalized("", path)
      .filter(|normalized| !normalized.is_empty() && !path.starts_with('/'))
      .ok_or_else(|| anyhow::anyhow!("Refusing to touch '{path}' outside of the project"))?;
    Ok(normalized.split('/').fold(root.to_path_buf(), |acc, segment| acc.join(segment)))
  }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
  entry.depth() > 0
    && entry.file_type().is_dir()
    && entry.file_name().to_str().is_some_and(|name| name.starts_with('.') || name == "node_modules")
}

impl FileSystem for OsFileSystem {
  fn read_file_set(&self, root: &Path) -> anyhow::Result<VirtualFileSet> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| !is_skipped_dir(e)) {
      let entry = entry?;
      if !entry.file_type().is_file() {
        continue;
      }
      let relative = entry.path().strip_prefix(root)?;
      let Some(key) = relative.to_str().map(|key| key.replace('\\', "/")) else {
        tracing::warn!(path = %relative.display(), "skipping file with a non UTF-8 path");
        continue;
      };
      match std::fs::read_to_string(entry.path()) {
        Ok(content) => entries.push((key, content)),
        Err(err) => tracing::warn!(path = %key, %err, "skipping unreadable file"),
      }
    }
    Ok(entries.into_iter().collect())
  }

  fn write_file(&self, root: &Path, path: &str, content: &str) -> anyhow::Result<()> {
    let target = Self::resolve(root, path)?;
    if let Some(parent) = target.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, content)?;
    Ok(())
  }

  fn remove_file(&self, root: &Path, path: &str) -> anyhow::Result<()> {
    let target = Self::resolve(root, path)?;
    match std::fs::remove_file(target) {
      Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
      _ => Ok(()),
    }
  }
}

#[test]
fn rejects_paths_outside_root() {
  let root = Path::new("project");
  assert!(OsFileSystem::resolve(root, "../secret").is_err());
  assert!(OsFileSystem::resolve(root, "/etc/passwd").is_err());
  assert_eq!(OsFileSystem::resolve(root, "src/./App.jsx").unwrap(), root.join("src").join("App.jsx"));
}
