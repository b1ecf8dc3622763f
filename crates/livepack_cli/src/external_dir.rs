use std::path::{Path, PathBuf};

use futures::{future::BoxFuture, FutureExt};
use livepack::{ExternalModule, ExternalResolver};

/// Serves packages from a directory of CommonJS files.
///
/// `left-pad` is looked up as `<root>/left-pad.js`, then `<root>/left-pad/index.js`. Scoped names
/// map onto nested directories.
#[derive(Debug, Clone)]
pub struct DirExternalResolver {
  root: PathBuf,
}

impl DirExternalResolver {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn candidates(&self, package: &str) -> anyhow::Result<[PathBuf; 2]> {
    let segments = package.split('/').collect::<Vec<_>>();
    let Some((last, parents)) = segments.split_last().filter(|_| {
      segments.iter().all(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
    }) else {
      anyhow::bail!("Invalid package name '{package}'");
    };

    let parent = parents.iter().fold(self.root.clone(), |acc, segment| acc.join(segment));
    Ok([parent.join(format!("{last}.js")), parent.join(last).join("index.js")])
  }
}

async fn read_first(package: &str, candidates: &[PathBuf], root: &Path) -> anyhow::Result<ExternalModule> {
  for path in candidates {
    match tokio::fs::read_to_string(path).await {
      Ok(source) => {
        tracing::debug!(package, path = %path.display(), "loaded external");
        return Ok(ExternalModule::new(package, source));
      }
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
      Err(err) => return Err(err.into()),
    }
  }
  anyhow::bail!("Package '{package}' was not found in {}", root.display())
}

impl ExternalResolver for DirExternalResolver {
  fn resolve<'a>(&'a self, package: &'a str) -> BoxFuture<'a, anyhow::Result<ExternalModule>> {
    async move {
      let candidates = self.candidates(package)?;
      read_first(package, &candidates, &self.root).await
    }
    .boxed()
  }
}
