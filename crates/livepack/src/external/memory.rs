use futures::{future::BoxFuture, FutureExt};
use livepack_common::ExternalModule;
use rustc_hash::FxHashMap;

use super::ExternalResolver;

/// Serves packages from sources registered up front.
#[derive(Debug, Default, Clone)]
pub struct MemoryExternalResolver {
  sources: FxHashMap<String, String>,
}

impl MemoryExternalResolver {
  pub fn insert(&mut self, package: impl Into<String>, source: impl Into<String>) {
    self.sources.insert(package.into(), source.into());
  }

  #[must_use]
  pub fn with_module(mut self, package: impl Into<String>, source: impl Into<String>) -> Self {
    self.insert(package, source);
    self
  }
}

impl ExternalResolver for MemoryExternalResolver {
  fn resolve<'a>(&'a self, package: &'a str) -> BoxFuture<'a, anyhow::Result<ExternalModule>> {
    let ret = self
      .sources
      .get(package)
      .map(|source| ExternalModule::new(package, source.as_str()))
      .ok_or_else(|| anyhow::anyhow!("Package '{package}' is not available"));
    futures::future::ready(ret).boxed()
  }
}
