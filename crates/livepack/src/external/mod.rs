mod memory;

use futures::future::{try_join_all, BoxFuture};
use livepack_common::{ExternalModule, ExternalModuleTable};
use livepack_error::BundleError;

pub use self::memory::MemoryExternalResolver;

/// Resolves one bare package name into a module the payload can `require`.
///
/// Implementations typically fetch from a package CDN or read a local cache.
pub trait ExternalResolver: Send + Sync {
  fn resolve<'a>(&'a self, package: &'a str) -> BoxFuture<'a, anyhow::Result<ExternalModule>>;
}

/// Resolves every dependency concurrently.
///
/// The result is all or nothing: the first failing package fails the whole set, so a payload
/// never runs with some of its packages missing.
pub async fn fetch_externals(
  dependencies: &[String],
  resolver: &dyn ExternalResolver,
) -> Result<ExternalModuleTable, BundleError> {
  tracing::debug!(count = dependencies.len(), "fetching external modules");

  let fetches = dependencies.iter().map(|package| async move {
    resolver.resolve(package).await.map_err(|source| {
      tracing::warn!(package, "failed to fetch external module: {source:#}");
      BundleError::DependencyFetch { package: package.clone(), source }
    })
  });

  Ok(try_join_all(fetches).await?.into_iter().collect())
}
