use arcstr::ArcStr;
use livepack_utils::{concat_string, virtual_path};

use crate::ResolveError;

const EXTENSIONS: [&str; 2] = [".jsx", ".js"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
  /// `./` or `../` joined onto the importer's directory, or `/` joined onto the root.
  Relative,
  /// The whole key equals the request, with or without an extension.
  Exact,
  /// The key ends with `/` followed by the request.
  Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReturn {
  pub path: ArcStr,
  pub tier: MatchTier,
}

pub fn is_relative_specifier(specifier: &str) -> bool {
  specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Resolves requests against a fixed set of module paths.
///
/// Tiers are tried in order: importer-relative, exact, suffix. The first tier with any match
/// wins, and more than one match inside that tier is an error instead of a guess. Paths are
/// kept sorted so candidate lists do not depend on insertion order.
#[derive(Debug, Default)]
pub struct Resolver {
  paths: Vec<ArcStr>,
}

impl Resolver {
  pub fn new<I, P>(paths: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<ArcStr>,
  {
    let mut paths = paths.into_iter().map(Into::into).collect::<Vec<ArcStr>>();
    paths.sort_unstable();
    paths.dedup();
    Self { paths }
  }

  pub fn paths(&self) -> &[ArcStr] {
    &self.paths
  }

  pub fn resolve(&self, importer: Option<&str>, specifier: &str) -> Result<ResolveReturn, ResolveError> {
    let mut outside_root = false;

    // Root-relative requests are joined onto the root, relative ones onto the importer's dir.
    let joined = if let Some(rooted) = specifier.strip_prefix('/') {
      Some(virtual_path::join_normalized("", rooted))
    } else {
      importer
        .filter(|_| is_relative_specifier(specifier))
        .map(|importer| virtual_path::join_normalized(virtual_path::dirname(importer), specifier))
    };
    match joined {
      Some(Some(joined)) => {
        if let Some(path) = self.pick(self.matches(|key| with_extensions(key, &joined)))? {
          return Ok(ResolveReturn { path, tier: MatchTier::Relative });
        }
      }
      Some(None) => outside_root = true,
      None => {}
    }

    let name = specifier.strip_prefix("./").unwrap_or(specifier);
    if name.is_empty() {
      return Err(ResolveError::NotFound);
    }

    if let Some(path) = self.pick(self.matches(|key| with_extensions(key, name)))? {
      return Ok(ResolveReturn { path, tier: MatchTier::Exact });
    }

    let suffix = concat_string!("/", name);
    let suffixed = self.matches(|key| {
      key.rfind(suffix.as_str()).is_some_and(|idx| with_extensions(&key[idx..], &suffix))
    });
    if let Some(path) = self.pick(suffixed)? {
      return Ok(ResolveReturn { path, tier: MatchTier::Suffix });
    }

    Err(if outside_root { ResolveError::OutsideRoot } else { ResolveError::NotFound })
  }

  fn matches(&self, predicate: impl Fn(&str) -> bool) -> Vec<&ArcStr> {
    self.paths.iter().filter(|key| predicate(key)).collect()
  }

  fn pick(&self, matches: Vec<&ArcStr>) -> Result<Option<ArcStr>, ResolveError> {
    match matches.as_slice() {
      [] => Ok(None),
      [only] => Ok(Some(ArcStr::clone(only))),
      many => Err(ResolveError::Ambiguous {
        candidates: many.iter().map(ToString::to_string).collect(),
      }),
    }
  }
}

/// `key` is `name` itself or `name` plus one of the script extensions.
fn with_extensions(key: &str, name: &str) -> bool {
  key.strip_prefix(name).is_some_and(|rest| rest.is_empty() || EXTENSIONS.contains(&rest))
}
