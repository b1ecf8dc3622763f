mod bundle_error;

use std::ops::{Deref, DerefMut};

pub use crate::bundle_error::{BundleError, ConsoleLine};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Iterates over the errors that carry a typed [`BundleError`].
  pub fn bundle_errors(&self) -> impl Iterator<Item = &BundleError> {
    self.0.iter().filter_map(|error| error.downcast_ref::<BundleError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<BundleError> for BuildError {
  fn from(error: BundleError) -> Self {
    Self(vec![error.into()])
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn build_error_keeps_typed_errors() {
  let error = BuildError::from(vec![
    anyhow::anyhow!("plain"),
    BundleError::DependencyFetch { package: "left-pad".into(), source: anyhow::anyhow!("404") }
      .into(),
  ]);

  let typed = error.bundle_errors().collect::<Vec<_>>();
  assert_eq!(typed.len(), 1);
  assert!(matches!(typed[0], BundleError::DependencyFetch { package, .. } if package == "left-pad"));
  assert_eq!(error.to_string(), "plain\nFailed to load dependency: left-pad");
}
