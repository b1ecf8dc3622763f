use std::{cmp::Ordering, fmt, sync::Arc};

use itertools::Itertools;

use crate::PreparedBundle;

/// What a preview shows. Every state after `Idle` belongs to one run, identified by the
/// generation of the input that started it.
#[derive(Debug, Clone, Default)]
pub enum PreviewState {
  #[default]
  Idle,
  Bundling { generation: u64, dependencies: Vec<String> },
  Ready { generation: u64, bundle: Arc<PreparedBundle> },
  Failed { generation: u64, message: String },
}

impl PreviewState {
  pub fn generation(&self) -> u64 {
    match self {
      Self::Idle => 0,
      Self::Bundling { generation, .. }
      | Self::Ready { generation, .. }
      | Self::Failed { generation, .. } => *generation,
    }
  }

  /// Whether the run behind this state has finished.
  pub fn is_settled(&self) -> bool {
    matches!(self, Self::Ready { .. } | Self::Failed { .. })
  }

  /// A newer input always wins. Within one run, only its final state may replace its progress.
  pub fn supersedes(&self, current: &Self) -> bool {
    match self.generation().cmp(&current.generation()) {
      Ordering::Greater => true,
      Ordering::Equal => self.is_settled() && !current.is_settled(),
      Ordering::Less => false,
    }
  }
}

impl fmt::Display for PreviewState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Idle => Ok(()),
      Self::Bundling { dependencies, .. } if dependencies.is_empty() => write!(f, "Bundling..."),
      Self::Bundling { dependencies, .. } => {
        write!(f, "Loading dependencies: {}...", dependencies.iter().join(", "))
      }
      Self::Ready { .. } => write!(f, "Bundled successfully."),
      Self::Failed { message, .. } => write!(f, "Bundle Error: {message}"),
    }
  }
}

#[test]
fn newer_generations_win() {
  let bundling = |generation| PreviewState::Bundling { generation, dependencies: vec![] };
  let failed = |generation| PreviewState::Failed { generation, message: String::new() };

  assert!(bundling(1).supersedes(&PreviewState::Idle));
  assert!(failed(1).supersedes(&bundling(1)));
  assert!(!bundling(1).supersedes(&failed(1)));
  assert!(bundling(2).supersedes(&failed(1)));
  assert!(!failed(1).supersedes(&bundling(2)));
  assert!(!failed(2).supersedes(&failed(2)));
}

#[test]
fn status_text() {
  let state = PreviewState::Bundling {
    generation: 1,
    dependencies: vec!["left-pad".to_string(), "clsx".to_string()],
  };
  assert_eq!(state.to_string(), "Loading dependencies: left-pad, clsx...");
  let state = PreviewState::Failed { generation: 1, message: "Failed to load dependency: x".into() };
  assert_eq!(state.to_string(), "Bundle Error: Failed to load dependency: x");
}
