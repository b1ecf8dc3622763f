use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
  #[error("no module matches")]
  NotFound,
  #[error("request climbs above the root of the file set")]
  OutsideRoot,
  #[error("ambiguous request, candidates are {}", .candidates.iter().join(", "))]
  Ambiguous { candidates: Vec<String> },
}
