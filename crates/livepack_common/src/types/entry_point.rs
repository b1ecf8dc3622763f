use arcstr::ArcStr;

#[derive(Debug, Clone)]
pub struct EntryPoint {
  pub path: ArcStr,
  pub kind: EntryPointKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPointKind {
  /// One of the configured candidate paths exists.
  Candidate,
  /// No candidate exists, the first compiled module was picked instead.
  Fallback,
}
