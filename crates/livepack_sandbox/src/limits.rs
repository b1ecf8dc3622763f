/// Bounds applied to every payload run so a runaway module cannot hang the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
  /// Iterations a single loop may run before the engine aborts it.
  pub loop_iteration_limit: u64,
  pub recursion_limit: usize,
}

impl Default for ExecutionLimits {
  fn default() -> Self {
    Self { loop_iteration_limit: 10_000_000, recursion_limit: 512 }
  }
}
