mod executor;
mod limits;
mod outcome;

pub use crate::{
  executor::{react_shim_host, PayloadExecutor, SandboxExecutor, REACT_SHIM},
  limits::ExecutionLimits,
  outcome::ExecutionOutcome,
};
