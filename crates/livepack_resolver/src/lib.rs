// Specifier resolution against the in-memory module table. There is no filesystem to probe,
// so every lookup is a match over the known module paths.

pub mod error;
mod resolver;

pub use crate::{
  error::ResolveError,
  resolver::{is_relative_specifier, MatchTier, ResolveReturn, Resolver},
};
