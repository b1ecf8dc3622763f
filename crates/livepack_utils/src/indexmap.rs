//! Insertion-ordered collections. Order matters for file sets, module tables and request lists,
//! so these are used wherever a `HashMap` would otherwise do.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
