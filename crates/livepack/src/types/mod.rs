pub mod bundle_output;
pub mod prepared_bundle;

use std::sync::Arc;

use livepack_common::NormalizedBundlerOptions;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
