mod bundler;
mod external;
mod generate_stage;
mod link_stage;
mod preview;
mod scan_stage;
mod transform_stage;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  external::{fetch_externals, ExternalResolver, MemoryExternalResolver},
  preview::{PreviewOptions, PreviewSession, PreviewState},
  scan_stage::{
    select_entry::select_entry,
    specifier_scanner::{RegexSpecifierScanner, SpecifierScanner},
  },
  types::{bundle_output::BundleOutput, prepared_bundle::PreparedBundle},
};
pub use livepack_common::*;
pub use livepack_error::{BuildError, BuildResult, BundleError, ConsoleLine};
pub use livepack_fs::{FileSetDelta, GenerationRequest, VirtualFileSet};
