mod bundler_options;
mod types;

pub use bundler_options::{
  es_target::ESTarget,
  jsx::{JsxOptions, NormalizedJsxOptions},
  module_type::ModuleType,
  normalized_bundler_options::{
    NormalizedBundlerOptions, DEFAULT_ENTRY_CANDIDATES, DEFAULT_HOST_MODULES,
  },
  BundlerOptions,
};

pub use crate::types::{
  bundle_payload::{BundlePayload, EXTERNALS_PARAM, HOST_PARAM},
  compiled_module::CompiledModule,
  entry_point::{EntryPoint, EntryPointKind},
  external_module::{ExternalModule, ExternalModuleTable},
  host_environment::{HostBinding, HostEnvironment},
  module_table::ModuleTable,
  source_joiner::SourceJoiner,
};
