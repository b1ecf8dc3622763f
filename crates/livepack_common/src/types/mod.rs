pub mod bundle_payload;
pub mod compiled_module;
pub mod entry_point;
pub mod external_module;
pub mod host_environment;
pub mod module_table;
pub mod source_joiner;
