pub mod es_target;
pub mod log_format;
