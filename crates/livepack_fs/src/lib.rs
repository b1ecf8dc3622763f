mod file_set_delta;
mod file_system;
mod generation_request;
#[cfg(feature = "os")]
mod os;
mod virtual_file_set;

pub use crate::{
  file_set_delta::FileSetDelta, file_system::FileSystem, generation_request::GenerationRequest,
  virtual_file_set::VirtualFileSet,
};
#[cfg(feature = "os")]
pub use os::OsFileSystem;
