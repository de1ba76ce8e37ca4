//! Materializer adapters.
//!
//! Implementations of `stacksmith_core::application::ports::Materializer`.

mod local;
mod memory;

pub use local::LocalMaterializer;
pub use memory::MemoryMaterializer;
