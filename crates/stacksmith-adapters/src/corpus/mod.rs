//! Template corpus adapters.
//!
//! Implementations of `stacksmith_core::application::ports::TemplateCorpus`.

mod dir;
mod memory;

pub use dir::DirCorpus;
pub use memory::InMemoryCorpus;
