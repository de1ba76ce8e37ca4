//! Infrastructure adapters for Stacksmith.
//!
//! This crate implements the ports defined in
//! `stacksmith-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod builtin_corpus;
pub mod corpus;
pub mod materializer;

// Re-export commonly used adapters
pub use corpus::{DirCorpus, InMemoryCorpus};
pub use materializer::{LocalMaterializer, MemoryMaterializer};
