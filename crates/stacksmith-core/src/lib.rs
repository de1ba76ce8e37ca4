//! Stacksmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stacksmith
//! monorepo generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         stacksmith-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (BuildService, Composer, DepInjector)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: TemplateCorpus, Materializer)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stacksmith-adapters (Infrastructure)  │
//! │ (InMemoryCorpus, LocalMaterializer, etc)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (StackSelection, Resolver, FileTree)    │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stacksmith_core::{
//!     application::BuildService,
//!     domain::{Defaults, Resolver, StackSelection},
//! };
//!
//! // 1. Describe the stack (unset axes fall back to defaults)
//! let selection = StackSelection {
//!     backend: Some(stacksmith_core::domain::Backend::Hono),
//!     ..StackSelection::default()
//! };
//!
//! // 2. Resolve and build (with injected adapters)
//! let service = BuildService::new(corpus, materializer);
//! let report = service.build(&request).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildReport, BuildRequest, BuildService, Composer, DependencyInjector,
        ports::{Materializer, TemplateCorpus},
    };
    pub use crate::domain::{
        Defaults, DependencyCatalog, FileTree, Fragment, FragmentContent, IncludeIf, RenderVars,
        ResolvedConfig, Resolver, StackSelection,
    };
    pub use crate::error::{CoreError, CoreResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
