//! Application layer: use case orchestration over the domain.
//!
//! Services wire the domain's pure logic to the ports infrastructure
//! implements. Nothing here performs I/O directly.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{MaterializeOutcome, Materializer, TemplateCorpus};
pub use services::{
    BuildReport, BuildRequest, BuildService, Composer, DependencyInjector, next_steps,
    validate_project_name,
};
