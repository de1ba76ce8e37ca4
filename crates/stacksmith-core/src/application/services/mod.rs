//! Application services - use case orchestration.

pub mod build;
pub mod composer;
pub mod injector;

pub use build::{BuildReport, BuildRequest, BuildService, next_steps, validate_project_name};
pub use composer::Composer;
pub use injector::DependencyInjector;
