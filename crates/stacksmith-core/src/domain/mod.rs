//! Domain layer: stack axes, the rule set, resolution, and the project
//! model. No I/O happens here; everything is a pure value transformation.

pub mod axes;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod fragment;
pub mod manifest;
pub mod resolved;
pub mod resolver;
pub mod rules;
pub mod selection;
pub mod tree;

pub use axes::{
    Addon, Api, Auth, Axis, Backend, BackendClass, Database, DbSetup, DirectoryConflict,
    ExampleApp, Frontend, FrontendClass, Orm, PackageManager, Payments, Runtime, ServerDeploy,
    WebDeploy,
};
pub use catalog::DependencyCatalog;
pub use defaults::Defaults;
pub use error::{DomainError, ErrorCategory};
pub use fragment::{Fragment, FragmentContent, IncludeIf, RenderVars};
pub use manifest::{DepKind, DepSpec, Manifest, WorkspacePackage};
pub use resolved::ResolvedConfig;
pub use resolver::{ResolveOptions, Resolver};
pub use selection::StackSelection;
pub use tree::{FileBody, FileTree};
