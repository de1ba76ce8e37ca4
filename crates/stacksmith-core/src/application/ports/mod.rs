//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stacksmith-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{DirectoryConflict, Fragment, FileTree};
use crate::error::CoreResult;

/// Port for template fragment storage.
///
/// Implemented by:
/// - `stacksmith_adapters::corpus::InMemoryCorpus` (built-in templates)
/// - `stacksmith_adapters::corpus::DirCorpus` (user template directories)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCorpus: Send + Sync {
    /// Every fragment the corpus carries. The composer filters by each
    /// fragment's own inclusion predicate; the corpus never pre-filters.
    fn fragments(&self) -> CoreResult<Vec<Fragment>>;
}

/// Port for writing a composed tree to its final destination.
///
/// Implemented by:
/// - `stacksmith_adapters::materializer::LocalMaterializer` (production)
/// - `stacksmith_adapters::materializer::MemoryMaterializer` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Materializer: Send + Sync {
    /// Write `tree` under `root`, applying `conflict` if `root` exists.
    ///
    /// The returned outcome carries the directory actually written, which
    /// differs from `root` under the `increment` policy.
    fn materialize(
        &self,
        root: &Path,
        tree: &FileTree,
        conflict: DirectoryConflict,
    ) -> CoreResult<MaterializeOutcome>;
}

/// What a materializer actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOutcome {
    /// Directory the project landed in.
    pub root: PathBuf,
    pub files_written: usize,
}
