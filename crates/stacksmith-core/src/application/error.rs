//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A fragment failed to render or land in the tree.
    #[error("composition failed at '{path}': {reason}")]
    Composition { path: String, reason: String },

    /// The injector needed a package the pinned catalog does not carry.
    #[error("dependency '{package}' is not in the pinned catalog")]
    CatalogMiss { package: String },

    /// A manifest in the composed tree is not valid JSON (or not an object).
    #[error("manifest '{path}' is malformed: {reason}")]
    InvalidManifest { path: String, reason: String },

    /// The injector expected a manifest the corpus never produced.
    #[error("manifest '{path}' is missing from the composed tree")]
    ManifestMissing { path: String },

    /// The template corpus could not be loaded.
    #[error("template corpus unavailable: {reason}")]
    CorpusUnavailable { reason: String },

    /// Writing the tree to disk failed.
    #[error("materialization failed at {path}: {reason}")]
    Materialize { path: PathBuf, reason: String },

    /// Target directory already exists and the conflict policy is `error`.
    #[error("directory already exists: {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Composition { path, .. } => vec![
                format!("A template fragment for '{path}' could not be composed"),
                "This is a template-corpus bug, not a problem with your selection".into(),
                "Please report this issue".into(),
            ],
            Self::CatalogMiss { package } => vec![
                format!("No pinned version exists for '{package}'"),
                "The dependency catalog and templates are out of sync".into(),
                "Please report this issue".into(),
            ],
            Self::InvalidManifest { path, .. } | Self::ManifestMissing { path } => vec![
                format!("The composed tree has a broken manifest at '{path}'"),
                "Please report this issue".into(),
            ],
            Self::CorpusUnavailable { .. } => vec![
                "The template corpus could not be loaded".into(),
                "If you passed --templates, check the directory exists and is readable".into(),
            ],
            Self::Materialize { path, .. } => vec![
                format!("Failed to write to: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --directory-conflict merge|overwrite|increment to proceed".into(),
                "Or choose a different project name".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Composition { .. }
            | Self::CatalogMiss { .. }
            | Self::InvalidManifest { .. }
            | Self::ManifestMissing { .. } => ErrorCategory::Internal,
            Self::CorpusUnavailable { .. } => ErrorCategory::Configuration,
            Self::Materialize { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
