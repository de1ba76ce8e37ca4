// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use thiserror::Error;

use crate::domain::axes::Axis;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Selection violations (user-correctable, never partial output)
    // ========================================================================
    /// The selection broke one or more compatibility rules. Carries the
    /// complete ordered list — the resolver never stops at the first.
    #[error("stack selection has {} violation(s):\n{}", reasons.len(), reasons.join("\n"))]
    Violations { reasons: Vec<String> },

    #[error("unknown value '{value}' for axis '{axis}'")]
    UnknownAxisValue { axis: Axis, value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Virtual file tree errors
    // ========================================================================
    /// Two simultaneously included fragments resolved to the same path.
    /// A corpus-authoring bug, not a user error.
    #[error("path collision in virtual file tree: {path}")]
    PathCollision { path: String },

    #[error("invalid fragment path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Violations { reasons } => {
                let mut out = vec![format!(
                    "Your stack selection has {} incompatible combination(s):",
                    reasons.len()
                )];
                out.extend(reasons.iter().map(|r| format!("  • {r}")));
                out.push("Adjust the conflicting axes and try again".into());
                out.push("Run: stacksmith list  to see every axis and value".into());
                out
            }
            Self::UnknownAxisValue { axis, value } => vec![
                format!("'{value}' is not a known value for --{axis}"),
                "Run: stacksmith list  to see supported values".into(),
            ],
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{name}' is invalid: {reason}"),
                "Use lowercase letters, digits, and hyphens".into(),
            ],
            Self::PathCollision { path } => vec![
                format!("Two template fragments both claim '{path}'"),
                "This is a template-corpus bug, not a problem with your selection".into(),
                "Please report this issue".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Violations { .. } => ErrorCategory::Compatibility,
            Self::UnknownAxisValue { .. }
            | Self::InvalidInput(_)
            | Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::PathCollision { .. } | Self::InvalidPath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
