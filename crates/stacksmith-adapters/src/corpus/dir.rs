//! Filesystem-backed template corpus.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stacksmith_core::application::{ApplicationError, TemplateCorpus};
use stacksmith_core::domain::Fragment;
use stacksmith_core::error::CoreResult;

/// Loads every file under a directory as an unconditional fragment.
///
/// User-supplied template directories have no predicate language; whatever
/// is in the directory applies to every stack. Relative paths become
/// fragment targets, always slash-separated regardless of platform. Files
/// that decode as UTF-8 are text fragments (and get `{{VAR}}`
/// substitution); everything else is carried as binary.
pub struct DirCorpus {
    root: PathBuf,
}

impl DirCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateCorpus for DirCorpus {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn fragments(&self) -> CoreResult<Vec<Fragment>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::CorpusUnavailable {
                reason: format!("not a directory: {}", self.root.display()),
            }
            .into());
        }

        let mut fragments = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| ApplicationError::CorpusUnavailable {
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                warn!(path = %entry.path().display(), "entry outside corpus root, skipping");
                continue;
            };
            let target = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let bytes =
                std::fs::read(entry.path()).map_err(|e| ApplicationError::CorpusUnavailable {
                    reason: format!("{}: {}", entry.path().display(), e),
                })?;
            let fragment = match String::from_utf8(bytes) {
                Ok(text) => Fragment::text(target, text),
                Err(e) => Fragment::binary(target, e.into_bytes()),
            };
            fragments.push(fragment);
        }
        debug!(count = fragments.len(), "directory corpus loaded");
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacksmith_core::domain::FragmentContent;

    #[test]
    fn loads_nested_files_with_slash_targets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("apps/web")).unwrap();
        std::fs::write(dir.path().join("README.md"), "# {{PROJECT_NAME}}").unwrap();
        std::fs::write(dir.path().join("apps/web/main.ts"), "export {}").unwrap();

        let mut fragments = DirCorpus::new(dir.path()).fragments().unwrap();
        fragments.sort_by(|a, b| a.target.cmp(&b.target));
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].target, "README.md");
        assert_eq!(fragments[1].target, "apps/web/main.ts");
    }

    #[test]
    fn non_utf8_files_load_as_binary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), [0xff, 0xfe, 0x00, 0x89]).unwrap();

        let fragments = DirCorpus::new(dir.path()).fragments().unwrap();
        assert!(matches!(
            fragments[0].content,
            FragmentContent::Binary(ref b) if b == &[0xff, 0xfe, 0x00, 0x89]
        ));
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = DirCorpus::new("/definitely/not/here")
            .fragments()
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
