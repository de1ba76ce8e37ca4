//! In-memory materializer for testing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use stacksmith_core::application::{
    ApplicationError, MaterializeOutcome, Materializer,
};
use stacksmith_core::domain::{DirectoryConflict, FileTree};
use stacksmith_core::error::CoreResult;

/// Materializer that keeps everything in a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryMaterializer {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<u8>>,
    existing_roots: Vec<PathBuf>,
}

impl MemoryMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `root` already exists on disk, to exercise conflict policies.
    pub fn mark_existing(&self, root: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.existing_roots.push(root.into());
        }
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    pub fn file_count(&self) -> usize {
        self.inner.read().map(|inner| inner.files.len()).unwrap_or(0)
    }
}

impl Materializer for MemoryMaterializer {
    fn materialize(
        &self,
        root: &Path,
        tree: &FileTree,
        conflict: DirectoryConflict,
    ) -> CoreResult<MaterializeOutcome> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::Materialize {
                path: root.to_path_buf(),
                reason: "materializer lock poisoned".to_string(),
            })?;

        let exists = inner.existing_roots.iter().any(|r| r == root);
        let root = if exists {
            match conflict {
                DirectoryConflict::Error => {
                    return Err(ApplicationError::ProjectExists {
                        path: root.to_path_buf(),
                    }
                    .into());
                }
                DirectoryConflict::Merge | DirectoryConflict::Overwrite => root.to_path_buf(),
                DirectoryConflict::Increment => {
                    let name = root.file_name().map(|s| s.to_string_lossy().into_owned());
                    root.with_file_name(format!("{}-2", name.unwrap_or_default()))
                }
            }
        } else {
            root.to_path_buf()
        };

        let mut files_written = 0;
        for (path, body) in tree.files() {
            inner.files.insert(root.join(&path), body.as_bytes().to_vec());
            files_written += 1;
        }
        Ok(MaterializeOutcome { root, files_written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacksmith_core::domain::FileBody;

    fn tree() -> FileTree {
        let mut tree = FileTree::new();
        tree.insert_file("a.txt", FileBody::Text("a".to_string()))
            .unwrap();
        tree
    }

    #[test]
    fn records_written_files() {
        let m = MemoryMaterializer::new();
        m.materialize(Path::new("/p/demo"), &tree(), DirectoryConflict::Error)
            .unwrap();
        assert!(m.exists(Path::new("/p/demo/a.txt")));
        assert_eq!(m.read_file(Path::new("/p/demo/a.txt")).unwrap(), "a");
    }

    #[test]
    fn marked_roots_trigger_conflict_policy() {
        let m = MemoryMaterializer::new();
        m.mark_existing("/p/demo");
        assert!(
            m.materialize(Path::new("/p/demo"), &tree(), DirectoryConflict::Error)
                .is_err()
        );
        let outcome = m
            .materialize(Path::new("/p/demo"), &tree(), DirectoryConflict::Increment)
            .unwrap();
        assert_eq!(outcome.root, PathBuf::from("/p/demo-2"));
    }
}
