//! Real filesystem materializer.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stacksmith_core::application::{ApplicationError, MaterializeOutcome, Materializer};
use stacksmith_core::domain::{DirectoryConflict, FileTree};
use stacksmith_core::error::CoreResult;

/// Writes a composed tree to disk.
///
/// Conflict policies when the destination already exists and is non-empty:
/// - `error`     - refuse, leaving the directory untouched
/// - `merge`     - write into it; clashing files are replaced
/// - `overwrite` - remove the directory first
/// - `increment` - write to `name-2`, `name-3`, ... instead
///
/// An existing but empty directory is never a conflict.
#[derive(Debug, Clone, Default)]
pub struct LocalMaterializer;

impl LocalMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl Materializer for LocalMaterializer {
    #[instrument(skip(self, tree), fields(root = %root.display(), files = tree.len()))]
    fn materialize(
        &self,
        root: &Path,
        tree: &FileTree,
        conflict: DirectoryConflict,
    ) -> CoreResult<MaterializeOutcome> {
        let root = resolve_destination(root, conflict)?;

        let mut files_written = 0;
        for (path, body) in tree.files() {
            let dest = root.join(&path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
            fs::write(&dest, body.as_bytes()).map_err(|e| io_error(&dest, e))?;
            debug!(path = %dest.display(), "wrote file");
            files_written += 1;
        }

        info!(files = files_written, root = %root.display(), "tree materialized");
        Ok(MaterializeOutcome { root, files_written })
    }
}

fn resolve_destination(root: &Path, conflict: DirectoryConflict) -> CoreResult<PathBuf> {
    if !is_conflicting(root) {
        return Ok(root.to_path_buf());
    }
    match conflict {
        DirectoryConflict::Error => Err(ApplicationError::ProjectExists {
            path: root.to_path_buf(),
        }
        .into()),
        DirectoryConflict::Merge => Ok(root.to_path_buf()),
        DirectoryConflict::Overwrite => {
            fs::remove_dir_all(root).map_err(|e| io_error(root, e))?;
            Ok(root.to_path_buf())
        }
        DirectoryConflict::Increment => {
            let base = root.to_path_buf();
            for n in 2u32.. {
                let candidate = increment_path(&base, n);
                if !is_conflicting(&candidate) {
                    return Ok(candidate);
                }
            }
            unreachable!("u32 suffixes exhausted")
        }
    }
}

/// A destination conflicts when it exists as a file, or as a directory with
/// any entries.
fn is_conflicting(path: &Path) -> bool {
    if path.is_file() {
        return true;
    }
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}

fn increment_path(base: &Path, n: u32) -> PathBuf {
    let name = base
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{name}-{n}"))
}

fn io_error(path: &Path, err: std::io::Error) -> ApplicationError {
    ApplicationError::Materialize {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacksmith_core::domain::FileBody;

    fn sample_tree() -> FileTree {
        let mut tree = FileTree::new();
        tree.insert_file("package.json", FileBody::Text("{}\n".to_string()))
            .unwrap();
        tree.insert_file(
            "apps/web/src/main.tsx",
            FileBody::Text("render()\n".to_string()),
        )
        .unwrap();
        tree.insert_file(
            "public/favicon.png",
            FileBody::Binary(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .unwrap();
        tree
    }

    #[test]
    fn writes_nested_tree_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        let outcome = LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Error)
            .unwrap();
        assert_eq!(outcome.files_written, 3);
        assert_eq!(outcome.root, root);
        assert_eq!(
            std::fs::read_to_string(root.join("apps/web/src/main.tsx")).unwrap(),
            "render()\n"
        );
        assert_eq!(
            std::fs::read(root.join("public/favicon.png")).unwrap(),
            vec![0x89, 0x50, 0x4e, 0x47]
        );
    }

    #[test]
    fn error_policy_refuses_non_empty_destination() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("keep.txt"), "existing").unwrap();

        let err = LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Error)
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
        // Nothing was written.
        assert!(!root.join("package.json").exists());
    }

    #[test]
    fn empty_directory_is_not_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();
        LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Error)
            .unwrap();
    }

    #[test]
    fn merge_keeps_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("keep.txt"), "existing").unwrap();

        LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Merge)
            .unwrap();
        assert!(root.join("keep.txt").exists());
        assert!(root.join("package.json").exists());
    }

    #[test]
    fn overwrite_replaces_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("stale.txt"), "old").unwrap();

        LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Overwrite)
            .unwrap();
        assert!(!root.join("stale.txt").exists());
        assert!(root.join("package.json").exists());
    }

    #[test]
    fn increment_picks_next_free_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("keep.txt"), "existing").unwrap();

        let outcome = LocalMaterializer::new()
            .materialize(&root, &sample_tree(), DirectoryConflict::Increment)
            .unwrap();
        assert_eq!(outcome.root, dir.path().join("demo-2"));
        assert!(outcome.root.join("package.json").exists());
        assert!(root.join("keep.txt").exists());
    }
}
