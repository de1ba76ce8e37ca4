//! In-memory project tree.
//!
//! The composition engine builds the whole project here before anything
//! touches disk. Entries live in `BTreeMap`s, so every walk comes out in
//! the same sorted order and generated output is byte-stable across runs.

use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Contents of one file in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    Text(String),
    Binary(Vec<u8>),
}

impl FileBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileBody::Text(s) => s.as_bytes(),
            FileBody::Binary(b) => b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileBody::Text(s) => Some(s),
            FileBody::Binary(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir(Directory),
    File(FileBody),
}

#[derive(Debug, Clone, Default)]
struct Directory {
    entries: BTreeMap<String, Node>,
}

/// Virtual project tree keyed by slash-separated relative paths.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    root: Directory,
    file_count: usize,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new file. Colliding with an existing file, or with a
    /// directory anywhere along the path, is an error: two fragments
    /// claiming one path is a composition bug, never a merge.
    pub fn insert_file(&mut self, path: &str, body: FileBody) -> Result<(), DomainError> {
        self.place(path, body, false)
    }

    /// Insert or replace a file. Directory collisions still error; only an
    /// existing file at the exact path is replaced. This is the injector's
    /// write path for manifests it has read and merged.
    pub fn write_file(&mut self, path: &str, body: FileBody) -> Result<(), DomainError> {
        self.place(path, body, true)
    }

    fn place(&mut self, path: &str, body: FileBody, replace: bool) -> Result<(), DomainError> {
        let segments = split_path(path)?;
        let (file_name, dirs) = segments
            .split_last()
            .ok_or_else(|| DomainError::InvalidPath {
                path: path.to_string(),
                reason: "path has no file name".to_string(),
            })?;

        let mut cursor = &mut self.root;
        for (depth, segment) in dirs.iter().enumerate() {
            let node = cursor
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| Node::Dir(Directory::default()));
            match node {
                Node::Dir(dir) => cursor = dir,
                Node::File(_) => {
                    return Err(DomainError::PathCollision {
                        path: segments[..=depth].join("/"),
                    });
                }
            }
        }

        match cursor.entries.get(*file_name) {
            Some(Node::Dir(_)) => Err(DomainError::PathCollision {
                path: path.to_string(),
            }),
            Some(Node::File(_)) if !replace => Err(DomainError::PathCollision {
                path: path.to_string(),
            }),
            Some(Node::File(_)) => {
                cursor
                    .entries
                    .insert((*file_name).to_string(), Node::File(body));
                Ok(())
            }
            None => {
                cursor
                    .entries
                    .insert((*file_name).to_string(), Node::File(body));
                self.file_count += 1;
                Ok(())
            }
        }
    }

    /// Look up a file by exact path.
    pub fn file(&self, path: &str) -> Option<&FileBody> {
        let segments = split_path(path).ok()?;
        let (file_name, dirs) = segments.split_last()?;
        let mut cursor = &self.root;
        for segment in dirs {
            match cursor.entries.get(*segment)? {
                Node::Dir(dir) => cursor = dir,
                Node::File(_) => return None,
            }
        }
        match cursor.entries.get(*file_name)? {
            Node::File(body) => Some(body),
            Node::Dir(_) => None,
        }
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    /// Number of files (directories are implicit).
    pub fn len(&self) -> usize {
        self.file_count
    }

    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Every `(path, body)` pair, sorted lexicographically by path.
    pub fn files(&self) -> Vec<(String, &FileBody)> {
        let mut out = Vec::with_capacity(self.file_count);
        walk(&self.root, String::new(), &mut out);
        out
    }
}

fn walk<'a>(dir: &'a Directory, prefix: String, out: &mut Vec<(String, &'a FileBody)>) {
    for (name, node) in &dir.entries {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        match node {
            Node::Dir(child) => walk(child, path, out),
            Node::File(body) => out.push((path, body)),
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    if path.starts_with('/') {
        return Err(invalid("path must be relative"));
    }
    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments {
        match *segment {
            "" => return Err(invalid("empty path segment")),
            "." | ".." => return Err(invalid("path may not contain '.' or '..' segments")),
            _ => {}
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FileBody {
        FileBody::Text(s.to_string())
    }

    #[test]
    fn insert_and_lookup() {
        let mut tree = FileTree::new();
        tree.insert_file("package.json", text("{}")).unwrap();
        tree.insert_file("apps/web/src/main.tsx", text("render()"))
            .unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(
            tree.file("apps/web/src/main.tsx").unwrap().as_text(),
            Some("render()")
        );
        assert!(tree.file("apps/web").is_none());
    }

    #[test]
    fn duplicate_file_is_a_collision() {
        let mut tree = FileTree::new();
        tree.insert_file("a/b.txt", text("one")).unwrap();
        let err = tree.insert_file("a/b.txt", text("two")).unwrap_err();
        assert!(matches!(err, DomainError::PathCollision { path } if path == "a/b.txt"));
    }

    #[test]
    fn file_blocking_a_directory_is_a_collision() {
        let mut tree = FileTree::new();
        tree.insert_file("a", text("file")).unwrap();
        let err = tree.insert_file("a/b.txt", text("child")).unwrap_err();
        assert!(matches!(err, DomainError::PathCollision { path } if path == "a"));
    }

    #[test]
    fn directory_blocking_a_file_is_a_collision() {
        let mut tree = FileTree::new();
        tree.insert_file("a/b.txt", text("child")).unwrap();
        assert!(tree.insert_file("a", text("file")).is_err());
    }

    #[test]
    fn write_file_replaces_in_place() {
        let mut tree = FileTree::new();
        tree.insert_file("package.json", text("{}")).unwrap();
        tree.write_file("package.json", text("{\"name\":\"x\"}"))
            .unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.file("package.json").unwrap().as_text(),
            Some("{\"name\":\"x\"}")
        );
    }

    #[test]
    fn walk_is_sorted() {
        let mut tree = FileTree::new();
        tree.insert_file("z.txt", text("")).unwrap();
        tree.insert_file("apps/web/index.html", text("")).unwrap();
        tree.insert_file("apps/server/index.ts", text("")).unwrap();
        tree.insert_file("README.md", text("")).unwrap();
        let paths: Vec<String> = tree.files().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "README.md",
                "apps/server/index.ts",
                "apps/web/index.html",
                "z.txt"
            ]
        );
    }

    #[test]
    fn bad_paths_rejected() {
        let mut tree = FileTree::new();
        for path in ["", "/abs.txt", "a//b.txt", "../up.txt", "a/./b.txt"] {
            assert!(
                matches!(
                    tree.insert_file(path, text("")),
                    Err(DomainError::InvalidPath { .. })
                ),
                "accepted {path:?}"
            );
        }
    }
}
