//! `package.json` manifests and the workspace layout.
//!
//! Generated projects are monorepos with a fixed shape: apps under `apps/`,
//! shared packages under `packages/`. [`WorkspacePackage`] names every
//! manifest location the injector may touch; nothing else in the tree is
//! ever edited after composition.
//!
//! Manifests are held as `serde_json` maps, which keep keys in sorted
//! order, so serialized output is deterministic without extra work.

use serde_json::{Map, Value};

/// Every manifest location the injector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkspacePackage {
    Root,
    Web,
    Native,
    Server,
    Db,
    Auth,
    Api,
}

impl WorkspacePackage {
    pub const ALL: &'static [WorkspacePackage] = &[
        WorkspacePackage::Root,
        WorkspacePackage::Web,
        WorkspacePackage::Native,
        WorkspacePackage::Server,
        WorkspacePackage::Db,
        WorkspacePackage::Auth,
        WorkspacePackage::Api,
    ];

    /// Path of this package's manifest, relative to the project root.
    pub const fn manifest_path(&self) -> &'static str {
        match self {
            WorkspacePackage::Root => "package.json",
            WorkspacePackage::Web => "apps/web/package.json",
            WorkspacePackage::Native => "apps/native/package.json",
            WorkspacePackage::Server => "apps/server/package.json",
            WorkspacePackage::Db => "packages/db/package.json",
            WorkspacePackage::Auth => "packages/auth/package.json",
            WorkspacePackage::Api => "packages/api/package.json",
        }
    }

    /// The `name` field this package's manifest carries. The root manifest
    /// is named after the project instead.
    pub const fn package_name(&self) -> &'static str {
        match self {
            WorkspacePackage::Root => "",
            WorkspacePackage::Web => "web",
            WorkspacePackage::Native => "native",
            WorkspacePackage::Server => "server",
            WorkspacePackage::Db => "@repo/db",
            WorkspacePackage::Auth => "@repo/auth",
            WorkspacePackage::Api => "@repo/api",
        }
    }
}

/// Which dependency table an entry lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepKind {
    Normal,
    Dev,
}

impl DepKind {
    pub const fn manifest_key(&self) -> &'static str {
        match self {
            DepKind::Normal => "dependencies",
            DepKind::Dev => "devDependencies",
        }
    }
}

/// One dependency the injector wants present in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepSpec {
    /// Version comes from the pinned catalog; a miss is fatal.
    Catalog(&'static str),
    /// Reference to a sibling workspace package (`workspace:*`).
    Workspace(WorkspacePackage),
}

/// A parsed `package.json`.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text. The document must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { fields })
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    /// Ensure `name -> version` is present in the given table. Additive and
    /// idempotent: existing entries with the same version are untouched; a
    /// differing version is overwritten because the catalog is authoritative.
    /// Returns whether the manifest changed.
    pub fn add_dependency(&mut self, kind: DepKind, name: &str, version: &str) -> bool {
        let entry = self
            .fields
            .entry(kind.manifest_key().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            // A non-object dependency table is malformed; start over.
            *entry = Value::Object(Map::new());
        }
        let Some(table) = entry.as_object_mut() else {
            return false;
        };
        match table.get(name) {
            Some(Value::String(existing)) if existing == version => false,
            _ => {
                table.insert(name.to_string(), Value::String(version.to_string()));
                true
            }
        }
    }

    pub fn dependency(&self, kind: DepKind, name: &str) -> Option<&str> {
        self.fields
            .get(kind.manifest_key())?
            .as_object()?
            .get(name)?
            .as_str()
    }

    /// Serialize with a trailing newline, keys sorted.
    pub fn to_pretty_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&Value::Object(self.fields.clone()))
            .unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_paths_are_distinct() {
        let mut paths: Vec<_> = WorkspacePackage::ALL
            .iter()
            .map(|p| p.manifest_path())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), WorkspacePackage::ALL.len());
    }

    #[test]
    fn add_dependency_is_idempotent() {
        let mut manifest = Manifest::parse("{\"name\":\"web\"}").unwrap();
        assert!(manifest.add_dependency(DepKind::Normal, "react", "^19.0.0"));
        assert!(!manifest.add_dependency(DepKind::Normal, "react", "^19.0.0"));
        assert_eq!(manifest.dependency(DepKind::Normal, "react"), Some("^19.0.0"));
    }

    #[test]
    fn add_dependency_overwrites_differing_version() {
        let mut manifest =
            Manifest::parse("{\"dependencies\":{\"react\":\"^18.0.0\"}}").unwrap();
        assert!(manifest.add_dependency(DepKind::Normal, "react", "^19.0.0"));
        assert_eq!(manifest.dependency(DepKind::Normal, "react"), Some("^19.0.0"));
    }

    #[test]
    fn merge_preserves_unrelated_fields() {
        let mut manifest = Manifest::parse(
            "{\"name\":\"server\",\"scripts\":{\"dev\":\"tsx watch src/index.ts\"}}",
        )
        .unwrap();
        manifest.add_dependency(DepKind::Dev, "typescript", "^5.8.0");
        let out = manifest.to_pretty_string();
        assert!(out.contains("tsx watch src/index.ts"));
        assert!(out.contains("devDependencies"));
    }

    #[test]
    fn serialization_is_sorted_and_newline_terminated() {
        let mut manifest = Manifest::parse("{}").unwrap();
        manifest.set_name("app");
        manifest.add_dependency(DepKind::Normal, "zod", "^3.24.0");
        manifest.add_dependency(DepKind::Normal, "hono", "^4.7.0");
        let out = manifest.to_pretty_string();
        assert!(out.ends_with('\n'));
        let hono = out.find("\"hono\"").unwrap();
        let zod = out.find("\"zod\"").unwrap();
        assert!(hono < zod);
    }

    #[test]
    fn non_object_manifest_rejected() {
        assert!(Manifest::parse("[1,2,3]").is_err());
        assert!(Manifest::parse("not json").is_err());
    }
}
