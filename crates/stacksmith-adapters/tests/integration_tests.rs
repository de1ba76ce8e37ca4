//! End-to-end generation through the built-in corpus and real filesystem.

use std::path::PathBuf;

use stacksmith_adapters::{InMemoryCorpus, LocalMaterializer};
use stacksmith_core::application::{BuildRequest, BuildService};
use stacksmith_core::domain::{Backend, Database, Frontend, Runtime, StackSelection};

fn service() -> BuildService {
    BuildService::new(
        Box::new(InMemoryCorpus::with_builtin()),
        Box::new(LocalMaterializer::new()),
    )
}

fn request(root: PathBuf, selection: StackSelection) -> BuildRequest {
    BuildRequest {
        project_name: "demo".to_string(),
        root,
        selection,
        bypass_checks: false,
        dry_run: false,
    }
}

#[test]
fn default_stack_generates_a_complete_workspace() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let report = service()
        .build(&request(root.clone(), StackSelection::default()))
        .unwrap();

    assert!(report.files_written > 10);
    assert_eq!(report.root, root);

    let root_manifest = std::fs::read_to_string(root.join("package.json")).unwrap();
    assert!(root_manifest.contains("\"name\": \"demo\""));
    assert!(root_manifest.contains("\"turbo\""));

    let server_manifest = std::fs::read_to_string(root.join("apps/server/package.json")).unwrap();
    assert!(server_manifest.contains("\"hono\""));
    assert!(server_manifest.contains("\"@repo/db\": \"workspace:*\""));

    let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.contains("# demo"));
    assert!(!readme.contains("{{"));

    assert!(root.join("packages/db/drizzle.config.ts").exists());
    assert!(root.join("packages/auth/src/index.ts").exists());
    assert!(root.join("turbo.json").exists());
}

#[test]
fn fullstack_next_stack_has_no_server_app() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let selection = StackSelection {
        frontend: Some(vec![Frontend::Next]),
        backend: Some(Backend::Fullstack),
        ..Default::default()
    };
    service().build(&request(root.clone(), selection)).unwrap();

    assert!(!root.join("apps/server").exists());
    assert!(root.join("apps/web/app/page.tsx").exists());
    let web_manifest = std::fs::read_to_string(root.join("apps/web/package.json")).unwrap();
    assert!(web_manifest.contains("\"next\""));
}

#[test]
fn workers_stack_generates_wrangler_config() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let selection = StackSelection {
        runtime: Some(Runtime::Workers),
        ..Default::default()
    };
    service().build(&request(root.clone(), selection)).unwrap();

    assert!(root.join("apps/server/wrangler.jsonc").exists());
    let server_manifest = std::fs::read_to_string(root.join("apps/server/package.json")).unwrap();
    assert!(server_manifest.contains("wrangler dev"));
}

#[test]
fn dry_run_touches_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let mut req = request(root.clone(), StackSelection::default());
    req.dry_run = true;
    let report = service().build(&req).unwrap();

    assert!(report.dry_run);
    assert!(report.file_count > 10);
    assert!(!root.exists());
}

#[test]
fn rejected_selection_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("demo");
    let selection = StackSelection {
        database: Some(Database::Mongodb),
        orm: Some(stacksmith_core::domain::Orm::Drizzle),
        ..Default::default()
    };
    assert!(service().build(&request(root.clone(), selection)).is_err());
    assert!(!root.exists());
}
