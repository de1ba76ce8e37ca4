//! Dependency injection into composed manifests.
//!
//! After composition the tree holds skeleton `package.json` files. This
//! service derives, from the resolved configuration alone, which packages
//! each workspace manifest needs, resolves versions against the pinned
//! catalog, and merges them in. Merging is additive and idempotent, so
//! running the injector twice over the same tree is a no-op.
//!
//! Workspace references (`workspace:*`) are only written when the referenced
//! package's manifest actually exists in the tree: a dangling reference
//! would break installs in a way the user cannot fix.

use tracing::{debug, instrument};

use crate::application::error::ApplicationError;
use crate::domain::{
    Addon, Api, Auth, Backend, Database, DepKind, DepSpec, DependencyCatalog, FileBody, FileTree,
    Frontend, Manifest, Orm, Payments, ResolvedConfig, Runtime, ServerDeploy, WorkspacePackage,
};
use crate::error::CoreResult;

/// One dependency destined for one manifest.
#[derive(Debug, Clone)]
struct Injection {
    target: WorkspacePackage,
    kind: DepKind,
    spec: DepSpec,
}

/// Derives and merges dependencies into the composed tree.
pub struct DependencyInjector {
    catalog: DependencyCatalog,
}

impl DependencyInjector {
    pub fn new(catalog: DependencyCatalog) -> Self {
        Self { catalog }
    }

    /// Inject every derived dependency into `tree`, renaming the root
    /// manifest after the project.
    #[instrument(skip_all, fields(project = project_name))]
    pub fn inject(
        &self,
        tree: &mut FileTree,
        project_name: &str,
        config: &ResolvedConfig,
    ) -> CoreResult<()> {
        let plan = plan(config);
        debug!(injections = plan.len(), "injection plan derived");

        for target in WorkspacePackage::ALL {
            let path = target.manifest_path();
            if !tree.contains_file(path) {
                if *target == WorkspacePackage::Root {
                    return Err(ApplicationError::ManifestMissing {
                        path: path.to_string(),
                    }
                    .into());
                }
                // The corpus never composed this app/package; nothing to do.
                continue;
            }

            let mut manifest = read_manifest(tree, path)?;
            if *target == WorkspacePackage::Root {
                manifest.set_name(project_name);
            }

            let mut changed = *target == WorkspacePackage::Root;
            for injection in plan.iter().filter(|i| i.target == *target) {
                let Some((name, version)) = self.resolve(&injection.spec, tree)? else {
                    continue;
                };
                changed |= manifest.add_dependency(injection.kind, name, &version);
            }

            if changed {
                tree.write_file(path, FileBody::Text(manifest.to_pretty_string()))?;
            }
        }
        Ok(())
    }

    /// Resolve a spec to `(name, version)`. Returns `Ok(None)` for a
    /// workspace reference whose package is absent from the tree.
    fn resolve<'a>(
        &self,
        spec: &'a DepSpec,
        tree: &FileTree,
    ) -> CoreResult<Option<(&'a str, String)>> {
        match spec {
            DepSpec::Catalog(name) => {
                let version =
                    self.catalog
                        .version(name)
                        .ok_or_else(|| ApplicationError::CatalogMiss {
                            package: (*name).to_string(),
                        })?;
                Ok(Some((name, version.to_string())))
            }
            DepSpec::Workspace(pkg) => {
                if tree.contains_file(pkg.manifest_path()) {
                    Ok(Some((pkg.package_name(), "workspace:*".to_string())))
                } else {
                    Ok(None)
                }
            }
        }
    }
}

impl Default for DependencyInjector {
    fn default() -> Self {
        Self::new(DependencyCatalog::builtin())
    }
}

fn read_manifest(tree: &FileTree, path: &str) -> CoreResult<Manifest> {
    let body = tree
        .file(path)
        .ok_or_else(|| ApplicationError::ManifestMissing {
            path: path.to_string(),
        })?;
    let text = body
        .as_text()
        .ok_or_else(|| ApplicationError::InvalidManifest {
            path: path.to_string(),
            reason: "manifest is not UTF-8 text".to_string(),
        })?;
    Manifest::parse(text).map_err(|e| {
        ApplicationError::InvalidManifest {
            path: path.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Derive the full injection plan from the configuration. Pure function of
/// the config; tree presence is applied later, at resolution time.
fn plan(config: &ResolvedConfig) -> Vec<Injection> {
    let mut plan = Planner::default();

    plan_root(&mut plan, config);
    if config.has_web_frontend() {
        plan_web(&mut plan, config);
    }
    if config.has_native_frontend() {
        plan_native(&mut plan, config);
    }
    if config.needs_server_app() {
        plan_server(&mut plan, config);
    }
    if config.has_database() {
        plan_db(&mut plan, config);
    }
    if config.has_auth() {
        plan_auth(&mut plan, config);
    }
    if config.has_api() {
        plan_api(&mut plan, config);
    }

    plan.injections
}

#[derive(Default)]
struct Planner {
    injections: Vec<Injection>,
}

impl Planner {
    fn dep(&mut self, target: WorkspacePackage, name: &'static str) {
        self.push(target, DepKind::Normal, DepSpec::Catalog(name));
    }

    fn dev(&mut self, target: WorkspacePackage, name: &'static str) {
        self.push(target, DepKind::Dev, DepSpec::Catalog(name));
    }

    fn workspace(&mut self, target: WorkspacePackage, pkg: WorkspacePackage) {
        self.push(target, DepKind::Normal, DepSpec::Workspace(pkg));
    }

    fn push(&mut self, target: WorkspacePackage, kind: DepKind, spec: DepSpec) {
        self.injections.push(Injection { target, kind, spec });
    }
}

fn plan_root(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Root;
    if config.has_addon(Addon::Turborepo) {
        p.dev(Root, "turbo");
    }
    if config.has_addon(Addon::Biome) {
        p.dev(Root, "@biomejs/biome");
    }
    if config.has_addon(Addon::Husky) {
        p.dev(Root, "husky");
        p.dev(Root, "lint-staged");
    }
}

fn plan_web(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Web;
    match config.web_frontend() {
        Some(Frontend::TanstackRouter) => {
            p.dep(Web, "react");
            p.dep(Web, "react-dom");
            p.dep(Web, "@tanstack/react-router");
            p.dev(Web, "@tanstack/router-plugin");
            p.dev(Web, "vite");
            react_type_stubs(p, Web);
        }
        Some(Frontend::ReactRouter) => {
            p.dep(Web, "react");
            p.dep(Web, "react-dom");
            p.dep(Web, "react-router");
            p.dev(Web, "vite");
            react_type_stubs(p, Web);
        }
        Some(Frontend::TanstackStart) => {
            p.dep(Web, "react");
            p.dep(Web, "react-dom");
            p.dep(Web, "@tanstack/react-start");
            p.dep(Web, "@tanstack/react-router");
            react_type_stubs(p, Web);
        }
        Some(Frontend::Next) => {
            p.dep(Web, "next");
            p.dep(Web, "react");
            p.dep(Web, "react-dom");
            react_type_stubs(p, Web);
        }
        Some(Frontend::Nuxt) => {
            p.dep(Web, "nuxt");
            p.dep(Web, "vue");
        }
        Some(Frontend::Svelte) => {
            p.dep(Web, "svelte");
            p.dev(Web, "@sveltejs/kit");
            p.dev(Web, "vite");
        }
        Some(Frontend::Solid) => {
            p.dep(Web, "solid-js");
            p.dev(Web, "vite");
        }
        _ => {}
    }
    p.dep(Web, "tailwindcss");
    p.dev(Web, "typescript");

    plan_api_client(p, Web, config);
    if config.auth() == Auth::BetterAuth {
        p.dep(Web, "better-auth");
        p.workspace(Web, WorkspacePackage::Auth);
    }
    if config.backend() == Backend::Convex {
        p.dep(Web, "convex");
    }
    if config.auth() == Auth::Clerk {
        p.dep(Web, "@clerk/clerk-react");
    }
    if config.payments() == Payments::Polar {
        p.dep(Web, "@polar-sh/sdk");
    }
    if config.has_addon(Addon::Pwa) {
        p.dev(Web, "vite-plugin-pwa");
    }
    if config.has_addon(Addon::Tauri) {
        p.dev(Web, "@tauri-apps/cli");
    }
    if config.has_example(crate::domain::ExampleApp::Ai) {
        p.dep(Web, "ai");
    }
}

fn plan_native(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Native;
    p.dep(Native, "react");
    p.dep(Native, "react-native");
    p.dep(Native, "expo");
    match config.native_frontend() {
        Some(Frontend::NativeNativewind) => p.dep(Native, "nativewind"),
        Some(Frontend::NativeUnistyles) => p.dep(Native, "react-native-unistyles"),
        _ => {}
    }
    p.dev(Native, "typescript");
    plan_api_client(p, Native, config);
}

fn plan_server(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Server;
    match config.backend() {
        Backend::Hono => {
            p.dep(Server, "hono");
            if config.runtime() == Runtime::Node {
                p.dep(Server, "@hono/node-server");
            }
        }
        Backend::Express => {
            p.dep(Server, "express");
            p.dev(Server, "@types/express");
        }
        Backend::Fastify => p.dep(Server, "fastify"),
        Backend::Elysia => p.dep(Server, "elysia"),
        _ => {}
    }
    p.dep(Server, "zod");
    p.dep(Server, "dotenv");
    p.dev(Server, "typescript");
    if config.runtime() == Runtime::Node {
        p.dev(Server, "tsx");
        p.dev(Server, "@types/node");
    }
    if config.server_deploy() == ServerDeploy::Wrangler {
        p.dev(Server, "wrangler");
    }
    if config.has_example(crate::domain::ExampleApp::Ai) {
        p.dep(Server, "ai");
        p.dep(Server, "@ai-sdk/google");
    }
    if config.has_database() {
        p.workspace(Server, WorkspacePackage::Db);
    }
    if config.has_auth() {
        p.workspace(Server, WorkspacePackage::Auth);
    }
    if config.has_api() {
        p.workspace(Server, WorkspacePackage::Api);
    }
}

fn plan_db(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Db;
    match config.orm() {
        Orm::Drizzle => {
            p.dep(Db, "drizzle-orm");
            p.dev(Db, "drizzle-kit");
        }
        Orm::Prisma => {
            p.dep(Db, "@prisma/client");
            p.dev(Db, "prisma");
        }
        Orm::Mongoose => p.dep(Db, "mongoose"),
        Orm::None => {}
    }
    match config.database() {
        Database::Sqlite => p.dep(Db, "@libsql/client"),
        Database::Postgres => {
            p.dep(Db, "pg");
            p.dev(Db, "@types/pg");
        }
        Database::Mysql => p.dep(Db, "mysql2"),
        // The mongoose driver ships its own client.
        Database::Mongodb | Database::None => {}
    }
    p.dev(Db, "typescript");
}

fn plan_auth(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Auth as AuthPkg;
    if config.auth() != Auth::BetterAuth {
        return;
    }
    p.dep(AuthPkg, "better-auth");
    p.dev(AuthPkg, "typescript");
    if config.has_database() {
        p.workspace(AuthPkg, WorkspacePackage::Db);
    }
    if config.payments() == Payments::Polar {
        p.dep(AuthPkg, "@polar-sh/sdk");
        p.dep(AuthPkg, "@polar-sh/better-auth");
    }
}

fn plan_api(p: &mut Planner, config: &ResolvedConfig) {
    use WorkspacePackage::Api as ApiPkg;
    match config.api() {
        Api::Trpc => p.dep(ApiPkg, "@trpc/server"),
        Api::Orpc => p.dep(ApiPkg, "@orpc/server"),
        Api::None => return,
    }
    p.dep(ApiPkg, "zod");
    p.dev(ApiPkg, "typescript");
    if config.has_database() {
        p.workspace(ApiPkg, WorkspacePackage::Db);
    }
    if config.has_auth() {
        p.workspace(ApiPkg, WorkspacePackage::Auth);
    }
}

fn plan_api_client(p: &mut Planner, target: WorkspacePackage, config: &ResolvedConfig) {
    match config.api() {
        Api::Trpc => {
            p.dep(target, "@trpc/client");
            p.dep(target, "@trpc/tanstack-react-query");
            p.dep(target, "@tanstack/react-query");
        }
        Api::Orpc => {
            p.dep(target, "@orpc/client");
        }
        Api::None => return,
    }
    p.workspace(target, WorkspacePackage::Api);
}

fn react_type_stubs(p: &mut Planner, target: WorkspacePackage) {
    p.dev(target, "@types/react");
    p.dev(target, "@types/react-dom");
}
