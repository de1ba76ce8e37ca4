//! The resolved configuration: fully defaulted, rule-consistent, immutable.

use serde::Serialize;

use crate::domain::axes::{
    Addon, Api, Auth, Backend, BackendClass, Database, DbSetup, DirectoryConflict, ExampleApp,
    Frontend, FrontendClass, Orm, PackageManager, Payments, Runtime, ServerDeploy, WebDeploy,
};

/// A fully resolved stack configuration.
///
/// Produced only by [`crate::domain::Resolver`]; immutable once produced.
/// Re-resolution always starts from the original [`super::StackSelection`].
///
/// Derived facts (`has_web_frontend`, `backend_class`, …) are computed once
/// here and reused by both the composition engine and the dependency
/// injector so the two can never drift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    frontend: Vec<Frontend>,
    backend: Backend,
    runtime: Runtime,
    database: Database,
    orm: Orm,
    auth: Auth,
    payments: Payments,
    api: Api,
    addons: Vec<Addon>,
    examples: Vec<ExampleApp>,
    db_setup: DbSetup,
    web_deploy: WebDeploy,
    server_deploy: ServerDeploy,
    package_manager: PackageManager,
    git: bool,
    install: bool,
    directory_conflict: DirectoryConflict,

    // Derived facts, computed once in `new`.
    #[serde(skip)]
    web_frontend: Option<Frontend>,
    #[serde(skip)]
    native_frontend: Option<Frontend>,
}

/// The axis values the resolver settled on. Input to [`ResolvedConfig::new`].
#[derive(Debug, Clone)]
pub(crate) struct ResolvedAxes {
    pub frontend: Vec<Frontend>,
    pub backend: Backend,
    pub runtime: Runtime,
    pub database: Database,
    pub orm: Orm,
    pub auth: Auth,
    pub payments: Payments,
    pub api: Api,
    pub addons: Vec<Addon>,
    pub examples: Vec<ExampleApp>,
    pub db_setup: DbSetup,
    pub web_deploy: WebDeploy,
    pub server_deploy: ServerDeploy,
    pub package_manager: PackageManager,
    pub git: bool,
    pub install: bool,
    pub directory_conflict: DirectoryConflict,
}

impl ResolvedConfig {
    pub(crate) fn new(axes: ResolvedAxes) -> Self {
        // The `none` sentinel never survives resolution inside the set;
        // an empty set IS the resolved form of "no frontend".
        let frontend: Vec<Frontend> = axes
            .frontend
            .into_iter()
            .filter(|f| *f != Frontend::None)
            .collect();
        let addons: Vec<Addon> = axes
            .addons
            .into_iter()
            .filter(|a| *a != Addon::None)
            .collect();
        let examples: Vec<ExampleApp> = axes
            .examples
            .into_iter()
            .filter(|e| *e != ExampleApp::None)
            .collect();

        let web_frontend = frontend
            .iter()
            .copied()
            .find(|f| f.class() == FrontendClass::Web);
        let native_frontend = frontend
            .iter()
            .copied()
            .find(|f| f.class() == FrontendClass::Native);

        Self {
            frontend,
            backend: axes.backend,
            runtime: axes.runtime,
            database: axes.database,
            orm: axes.orm,
            auth: axes.auth,
            payments: axes.payments,
            api: axes.api,
            addons,
            examples,
            db_setup: axes.db_setup,
            web_deploy: axes.web_deploy,
            server_deploy: axes.server_deploy,
            package_manager: axes.package_manager,
            git: axes.git,
            install: axes.install,
            directory_conflict: axes.directory_conflict,
            web_frontend,
            native_frontend,
        }
    }

    // ── Axis accessors ──────────────────────────────────────────────────────

    pub fn frontend(&self) -> &[Frontend] {
        &self.frontend
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn orm(&self) -> Orm {
        self.orm
    }

    pub fn auth(&self) -> Auth {
        self.auth
    }

    pub fn payments(&self) -> Payments {
        self.payments
    }

    pub fn api(&self) -> Api {
        self.api
    }

    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn examples(&self) -> &[ExampleApp] {
        &self.examples
    }

    pub fn db_setup(&self) -> DbSetup {
        self.db_setup
    }

    pub fn web_deploy(&self) -> WebDeploy {
        self.web_deploy
    }

    pub fn server_deploy(&self) -> ServerDeploy {
        self.server_deploy
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn git(&self) -> bool {
        self.git
    }

    pub fn install(&self) -> bool {
        self.install
    }

    pub fn directory_conflict(&self) -> DirectoryConflict {
        self.directory_conflict
    }

    // ── Derived facts ───────────────────────────────────────────────────────

    /// The selected web-class frontend, if any (shape rules guarantee at
    /// most one).
    pub fn web_frontend(&self) -> Option<Frontend> {
        self.web_frontend
    }

    /// The selected native-class frontend, if any.
    pub fn native_frontend(&self) -> Option<Frontend> {
        self.native_frontend
    }

    pub fn has_web_frontend(&self) -> bool {
        self.web_frontend.is_some()
    }

    pub fn has_native_frontend(&self) -> bool {
        self.native_frontend.is_some()
    }

    pub fn backend_class(&self) -> BackendClass {
        self.backend.class()
    }

    /// Whether a standalone `apps/server` package exists in the output.
    pub fn needs_server_app(&self) -> bool {
        self.backend.class() == BackendClass::Server
    }

    pub fn has_database(&self) -> bool {
        self.database != Database::None
    }

    pub fn has_auth(&self) -> bool {
        self.auth != Auth::None
    }

    pub fn has_api(&self) -> bool {
        self.api != Api::None
    }

    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    pub fn has_example(&self, example: ExampleApp) -> bool {
        self.examples.contains(&example)
    }
}
