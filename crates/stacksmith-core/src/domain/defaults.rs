//! The defaults table: one value per axis, applied to unset axes before any
//! rule runs.
//!
//! This is an explicit immutable value passed into the resolver — never
//! module-level mutable state — so parallel and test-isolated resolution
//! runs cannot interfere with each other.

use crate::domain::axes::{
    Addon, Api, Auth, Backend, Database, DbSetup, DirectoryConflict, ExampleApp, Frontend, Orm,
    PackageManager, Payments, Runtime, ServerDeploy, WebDeploy,
};

/// Default value for every axis.
///
/// The shipped defaults form a valid configuration on their own (that is a
/// test invariant, not an assumption). `examples` defaults to empty so that
/// example rules can only ever fire against an explicit choice.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
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

impl Default for Defaults {
    fn default() -> Self {
        Self {
            frontend: vec![Frontend::TanstackRouter],
            backend: Backend::Hono,
            runtime: Runtime::Bun,
            database: Database::Sqlite,
            orm: Orm::Drizzle,
            auth: Auth::BetterAuth,
            payments: Payments::None,
            api: Api::Trpc,
            addons: vec![Addon::Turborepo],
            examples: vec![],
            db_setup: DbSetup::None,
            web_deploy: WebDeploy::None,
            server_deploy: ServerDeploy::None,
            package_manager: PackageManager::Npm,
            git: true,
            install: false,
            directory_conflict: DirectoryConflict::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_defaults_pair_sanely() {
        let d = Defaults::default();
        // The default ORM must support the default database.
        assert!(d.orm.supported_databases().contains(&d.database));
        // The default backend must be server-class (it pairs with a runtime).
        assert_eq!(
            d.backend.class(),
            crate::domain::axes::BackendClass::Server
        );
    }

    #[test]
    fn examples_default_empty() {
        assert!(Defaults::default().examples.is_empty());
    }
}
