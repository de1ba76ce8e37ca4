//! Selection resolution.
//!
//! Turns a partial [`StackSelection`] into a validated [`ResolvedConfig`]:
//!
//! 1. fill unset axes from [`Defaults`],
//! 2. evaluate shape rules over the raw frontend set (fail fast, never
//!    bypassed),
//! 3. coerce defaulted axes that a chosen backend class or database family
//!    makes incoherent — explicit values are never rewritten,
//! 4. evaluate every policy rule and collect ALL violations.
//!
//! Under `bypass_checks` steps 3 and 4 are skipped: the caller gets exactly
//! what they asked for, defaults included, shape permitting.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::domain::axes::{
    Api, Auth, Axis, BackendClass, Database, DbSetup, Frontend, Orm, Runtime, ServerDeploy,
};
use crate::domain::defaults::Defaults;
use crate::domain::error::DomainError;
use crate::domain::resolved::{ResolvedAxes, ResolvedConfig};
use crate::domain::rules::{self, RuleCtx};
use crate::domain::selection::StackSelection;

/// Knobs for a single resolution run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Skip policy rules and coercion. Shape rules still apply.
    pub bypass_checks: bool,
}

/// Stateless resolution engine parameterized by a default set.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    defaults: Defaults,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: Defaults) -> Self {
        Self { defaults }
    }

    /// Resolve a partial selection into a full configuration.
    ///
    /// Returns [`DomainError::Violations`] carrying every failed rule; the
    /// reason list is complete, not first-failure.
    #[instrument(skip(self, selection), fields(bypass = options.bypass_checks))]
    pub fn resolve(
        &self,
        selection: &StackSelection,
        options: &ResolveOptions,
    ) -> Result<ResolvedConfig, DomainError> {
        let explicit = selection.provided();
        let mut axes = self.fill_defaults(selection);

        // Shape is structural, not policy: a malformed frontend set makes
        // every later check meaningless, so it fails fast and is exempt
        // from bypass.
        let shape_violations = rules::evaluate_shape(&axes.frontend);
        if !shape_violations.is_empty() {
            return Err(DomainError::Violations {
                reasons: shape_violations,
            });
        }

        if options.bypass_checks {
            debug!("compatibility checks bypassed");
            return Ok(ResolvedConfig::new(axes));
        }

        self.coerce(&mut axes, &explicit);

        let config = ResolvedConfig::new(axes);
        let violations = rules::evaluate_policy(&RuleCtx {
            config: &config,
            explicit: &explicit,
        });
        if !violations.is_empty() {
            debug!(count = violations.len(), "selection rejected");
            return Err(DomainError::Violations {
                reasons: violations,
            });
        }

        debug!("selection resolved");
        Ok(config)
    }

    fn fill_defaults(&self, selection: &StackSelection) -> ResolvedAxes {
        let d = &self.defaults;
        ResolvedAxes {
            frontend: selection
                .frontend
                .clone()
                .unwrap_or_else(|| d.frontend.clone()),
            backend: selection.backend.unwrap_or(d.backend),
            runtime: selection.runtime.unwrap_or(d.runtime),
            database: selection.database.unwrap_or(d.database),
            orm: selection.orm.unwrap_or(d.orm),
            auth: selection.auth.unwrap_or(d.auth),
            payments: selection.payments.unwrap_or(d.payments),
            api: selection.api.unwrap_or(d.api),
            addons: selection.addons.clone().unwrap_or_else(|| d.addons.clone()),
            examples: selection
                .examples
                .clone()
                .unwrap_or_else(|| d.examples.clone()),
            db_setup: selection.db_setup.unwrap_or(d.db_setup),
            web_deploy: selection.web_deploy.unwrap_or(d.web_deploy),
            server_deploy: selection.server_deploy.unwrap_or(d.server_deploy),
            package_manager: selection.package_manager.unwrap_or(d.package_manager),
            git: selection.git.unwrap_or(d.git),
            install: selection.install.unwrap_or(d.install),
            directory_conflict: selection
                .directory_conflict
                .unwrap_or(d.directory_conflict),
        }
    }

    /// Rewrite axes the user did NOT set explicitly so defaults never trip a
    /// policy rule on their own. An explicit value is sacred: if it conflicts,
    /// the policy pass reports it rather than silently rewriting it.
    fn coerce(&self, axes: &mut ResolvedAxes, explicit: &BTreeSet<Axis>) {
        let is_default = |axis: Axis| !explicit.contains(&axis);

        // Backend classes that manage their own stack pull defaulted server
        // axes down to the sentinel.
        let class = axes.backend.class();
        if class != BackendClass::Server {
            if is_default(Axis::Runtime) {
                axes.runtime = Runtime::None;
            }
            if is_default(Axis::Api) {
                axes.api = Api::None;
            }
            if is_default(Axis::ServerDeploy) {
                axes.server_deploy = ServerDeploy::None;
            }
            if class != BackendClass::Fullstack {
                if is_default(Axis::Database) {
                    axes.database = Database::None;
                }
                if is_default(Axis::DbSetup) {
                    axes.db_setup = DbSetup::None;
                }
            }
        }

        // Auth defaults follow the backend: a BaaS brings its own and a
        // missing backend has nowhere to mount it.
        if is_default(Axis::Auth)
            && matches!(class, BackendClass::Baas | BackendClass::None)
        {
            axes.auth = Auth::None;
        }

        // ORM follows the database family.
        if is_default(Axis::Orm) {
            match axes.database {
                Database::None => axes.orm = Orm::None,
                Database::Mongodb => axes.orm = Orm::Mongoose,
                _ => {}
            }
        }
        // tRPC has no adapters for these frameworks; the default API slides
        // to the one that does.
        if is_default(Axis::Api)
            && matches!(
                axes.frontend
                    .iter()
                    .copied()
                    .find(|f| f.class() == crate::domain::axes::FrontendClass::Web),
                Some(Frontend::Nuxt | Frontend::Svelte | Frontend::Solid)
            )
            && axes.api == Api::Trpc
        {
            axes.api = Api::Orpc;
        }

        // Workers and wrangler imply each other.
        if axes.runtime == Runtime::Workers
            && is_default(Axis::ServerDeploy)
            && axes.server_deploy == ServerDeploy::None
        {
            axes.server_deploy = ServerDeploy::Wrangler;
        }
        if axes.server_deploy == ServerDeploy::Wrangler && is_default(Axis::Runtime) {
            axes.runtime = Runtime::Workers;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::axes::{Backend, PackageManager};

    fn resolve(selection: StackSelection) -> Result<ResolvedConfig, DomainError> {
        Resolver::new().resolve(&selection, &ResolveOptions::default())
    }

    #[test]
    fn empty_selection_resolves_to_defaults() {
        let config = resolve(StackSelection::default()).unwrap();
        assert_eq!(config.frontend(), &[Frontend::TanstackRouter]);
        assert_eq!(config.backend(), Backend::Hono);
        assert_eq!(config.database(), Database::Sqlite);
        assert_eq!(config.orm(), Orm::Drizzle);
        assert_eq!(config.package_manager(), PackageManager::Npm);
    }

    #[test]
    fn defaults_are_coerced_around_explicit_convex() {
        // Default runtime/database/orm/api would all violate convex's
        // forcing rule; because they were defaulted, they are coerced
        // instead of reported.
        let selection = StackSelection {
            backend: Some(Backend::Convex),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.runtime(), Runtime::None);
        assert_eq!(config.database(), Database::None);
        assert_eq!(config.orm(), Orm::None);
        assert_eq!(config.api(), Api::None);
        assert_eq!(config.auth(), Auth::None);
    }

    #[test]
    fn explicit_conflict_with_convex_is_reported_not_rewritten() {
        let selection = StackSelection {
            backend: Some(Backend::Convex),
            database: Some(Database::Postgres),
            ..Default::default()
        };
        let err = resolve(selection).unwrap_err();
        let DomainError::Violations { reasons } = err else {
            panic!("expected violations");
        };
        assert!(reasons.iter().any(|r| r.contains("forces database")));
    }

    #[test]
    fn mongodb_default_orm_coerces_to_mongoose() {
        let selection = StackSelection {
            database: Some(Database::Mongodb),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.orm(), Orm::Mongoose);
    }

    #[test]
    fn explicit_mongodb_drizzle_pair_is_rejected() {
        let selection = StackSelection {
            database: Some(Database::Mongodb),
            orm: Some(Orm::Drizzle),
            ..Default::default()
        };
        let err = resolve(selection).unwrap_err();
        let DomainError::Violations { reasons } = err else {
            panic!("expected violations");
        };
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("mongodb"));
    }

    #[test]
    fn no_database_coerces_default_orm_away() {
        let selection = StackSelection {
            database: Some(Database::None),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.orm(), Orm::None);
        assert_eq!(config.db_setup(), DbSetup::None);
    }

    #[test]
    fn explicit_orm_without_database_is_rejected() {
        let selection = StackSelection {
            database: Some(Database::None),
            orm: Some(Orm::Drizzle),
            ..Default::default()
        };
        let err = resolve(selection).unwrap_err();
        assert!(err.to_string().contains("requires a database"));
    }

    #[test]
    fn nuxt_slides_default_api_to_orpc() {
        let selection = StackSelection {
            frontend: Some(vec![Frontend::Nuxt]),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.api(), Api::Orpc);
    }

    #[test]
    fn explicit_trpc_with_nuxt_is_rejected() {
        let selection = StackSelection {
            frontend: Some(vec![Frontend::Nuxt]),
            api: Some(Api::Trpc),
            ..Default::default()
        };
        assert!(resolve(selection).is_err());
    }

    #[test]
    fn workers_runtime_pulls_in_wrangler_deploy() {
        let selection = StackSelection {
            runtime: Some(Runtime::Workers),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.server_deploy(), ServerDeploy::Wrangler);
        assert_eq!(config.database(), Database::Sqlite);
        assert_eq!(config.orm(), Orm::Drizzle);
    }

    #[test]
    fn wrangler_deploy_pulls_in_workers_runtime() {
        let selection = StackSelection {
            server_deploy: Some(ServerDeploy::Wrangler),
            ..Default::default()
        };
        let config = resolve(selection).unwrap();
        assert_eq!(config.runtime(), Runtime::Workers);
    }

    #[test]
    fn shape_violation_fails_fast_even_under_bypass() {
        let selection = StackSelection {
            frontend: Some(vec![Frontend::Next, Frontend::Nuxt]),
            ..Default::default()
        };
        let err = Resolver::new()
            .resolve(&selection, &ResolveOptions { bypass_checks: true })
            .unwrap_err();
        assert!(err.to_string().contains("web frontend"));
    }

    #[test]
    fn bypass_skips_policy_and_coercion() {
        let selection = StackSelection {
            database: Some(Database::Mongodb),
            orm: Some(Orm::Drizzle),
            ..Default::default()
        };
        let config = Resolver::new()
            .resolve(&selection, &ResolveOptions { bypass_checks: true })
            .unwrap();
        assert_eq!(config.database(), Database::Mongodb);
        assert_eq!(config.orm(), Orm::Drizzle);
    }

    #[test]
    fn accepted_config_passes_rules_again() {
        // Soundness: re-evaluating the policy rules on an accepted output
        // must yield zero violations.
        let selection = StackSelection {
            frontend: Some(vec![Frontend::Svelte]),
            backend: Some(Backend::Fastify),
            database: Some(Database::Postgres),
            ..Default::default()
        };
        let config = resolve(selection.clone()).unwrap();
        let explicit = selection.provided();
        let violations = rules::evaluate_policy(&RuleCtx {
            config: &config,
            explicit: &explicit,
        });
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn resolution_is_deterministic() {
        let selection = StackSelection {
            frontend: Some(vec![Frontend::TanstackRouter, Frontend::NativeNativewind]),
            database: Some(Database::Postgres),
            ..Default::default()
        };
        let a = resolve(selection.clone()).unwrap();
        let b = resolve(selection).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
