//! Compatibility rule set.
//!
//! # Design Rationale
//!
//! Compatibility knowledge is expressed as *data*: two static registries of
//! rules evaluated uniformly by one loop each. Adding a rule never touches
//! control flow — add one entry here and nothing else changes.
//!
//! Two registries exist because they run at different times and answer
//! different questions:
//!
//! - [`SHAPE_RULES`] are structural ("at most one web frontend"). They run
//!   against the raw frontend set before anything else, are never bypassed,
//!   and failing them aborts resolution early — a malformed shape makes
//!   every downstream check meaningless.
//! - [`RULES`] are policy ("mongodb needs a document-capable ORM"). They run
//!   against the resolved candidate, are skipped under `bypass_checks`, and
//!   are ALL evaluated — the resolver never stops at the first violation so
//!   batch callers get the complete report.
//!
//! Registry order is semantic only for error reporting: violations come out
//! in registry order, which keeps reason lists stable across runs.

use std::collections::BTreeSet;

use crate::domain::axes::{
    Addon, Api, Auth, Axis, Backend, BackendClass, Database, DbSetup, ExampleApp, Frontend,
    FrontendClass, Orm, Payments, Runtime, ServerDeploy, WebDeploy,
};
use crate::domain::resolved::ResolvedConfig;

// ── Shape rules ───────────────────────────────────────────────────────────────

/// A structural rule over the raw frontend set.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRule {
    pub name: &'static str,
    pub check: fn(&[Frontend]) -> Result<(), String>,
}

/// Structural shape rules. Never bypassed.
pub static SHAPE_RULES: &[ShapeRule] = &[
    ShapeRule {
        name: "at-most-one-web-frontend",
        check: |frontends| {
            let web: Vec<_> = frontends
                .iter()
                .filter(|f| f.class() == FrontendClass::Web)
                .collect();
            if web.len() > 1 {
                return Err(format!(
                    "at most one web frontend may be selected (got {})",
                    join(web.iter().map(|f| f.as_str()))
                ));
            }
            Ok(())
        },
    },
    ShapeRule {
        name: "at-most-one-native-frontend",
        check: |frontends| {
            let native: Vec<_> = frontends
                .iter()
                .filter(|f| f.class() == FrontendClass::Native)
                .collect();
            if native.len() > 1 {
                return Err(format!(
                    "at most one native frontend may be selected (got {})",
                    join(native.iter().map(|f| f.as_str()))
                ));
            }
            Ok(())
        },
    },
    ShapeRule {
        name: "none-frontend-is-exclusive",
        check: |frontends| {
            if frontends.contains(&Frontend::None) && frontends.len() > 1 {
                return Err(
                    "frontend 'none' cannot be combined with other frontends".to_string()
                );
            }
            Ok(())
        },
    },
];

/// Evaluate every shape rule, collecting all violations in registry order.
pub fn evaluate_shape(frontends: &[Frontend]) -> Vec<String> {
    SHAPE_RULES
        .iter()
        .filter_map(|rule| (rule.check)(frontends).err())
        .collect()
}

// ── Policy rules ──────────────────────────────────────────────────────────────

/// Everything a policy rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleCtx<'a> {
    pub config: &'a ResolvedConfig,
    /// Axes the user explicitly set (vs. filled in from defaults).
    pub explicit: &'a BTreeSet<Axis>,
}

impl RuleCtx<'_> {
    pub fn is_explicit(&self, axis: Axis) -> bool {
        self.explicit.contains(&axis)
    }
}

/// One declarative compatibility rule.
///
/// `check` returns zero or more violation reasons. Most rules report at most
/// one; the backend-class rule reports one per conflicting axis so a caller
/// sees every conflict in a single pass.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    /// The axes this rule reads. Diagnostic metadata only.
    pub axes: &'static [Axis],
    pub check: fn(&RuleCtx) -> Vec<String>,
}

/// The policy rule registry. Order = reporting order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "database-requires-orm",
        axes: &[Axis::Database, Axis::Orm],
        check: |ctx| {
            let c = ctx.config;
            if c.database() != Database::None && c.orm() == Orm::None {
                return vec![format!(
                    "database '{}' requires an ORM; choose drizzle, prisma, or mongoose",
                    c.database()
                )];
            }
            vec![]
        },
    },
    Rule {
        name: "orm-requires-database",
        axes: &[Axis::Database, Axis::Orm],
        check: |ctx| {
            let c = ctx.config;
            if c.orm() != Orm::None && c.database() == Database::None {
                return vec!["ORM selection requires a database".to_string()];
            }
            vec![]
        },
    },
    Rule {
        name: "orm-database-family",
        axes: &[Axis::Database, Axis::Orm],
        check: |ctx| {
            let c = ctx.config;
            if c.orm() == Orm::None || c.database() == Database::None {
                return vec![];
            }
            if !c.orm().supported_databases().contains(&c.database()) {
                return vec![format!(
                    "orm '{}' does not support database '{}' (supported: {})",
                    c.orm(),
                    c.database(),
                    join(c.orm().supported_databases().iter().map(|d| d.as_str()))
                )];
            }
            vec![]
        },
    },
    Rule {
        name: "backend-class-forcing",
        axes: &[
            Axis::Backend,
            Axis::Runtime,
            Axis::Database,
            Axis::Orm,
            Axis::Api,
            Axis::DbSetup,
            Axis::ServerDeploy,
        ],
        check: check_backend_class_forcing,
    },
    Rule {
        name: "server-backend-requires-runtime",
        axes: &[Axis::Backend, Axis::Runtime],
        check: |ctx| {
            let c = ctx.config;
            if c.backend_class() == BackendClass::Server && c.runtime() == Runtime::None {
                return vec![format!(
                    "backend '{}' runs as a server app and requires a runtime (node, bun, or workers)",
                    c.backend()
                )];
            }
            vec![]
        },
    },
    Rule {
        name: "workers-runtime-stack",
        axes: &[Axis::Runtime, Axis::Backend, Axis::Database, Axis::Orm],
        check: |ctx| {
            let c = ctx.config;
            if c.runtime() != Runtime::Workers {
                return vec![];
            }
            let mut reasons = Vec::new();
            if c.backend() != Backend::Hono {
                reasons.push(format!(
                    "runtime 'workers' supports only the 'hono' backend (got '{}')",
                    c.backend()
                ));
            }
            if !matches!(c.database(), Database::Sqlite | Database::None) {
                reasons.push(format!(
                    "runtime 'workers' supports only the 'sqlite' database (got '{}')",
                    c.database()
                ));
            } else if c.database() == Database::Sqlite && c.orm() != Orm::Drizzle {
                // Valid pairings individually, but workers narrows the set.
                reasons.push(format!(
                    "runtime 'workers' with a database supports only the 'drizzle' orm (got '{}')",
                    c.orm()
                ));
            }
            reasons
        },
    },
    Rule {
        name: "auth-backend",
        axes: &[Axis::Auth, Axis::Backend],
        check: |ctx| {
            let c = ctx.config;
            match c.auth() {
                Auth::BetterAuth
                    if !matches!(
                        c.backend_class(),
                        BackendClass::Server | BackendClass::Fullstack
                    ) =>
                {
                    vec![format!(
                        "auth 'better-auth' requires a server or fullstack backend (got '{}')",
                        c.backend()
                    )]
                }
                Auth::Clerk if c.backend() != Backend::Convex => {
                    vec![format!(
                        "auth 'clerk' is only supported with the 'convex' backend (got '{}')",
                        c.backend()
                    )]
                }
                _ => vec![],
            }
        },
    },
    Rule {
        name: "payments-requirements",
        axes: &[Axis::Payments, Axis::Auth, Axis::Frontend],
        check: |ctx| {
            let c = ctx.config;
            if c.payments() != Payments::Polar {
                return vec![];
            }
            let mut reasons = Vec::new();
            if c.auth() != Auth::BetterAuth {
                reasons.push(format!(
                    "payments 'polar' requires auth 'better-auth' (got '{}')",
                    c.auth()
                ));
            }
            if !c.has_web_frontend() {
                reasons.push("payments 'polar' requires a web frontend".to_string());
            }
            reasons
        },
    },
    Rule {
        name: "api-frontend",
        axes: &[Axis::Api, Axis::Frontend],
        check: |ctx| {
            let c = ctx.config;
            if c.api() != Api::Trpc {
                return vec![];
            }
            match c.web_frontend() {
                Some(f @ (Frontend::Nuxt | Frontend::Svelte | Frontend::Solid)) => {
                    vec![format!(
                        "api 'trpc' does not support frontend '{f}'; use 'orpc' instead"
                    )]
                }
                _ => vec![],
            }
        },
    },
    Rule {
        name: "addon-frontend-allow-list",
        axes: &[Axis::Addons, Axis::Frontend],
        check: |ctx| {
            let c = ctx.config;
            let mut reasons = Vec::new();
            for addon in c.addons() {
                let allowed = addon.frontend_allow_list();
                // Empty allow-list means "compatible with everything".
                if allowed.is_empty() {
                    continue;
                }
                if !c.frontend().iter().any(|f| allowed.contains(f)) {
                    reasons.push(format!(
                        "addon '{}' requires one of frontends [{}] (selected: [{}])",
                        addon,
                        join(allowed.iter().map(|f| f.as_str())),
                        join(c.frontend().iter().map(|f| f.as_str()))
                    ));
                }
            }
            reasons
        },
    },
    Rule {
        name: "example-constraints",
        axes: &[Axis::Examples, Axis::Database, Axis::Backend],
        check: |ctx| {
            let c = ctx.config;
            let mut reasons = Vec::new();
            if c.has_example(ExampleApp::Todo) && !c.has_database() {
                reasons.push("example 'todo' requires a database".to_string());
            }
            if c.has_example(ExampleApp::Ai) {
                if c.backend() == Backend::Elysia {
                    reasons.push(
                        "example 'ai' is not supported with the 'elysia' backend".to_string(),
                    );
                }
                if c.backend_class() == BackendClass::None {
                    reasons.push("example 'ai' requires a backend".to_string());
                }
            }
            reasons
        },
    },
    Rule {
        name: "db-setup-database",
        axes: &[Axis::DbSetup, Axis::Database, Axis::Orm, Axis::Runtime],
        check: |ctx| {
            let c = ctx.config;
            if c.db_setup() == DbSetup::None {
                return vec![];
            }
            let mut reasons = Vec::new();
            let supported = c.db_setup().supported_databases();
            if !supported.contains(&c.database()) {
                reasons.push(format!(
                    "db-setup '{}' supports databases [{}] (got '{}')",
                    c.db_setup(),
                    join(supported.iter().map(|d| d.as_str())),
                    c.database()
                ));
            }
            if c.db_setup() == DbSetup::PrismaPostgres && c.orm() != Orm::Prisma {
                reasons.push(format!(
                    "db-setup 'prisma-postgres' requires orm 'prisma' (got '{}')",
                    c.orm()
                ));
            }
            if c.db_setup() == DbSetup::D1 && c.runtime() != Runtime::Workers {
                reasons.push(format!(
                    "db-setup 'd1' requires runtime 'workers' (got '{}')",
                    c.runtime()
                ));
            }
            reasons
        },
    },
    Rule {
        name: "web-deploy-requires-web-frontend",
        axes: &[Axis::WebDeploy, Axis::Frontend],
        check: |ctx| {
            let c = ctx.config;
            if c.web_deploy() != WebDeploy::None && !c.has_web_frontend() {
                return vec![format!(
                    "web-deploy '{}' requires a web frontend",
                    c.web_deploy()
                )];
            }
            vec![]
        },
    },
    Rule {
        name: "server-deploy-requires-server-backend",
        axes: &[Axis::ServerDeploy, Axis::Backend],
        check: |ctx| {
            let c = ctx.config;
            if c.server_deploy() != ServerDeploy::None
                && c.backend_class() != BackendClass::Server
            {
                return vec![format!(
                    "server-deploy '{}' requires a server backend (got '{}')",
                    c.server_deploy(),
                    c.backend()
                )];
            }
            vec![]
        },
    },
    Rule {
        name: "server-deploy-runtime",
        axes: &[Axis::ServerDeploy, Axis::Runtime],
        check: |ctx| {
            let c = ctx.config;
            if let Some(required) = c.server_deploy().required_runtime() {
                if c.runtime() != required {
                    return vec![format!(
                        "server-deploy '{}' requires runtime '{}' (got '{}')",
                        c.server_deploy(),
                        required,
                        c.runtime()
                    )];
                }
            }
            vec![]
        },
    },
];

/// Backend classes that manage the rest of the stack themselves force a
/// closed subset of axes to their sentinels. The resolver coerces defaulted
/// axes before this runs, so any mismatch surviving to here was explicit.
fn check_backend_class_forcing(ctx: &RuleCtx) -> Vec<String> {
    let c = ctx.config;
    let class = c.backend_class();
    if class == BackendClass::Server {
        return vec![];
    }

    let mut reasons = Vec::new();
    let mut forced = |axis: Axis, is_sentinel: bool, got: String| {
        if !is_sentinel {
            reasons.push(format!(
                "backend '{}' forces {} to 'none' (got '{}')",
                c.backend(),
                axis,
                got
            ));
        }
    };

    forced(
        Axis::Runtime,
        c.runtime() == Runtime::None,
        c.runtime().to_string(),
    );
    forced(Axis::Api, c.api() == Api::None, c.api().to_string());
    forced(
        Axis::ServerDeploy,
        c.server_deploy() == ServerDeploy::None,
        c.server_deploy().to_string(),
    );

    // Baas and None host no database of ours; fullstack apps may keep one.
    if class != BackendClass::Fullstack {
        forced(
            Axis::Database,
            c.database() == Database::None,
            c.database().to_string(),
        );
        forced(Axis::Orm, c.orm() == Orm::None, c.orm().to_string());
        forced(
            Axis::DbSetup,
            c.db_setup() == DbSetup::None,
            c.db_setup().to_string(),
        );
    }

    reasons
}

/// Evaluate every policy rule against the candidate, collecting all
/// violations in registry order. No early exit.
pub fn evaluate_policy(ctx: &RuleCtx) -> Vec<String> {
    let mut reasons = Vec::new();
    for rule in RULES {
        reasons.extend((rule.check)(ctx));
    }
    reasons
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert the registries are internally consistent. Panics with a clear
/// message on any violation; call from a test.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    let mut seen = std::collections::HashSet::new();
    for rule in SHAPE_RULES {
        assert!(seen.insert(rule.name), "duplicate shape rule: {}", rule.name);
    }
    for rule in RULES {
        assert!(seen.insert(rule.name), "duplicate rule: {}", rule.name);
        assert!(
            !rule.axes.is_empty(),
            "rule '{}' declares no axes",
            rule.name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolved::ResolvedAxes;
    use crate::domain::axes::{DirectoryConflict, PackageManager};

    fn base_axes() -> ResolvedAxes {
        ResolvedAxes {
            frontend: vec![Frontend::TanstackRouter],
            backend: Backend::Hono,
            runtime: Runtime::Bun,
            database: Database::Sqlite,
            orm: Orm::Drizzle,
            auth: Auth::BetterAuth,
            payments: Payments::None,
            api: Api::Trpc,
            addons: vec![],
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

    fn eval(axes: ResolvedAxes) -> Vec<String> {
        let config = ResolvedConfig::new(axes);
        let explicit = BTreeSet::new();
        evaluate_policy(&RuleCtx {
            config: &config,
            explicit: &explicit,
        })
    }

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn base_axes_pass_every_rule() {
        assert!(eval(base_axes()).is_empty());
    }

    // ── shape rules ────────────────────────────────────────────────────────

    #[test]
    fn two_web_frontends_rejected() {
        let violations = evaluate_shape(&[Frontend::Next, Frontend::Nuxt]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("web frontend"));
    }

    #[test]
    fn web_plus_native_is_fine() {
        assert!(evaluate_shape(&[Frontend::Next, Frontend::NativeNativewind]).is_empty());
    }

    #[test]
    fn none_frontend_cannot_be_combined() {
        let violations = evaluate_shape(&[Frontend::None, Frontend::Next]);
        assert_eq!(violations.len(), 1);
    }

    // ── pairing rules ──────────────────────────────────────────────────────

    #[test]
    fn orm_without_database_rejected() {
        let mut axes = base_axes();
        axes.database = Database::None;
        axes.db_setup = DbSetup::None;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v == "ORM selection requires a database"));
    }

    #[test]
    fn database_without_orm_rejected() {
        let mut axes = base_axes();
        axes.orm = Orm::None;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("requires an ORM")));
    }

    #[test]
    fn mongodb_with_drizzle_rejected() {
        let mut axes = base_axes();
        axes.database = Database::Mongodb;
        axes.orm = Orm::Drizzle;
        let violations = eval(axes);
        assert!(
            violations
                .iter()
                .any(|v| v.contains("drizzle") && v.contains("mongodb"))
        );
    }

    #[test]
    fn mongodb_with_prisma_accepted() {
        let mut axes = base_axes();
        axes.database = Database::Mongodb;
        axes.orm = Orm::Prisma;
        assert!(eval(axes).is_empty());
    }

    // ── workers restrictions ───────────────────────────────────────────────

    #[test]
    fn workers_narrows_orm_even_for_valid_pairs() {
        // sqlite+prisma is valid on its own; workers rejects it.
        let mut axes = base_axes();
        axes.runtime = Runtime::Workers;
        axes.orm = Orm::Prisma;
        axes.server_deploy = ServerDeploy::Wrangler;
        let violations = eval(axes);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("drizzle"));
    }

    #[test]
    fn workers_with_postgres_rejected() {
        let mut axes = base_axes();
        axes.runtime = Runtime::Workers;
        axes.database = Database::Postgres;
        axes.server_deploy = ServerDeploy::Wrangler;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("sqlite")));
    }

    // ── backend class forcing ──────────────────────────────────────────────

    #[test]
    fn convex_with_runtime_and_database_reports_both() {
        let mut axes = base_axes();
        axes.backend = Backend::Convex;
        axes.auth = Auth::None;
        axes.api = Api::None;
        // runtime/database/orm left at server-stack values.
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("forces runtime")));
        assert!(violations.iter().any(|v| v.contains("forces database")));
        assert!(violations.iter().any(|v| v.contains("forces orm")));
    }

    #[test]
    fn fullstack_backend_may_keep_database() {
        let mut axes = base_axes();
        axes.backend = Backend::Fullstack;
        axes.frontend = vec![Frontend::Next];
        axes.runtime = Runtime::None;
        axes.api = Api::None;
        assert!(eval(axes).is_empty());
    }

    // ── auth / payments / api ──────────────────────────────────────────────

    #[test]
    fn clerk_requires_convex() {
        let mut axes = base_axes();
        axes.auth = Auth::Clerk;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("clerk")));
    }

    #[test]
    fn polar_without_better_auth_rejected() {
        let mut axes = base_axes();
        axes.payments = Payments::Polar;
        axes.auth = Auth::None;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("polar")));
    }

    #[test]
    fn trpc_with_nuxt_rejected() {
        let mut axes = base_axes();
        axes.frontend = vec![Frontend::Nuxt];
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("orpc")));
    }

    // ── addons / examples / deploy ─────────────────────────────────────────

    #[test]
    fn addon_allow_list_violation_names_addon_and_required_set() {
        let mut axes = base_axes();
        axes.frontend = vec![Frontend::Nuxt];
        axes.api = Api::Orpc;
        axes.addons = vec![Addon::Pwa];
        let violations = eval(axes);
        assert!(
            violations
                .iter()
                .any(|v| v.contains("pwa") && v.contains("tanstack-router"))
        );
    }

    #[test]
    fn universal_addons_never_violate() {
        let mut axes = base_axes();
        axes.addons = vec![Addon::Biome, Addon::Husky, Addon::Turborepo];
        assert!(eval(axes).is_empty());
    }

    #[test]
    fn todo_example_requires_database() {
        let mut axes = base_axes();
        axes.database = Database::None;
        axes.orm = Orm::None;
        axes.examples = vec![ExampleApp::Todo];
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("todo")));
    }

    #[test]
    fn web_deploy_without_web_frontend_rejected() {
        let mut axes = base_axes();
        axes.frontend = vec![];
        axes.web_deploy = WebDeploy::Wrangler;
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("web-deploy")));
    }

    #[test]
    fn wrangler_server_deploy_needs_workers_runtime() {
        let mut axes = base_axes();
        axes.server_deploy = ServerDeploy::Wrangler;
        // runtime stays bun
        let violations = eval(axes);
        assert!(violations.iter().any(|v| v.contains("workers")));
    }

    #[test]
    fn independent_violations_all_reported() {
        // Three unrelated problems must produce three reasons, not one.
        let mut axes = base_axes();
        axes.database = Database::Mongodb; // family violation with drizzle
        axes.frontend = vec![Frontend::Nuxt]; // trpc violation
        axes.addons = vec![Addon::Pwa]; // allow-list violation
        let violations = eval(axes);
        assert_eq!(violations.len(), 3, "got: {violations:?}");
    }
}
