//! Stack axes: the closed enumerations a selection is made of.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! They hold NO compatibility logic. All pairing and forcing rules live in
//! `rules.rs`. This file's only job is to define the axis types, their
//! string representations, their `FromStr` parsers, and the *intrinsic*
//! classification helpers (a frontend's web/native class is a property of
//! the value itself, not a policy).
//!
//! Every axis carries an explicit `None` sentinel. `None` is a user-chosen
//! terminal value; "unset" (which triggers default resolution) is modelled
//! as `Option::None` on [`super::StackSelection`], never here.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `FromStr` arm, and the `ALL` entry here
//! 3. Add or extend a rule in `rules.rs` if the value has constraints
//! 4. Add catalog pins in `catalog.rs` and injector arms if it pulls packages

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the semantic axes, used for the explicit-vs-default bookkeeping
/// and for rule diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    Frontend,
    Backend,
    Runtime,
    Database,
    Orm,
    Auth,
    Payments,
    Api,
    Addons,
    Examples,
    DbSetup,
    WebDeploy,
    ServerDeploy,
    PackageManager,
}

impl Axis {
    pub const ALL: &'static [Axis] = &[
        Self::Frontend,
        Self::Backend,
        Self::Runtime,
        Self::Database,
        Self::Orm,
        Self::Auth,
        Self::Payments,
        Self::Api,
        Self::Addons,
        Self::Examples,
        Self::DbSetup,
        Self::WebDeploy,
        Self::ServerDeploy,
        Self::PackageManager,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Runtime => "runtime",
            Self::Database => "database",
            Self::Orm => "orm",
            Self::Auth => "auth",
            Self::Payments => "payments",
            Self::Api => "api",
            Self::Addons => "addons",
            Self::Examples => "examples",
            Self::DbSetup => "db-setup",
            Self::WebDeploy => "web-deploy",
            Self::ServerDeploy => "server-deploy",
            Self::PackageManager => "package-manager",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Frontend ─────────────────────────────────────────────────────────────────

/// A frontend. The selection holds a *set* of these (at most one per class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frontend {
    TanstackRouter,
    ReactRouter,
    TanstackStart,
    Next,
    Nuxt,
    Svelte,
    Solid,
    NativeNativewind,
    NativeUnistyles,
    None,
}

/// The structural class of a frontend value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendClass {
    Web,
    Native,
    None,
}

impl Frontend {
    pub const ALL: &'static [Frontend] = &[
        Self::TanstackRouter,
        Self::ReactRouter,
        Self::TanstackStart,
        Self::Next,
        Self::Nuxt,
        Self::Svelte,
        Self::Solid,
        Self::NativeNativewind,
        Self::NativeUnistyles,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TanstackRouter => "tanstack-router",
            Self::ReactRouter => "react-router",
            Self::TanstackStart => "tanstack-start",
            Self::Next => "next",
            Self::Nuxt => "nuxt",
            Self::Svelte => "svelte",
            Self::Solid => "solid",
            Self::NativeNativewind => "native-nativewind",
            Self::NativeUnistyles => "native-unistyles",
            Self::None => "none",
        }
    }

    pub const fn class(&self) -> FrontendClass {
        match self {
            Self::TanstackRouter
            | Self::ReactRouter
            | Self::TanstackStart
            | Self::Next
            | Self::Nuxt
            | Self::Svelte
            | Self::Solid => FrontendClass::Web,
            Self::NativeNativewind | Self::NativeUnistyles => FrontendClass::Native,
            Self::None => FrontendClass::None,
        }
    }

    /// Whether this frontend can serve its own API routes, making a
    /// `backend = self` selection meaningful.
    pub const fn is_fullstack_capable(&self) -> bool {
        matches!(
            self,
            Self::TanstackStart | Self::Next | Self::Nuxt | Self::Svelte | Self::Solid
        )
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frontend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tanstack-router" => Ok(Self::TanstackRouter),
            "react-router" => Ok(Self::ReactRouter),
            "tanstack-start" => Ok(Self::TanstackStart),
            "next" | "nextjs" => Ok(Self::Next),
            "nuxt" => Ok(Self::Nuxt),
            "svelte" | "sveltekit" => Ok(Self::Svelte),
            "solid" => Ok(Self::Solid),
            "native-nativewind" | "nativewind" => Ok(Self::NativeNativewind),
            "native-unistyles" | "unistyles" => Ok(Self::NativeUnistyles),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Frontend,
                value: other.to_string(),
            }),
        }
    }
}

// ── Backend ──────────────────────────────────────────────────────────────────

/// A backend. `Convex` is BaaS-class; `Fullstack` (written `self`) means the
/// web frontend serves its own API; `None` means no server side at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    Hono,
    Express,
    Fastify,
    Elysia,
    Convex,
    #[serde(rename = "self")]
    Fullstack,
    None,
}

/// Structural class of a backend, used by the resolver's forcing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendClass {
    /// A standalone server app exists (`apps/server`).
    Server,
    /// Backend-as-a-service; the provider hosts everything.
    Baas,
    /// The web frontend hosts its own API routes.
    Fullstack,
    /// No server side.
    None,
}

impl Backend {
    pub const ALL: &'static [Backend] = &[
        Self::Hono,
        Self::Express,
        Self::Fastify,
        Self::Elysia,
        Self::Convex,
        Self::Fullstack,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hono => "hono",
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::Elysia => "elysia",
            Self::Convex => "convex",
            Self::Fullstack => "self",
            Self::None => "none",
        }
    }

    pub const fn class(&self) -> BackendClass {
        match self {
            Self::Hono | Self::Express | Self::Fastify | Self::Elysia => BackendClass::Server,
            Self::Convex => BackendClass::Baas,
            Self::Fullstack => BackendClass::Fullstack,
            Self::None => BackendClass::None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hono" => Ok(Self::Hono),
            "express" => Ok(Self::Express),
            "fastify" => Ok(Self::Fastify),
            "elysia" => Ok(Self::Elysia),
            "convex" => Ok(Self::Convex),
            "self" | "fullstack" => Ok(Self::Fullstack),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Backend,
                value: other.to_string(),
            }),
        }
    }
}

// ── Runtime ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Runtime {
    Node,
    Bun,
    Workers,
    None,
}

impl Runtime {
    pub const ALL: &'static [Runtime] = &[Self::Node, Self::Bun, Self::Workers, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Bun => "bun",
            Self::Workers => "workers",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "node" | "nodejs" => Ok(Self::Node),
            "bun" => Ok(Self::Bun),
            "workers" | "cloudflare-workers" => Ok(Self::Workers),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Runtime,
                value: other.to_string(),
            }),
        }
    }
}

// ── Database / ORM ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    Sqlite,
    Postgres,
    Mysql,
    Mongodb,
    None,
}

impl Database {
    pub const ALL: &'static [Database] = &[
        Self::Sqlite,
        Self::Postgres,
        Self::Mysql,
        Self::Mongodb,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mongodb => "mongodb",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "turso" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Database,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orm {
    Drizzle,
    Prisma,
    Mongoose,
    None,
}

impl Orm {
    pub const ALL: &'static [Orm] = &[Self::Drizzle, Self::Prisma, Self::Mongoose, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drizzle => "drizzle",
            Self::Prisma => "prisma",
            Self::Mongoose => "mongoose",
            Self::None => "none",
        }
    }

    /// Databases this ORM can talk to.
    ///
    /// Mongoose is a document-store-only ORM; Drizzle and Prisma cover the
    /// relational set (Prisma additionally covers MongoDB).
    pub const fn supported_databases(&self) -> &'static [Database] {
        match self {
            Self::Drizzle => &[Database::Sqlite, Database::Postgres, Database::Mysql],
            Self::Prisma => &[
                Database::Sqlite,
                Database::Postgres,
                Database::Mysql,
                Database::Mongodb,
            ],
            Self::Mongoose => &[Database::Mongodb],
            Self::None => &[],
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drizzle" => Ok(Self::Drizzle),
            "prisma" => Ok(Self::Prisma),
            "mongoose" => Ok(Self::Mongoose),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Orm,
                value: other.to_string(),
            }),
        }
    }
}

// ── Auth / Payments / API ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Auth {
    BetterAuth,
    Clerk,
    None,
}

impl Auth {
    pub const ALL: &'static [Auth] = &[Self::BetterAuth, Self::Clerk, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BetterAuth => "better-auth",
            Self::Clerk => "clerk",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Auth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "better-auth" | "betterauth" => Ok(Self::BetterAuth),
            "clerk" => Ok(Self::Clerk),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Auth,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Payments {
    Polar,
    None,
}

impl Payments {
    pub const ALL: &'static [Payments] = &[Self::Polar, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Polar => "polar",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Payments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Payments {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "polar" => Ok(Self::Polar),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Payments,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Api {
    Trpc,
    Orpc,
    None,
}

impl Api {
    pub const ALL: &'static [Api] = &[Self::Trpc, Self::Orpc, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trpc => "trpc",
            Self::Orpc => "orpc",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Api {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trpc" => Ok(Self::Trpc),
            "orpc" => Ok(Self::Orpc),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Api,
                value: other.to_string(),
            }),
        }
    }
}

// ── Addons / Examples ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Addon {
    Pwa,
    Tauri,
    Biome,
    Husky,
    Turborepo,
    Starlight,
    None,
}

impl Addon {
    pub const ALL: &'static [Addon] = &[
        Self::Pwa,
        Self::Tauri,
        Self::Biome,
        Self::Husky,
        Self::Turborepo,
        Self::Starlight,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pwa => "pwa",
            Self::Tauri => "tauri",
            Self::Biome => "biome",
            Self::Husky => "husky",
            Self::Turborepo => "turborepo",
            Self::Starlight => "starlight",
            Self::None => "none",
        }
    }

    /// Frontends this addon works with. An empty list means the addon is
    /// compatible with everything.
    pub const fn frontend_allow_list(&self) -> &'static [Frontend] {
        match self {
            Self::Pwa => &[
                Frontend::TanstackRouter,
                Frontend::ReactRouter,
                Frontend::Solid,
                Frontend::Next,
            ],
            Self::Tauri => &[
                Frontend::TanstackRouter,
                Frontend::ReactRouter,
                Frontend::Next,
                Frontend::Nuxt,
                Frontend::Svelte,
                Frontend::Solid,
            ],
            Self::Biome | Self::Husky | Self::Turborepo | Self::Starlight | Self::None => &[],
        }
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Addon {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pwa" => Ok(Self::Pwa),
            "tauri" => Ok(Self::Tauri),
            "biome" => Ok(Self::Biome),
            "husky" => Ok(Self::Husky),
            "turborepo" | "turbo" => Ok(Self::Turborepo),
            "starlight" => Ok(Self::Starlight),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Addons,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExampleApp {
    Todo,
    Ai,
    None,
}

impl ExampleApp {
    pub const ALL: &'static [ExampleApp] = &[Self::Todo, Self::Ai, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Ai => "ai",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ExampleApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleApp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "ai" => Ok(Self::Ai),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::Examples,
                value: other.to_string(),
            }),
        }
    }
}

// ── Database setup providers ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DbSetup {
    Turso,
    Neon,
    PrismaPostgres,
    MongodbAtlas,
    Supabase,
    D1,
    Docker,
    None,
}

impl DbSetup {
    pub const ALL: &'static [DbSetup] = &[
        Self::Turso,
        Self::Neon,
        Self::PrismaPostgres,
        Self::MongodbAtlas,
        Self::Supabase,
        Self::D1,
        Self::Docker,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Turso => "turso",
            Self::Neon => "neon",
            Self::PrismaPostgres => "prisma-postgres",
            Self::MongodbAtlas => "mongodb-atlas",
            Self::Supabase => "supabase",
            Self::D1 => "d1",
            Self::Docker => "docker",
            Self::None => "none",
        }
    }

    /// Databases this provider can set up. Empty means "no constraint"
    /// (only `None` qualifies).
    pub const fn supported_databases(&self) -> &'static [Database] {
        match self {
            Self::Turso | Self::D1 => &[Database::Sqlite],
            Self::Neon | Self::PrismaPostgres | Self::Supabase => &[Database::Postgres],
            Self::MongodbAtlas => &[Database::Mongodb],
            Self::Docker => &[Database::Postgres, Database::Mysql, Database::Mongodb],
            Self::None => &[],
        }
    }
}

impl fmt::Display for DbSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbSetup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turso" => Ok(Self::Turso),
            "neon" => Ok(Self::Neon),
            "prisma-postgres" => Ok(Self::PrismaPostgres),
            "mongodb-atlas" | "atlas" => Ok(Self::MongodbAtlas),
            "supabase" => Ok(Self::Supabase),
            "d1" => Ok(Self::D1),
            "docker" => Ok(Self::Docker),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::DbSetup,
                value: other.to_string(),
            }),
        }
    }
}

// ── Deploy targets ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebDeploy {
    Wrangler,
    Alchemy,
    None,
}

impl WebDeploy {
    pub const ALL: &'static [WebDeploy] = &[Self::Wrangler, Self::Alchemy, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wrangler => "wrangler",
            Self::Alchemy => "alchemy",
            Self::None => "none",
        }
    }
}

impl fmt::Display for WebDeploy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebDeploy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrangler" | "cloudflare" => Ok(Self::Wrangler),
            "alchemy" => Ok(Self::Alchemy),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::WebDeploy,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerDeploy {
    Wrangler,
    Alchemy,
    None,
}

impl ServerDeploy {
    pub const ALL: &'static [ServerDeploy] = &[Self::Wrangler, Self::Alchemy, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wrangler => "wrangler",
            Self::Alchemy => "alchemy",
            Self::None => "none",
        }
    }

    /// The runtime this target requires, when it requires one.
    ///
    /// Used both to reject an explicit incompatible runtime and to
    /// auto-select the runtime when only the deploy target was chosen.
    pub const fn required_runtime(&self) -> Option<Runtime> {
        match self {
            Self::Wrangler => Some(Runtime::Workers),
            Self::Alchemy | Self::None => None,
        }
    }
}

impl fmt::Display for ServerDeploy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerDeploy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrangler" | "cloudflare" => Ok(Self::Wrangler),
            "alchemy" => Ok(Self::Alchemy),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::ServerDeploy,
                value: other.to_string(),
            }),
        }
    }
}

// ── Non-semantic axes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: &'static [PackageManager] = &[Self::Npm, Self::Pnpm, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// The run-command prefix for generated README/scripts.
    pub const fn run_command(&self) -> &'static str {
        match self {
            Self::Npm => "npm run",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownAxisValue {
                axis: Axis::PackageManager,
                value: other.to_string(),
            }),
        }
    }
}

/// What the materializer should do when the destination already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryConflict {
    #[default]
    Error,
    Merge,
    Overwrite,
    Increment,
}

impl DirectoryConflict {
    pub const ALL: &'static [DirectoryConflict] =
        &[Self::Error, Self::Merge, Self::Overwrite, Self::Increment];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Merge => "merge",
            Self::Overwrite => "overwrite",
            Self::Increment => "increment",
        }
    }
}

impl fmt::Display for DirectoryConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryConflict {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "merge" => Ok(Self::Merge),
            "overwrite" => Ok(Self::Overwrite),
            "increment" => Ok(Self::Increment),
            other => Err(DomainError::InvalidInput(format!(
                "unknown directory-conflict policy: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kebab_case() {
        assert_eq!(Frontend::TanstackRouter.to_string(), "tanstack-router");
        assert_eq!(Backend::Fullstack.to_string(), "self");
        assert_eq!(DbSetup::PrismaPostgres.to_string(), "prisma-postgres");
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("nextjs".parse::<Frontend>().unwrap(), Frontend::Next);
        assert_eq!("fullstack".parse::<Backend>().unwrap(), Backend::Fullstack);
        assert_eq!("pg".parse::<Database>().unwrap(), Database::Postgres);
        assert_eq!("turbo".parse::<Addon>().unwrap(), Addon::Turborepo);
        assert_eq!(
            "cloudflare".parse::<ServerDeploy>().unwrap(),
            ServerDeploy::Wrangler
        );
    }

    #[test]
    fn from_str_unknown_errors() {
        assert!("angular".parse::<Frontend>().is_err());
        assert!("".parse::<Backend>().is_err());
        assert!("maven".parse::<PackageManager>().is_err());
    }

    #[test]
    fn frontend_classes() {
        assert_eq!(Frontend::Next.class(), FrontendClass::Web);
        assert_eq!(Frontend::NativeNativewind.class(), FrontendClass::Native);
        assert_eq!(Frontend::None.class(), FrontendClass::None);
    }

    #[test]
    fn backend_classes() {
        assert_eq!(Backend::Hono.class(), BackendClass::Server);
        assert_eq!(Backend::Convex.class(), BackendClass::Baas);
        assert_eq!(Backend::Fullstack.class(), BackendClass::Fullstack);
        assert_eq!(Backend::None.class(), BackendClass::None);
    }

    #[test]
    fn mongoose_is_document_store_only() {
        assert_eq!(Orm::Mongoose.supported_databases(), &[Database::Mongodb]);
        assert!(!Orm::Drizzle.supported_databases().contains(&Database::Mongodb));
    }

    #[test]
    fn wrangler_server_deploy_requires_workers() {
        assert_eq!(
            ServerDeploy::Wrangler.required_runtime(),
            Some(Runtime::Workers)
        );
        assert_eq!(ServerDeploy::Alchemy.required_runtime(), None);
    }

    #[test]
    fn addon_allow_lists() {
        assert!(Addon::Pwa.frontend_allow_list().contains(&Frontend::Next));
        assert!(!Addon::Pwa.frontend_allow_list().contains(&Frontend::Nuxt));
        // Empty list means universal.
        assert!(Addon::Biome.frontend_allow_list().is_empty());
    }

    #[test]
    fn serde_round_trip_uses_kebab_case() {
        let json = serde_json::to_string(&Frontend::TanstackStart).unwrap();
        assert_eq!(json, "\"tanstack-start\"");
        let back: Frontend = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Frontend::TanstackStart);

        assert_eq!(serde_json::to_string(&Backend::Fullstack).unwrap(), "\"self\"");
    }
}
