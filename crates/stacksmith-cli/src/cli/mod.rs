//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here: axis strings
//! are parsed against the core enums in `commands::selection`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stacksmith",
    bin_name = "stacksmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Declarative TypeScript monorepo generator",
    long_about = "Stacksmith resolves a multi-axis stack selection against a \
                  compatibility rule set and generates a ready-to-run \
                  TypeScript monorepo with pinned dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 stacksmith new my-app\n\
        \x20 stacksmith new my-app --frontend next --backend hono --database postgres --orm drizzle\n\
        \x20 stacksmith check --database mongodb --orm mongoose\n\
        \x20 stacksmith list\n\
        \x20 stacksmith completions bash > /usr/share/bash-completion/completions/stacksmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new monorepo from a stack selection.
    #[command(
        visible_alias = "n",
        about = "Generate a new monorepo",
        after_help = "EXAMPLES:\n\
            \x20 stacksmith new my-app --yes\n\
            \x20 stacksmith new my-app --frontend tanstack-router --backend hono --database sqlite\n\
            \x20 stacksmith new my-app --frontend next --backend self --dry-run\n\
            \x20 stacksmith new apps/my-app --database postgres --orm drizzle --db-setup neon"
    )]
    New(NewArgs),

    /// Validate a stack selection without generating anything.
    #[command(
        about = "Validate a stack selection",
        after_help = "EXAMPLES:\n\
            \x20 stacksmith check --database mongodb --orm drizzle\n\
            \x20 stacksmith check --frontend nuxt --api trpc\n\
            \x20 stacksmith check --backend convex --output-format json"
    )]
    Check(CheckArgs),

    /// List every axis and its accepted values.
    #[command(
        visible_alias = "ls",
        about = "List axes and values",
        after_help = "EXAMPLES:\n\
            \x20 stacksmith list\n\
            \x20 stacksmith list frontend\n\
            \x20 stacksmith list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stacksmith completions bash > ~/.local/share/bash-completion/completions/stacksmith\n\
            \x20 stacksmith completions zsh  > ~/.zfunc/_stacksmith\n\
            \x20 stacksmith completions fish > ~/.config/fish/completions/stacksmith.fish"
    )]
    Completions(CompletionsArgs),
}

// ── stack axes ────────────────────────────────────────────────────────────────

/// The per-axis selection flags, shared by `new` and `check`.
///
/// Every flag is optional; an omitted axis takes the built-in default and
/// stays eligible for coercion during resolution.  Values are plain strings
/// here and parsed against the core axis enums in `commands::selection`, so
/// a typo produces a suggestion listing the accepted values.
#[derive(Debug, Default, Args)]
pub struct StackArgs {
    /// Frontends (at most one web, one native).
    #[arg(
        long = "frontend",
        value_name = "FRONTEND",
        value_delimiter = ',',
        help = "Frontend(s), e.g. tanstack-router, next, native-nativewind"
    )]
    pub frontend: Vec<String>,

    /// Backend framework.
    #[arg(long = "backend", value_name = "BACKEND", help = "Backend framework")]
    pub backend: Option<String>,

    /// Server runtime.
    #[arg(long = "runtime", value_name = "RUNTIME", help = "Server runtime")]
    pub runtime: Option<String>,

    /// Database engine.
    #[arg(long = "database", value_name = "DATABASE", help = "Database engine")]
    pub database: Option<String>,

    /// ORM / data layer.
    #[arg(long = "orm", value_name = "ORM", help = "ORM / data layer")]
    pub orm: Option<String>,

    /// Authentication provider.
    #[arg(long = "auth", value_name = "AUTH", help = "Authentication provider")]
    pub auth: Option<String>,

    /// Payments provider.
    #[arg(long = "payments", value_name = "PAYMENTS", help = "Payments provider")]
    pub payments: Option<String>,

    /// API layer.
    #[arg(long = "api", value_name = "API", help = "API layer (trpc, orpc, none)")]
    pub api: Option<String>,

    /// Tooling addons.
    #[arg(
        long = "addons",
        value_name = "ADDON",
        value_delimiter = ',',
        help = "Addons, e.g. turborepo,biome,pwa"
    )]
    pub addons: Vec<String>,

    /// Example applications.
    #[arg(
        long = "examples",
        value_name = "EXAMPLE",
        value_delimiter = ',',
        help = "Example apps (todo, ai)"
    )]
    pub examples: Vec<String>,

    /// Database provisioning flavour.
    #[arg(long = "db-setup", value_name = "SETUP", help = "Database provisioning")]
    pub db_setup: Option<String>,

    /// Web deployment target.
    #[arg(long = "web-deploy", value_name = "TARGET", help = "Web deployment target")]
    pub web_deploy: Option<String>,

    /// Server deployment target.
    #[arg(
        long = "server-deploy",
        value_name = "TARGET",
        help = "Server deployment target"
    )]
    pub server_deploy: Option<String>,

    /// Package manager.
    #[arg(
        short = 'p',
        long = "package-manager",
        value_name = "PM",
        help = "Package manager (npm, pnpm, bun)"
    )]
    pub package_manager: Option<String>,

    /// Skip git repository flag in the generated project.
    #[arg(long = "no-git", help = "Skip git repository initialisation")]
    pub no_git: bool,

    /// Run the package manager install after generation.
    #[arg(long = "install", help = "Install dependencies after generation")]
    pub install: bool,

    /// What to do when the destination directory already exists.
    #[arg(
        long = "directory-conflict",
        value_name = "POLICY",
        help = "Existing-directory policy (error, merge, overwrite, increment)"
    )]
    pub directory_conflict: Option<String>,

    /// Skip the compatibility rule set (structural checks still apply).
    #[arg(
        long = "bypass-checks",
        help = "Accept the selection verbatim, skipping compatibility rules"
    )]
    pub bypass_checks: bool,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stacksmith new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `apps/foo` places the project under `apps/`.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Per-axis stack selection.
    #[command(flatten)]
    pub stack: StackArgs,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and generate immediately"
    )]
    pub yes: bool,

    /// Compose and inject, print the would-be tree, write nothing.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,

    /// Read template fragments from a directory instead of the embedded set.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template directory (default: embedded templates)"
    )]
    pub templates: Option<PathBuf>,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `stacksmith check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Per-axis stack selection.
    #[command(flatten)]
    pub stack: StackArgs,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stacksmith list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict output to a single axis.
    #[arg(value_name = "AXIS", help = "Axis to list (default: all)")]
    pub axis: Option<String>,

    /// Shape of the listing.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Listing shape (table, list, json, csv)"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One value per line.
    List,
    /// JSON object keyed by axis.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stacksmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "stacksmith",
            "new",
            "my-app",
            "--frontend",
            "next",
            "--database",
            "postgres",
            "--orm",
            "drizzle",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "my-app");
        assert_eq!(args.stack.frontend, vec!["next"]);
        assert_eq!(args.stack.database.as_deref(), Some("postgres"));
    }

    #[test]
    fn comma_delimited_multi_values() {
        let cli = Cli::parse_from([
            "stacksmith",
            "new",
            "demo",
            "--addons",
            "turborepo,biome",
            "--examples",
            "todo",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.stack.addons, vec!["turborepo", "biome"]);
        assert_eq!(args.stack.examples, vec!["todo"]);
    }

    #[test]
    fn check_takes_axis_flags_without_name() {
        let cli = Cli::parse_from(["stacksmith", "check", "--database", "mongodb"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected Check command");
        };
        assert_eq!(args.stack.database.as_deref(), Some("mongodb"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["stacksmith", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_accepts_axis_filter() {
        let cli = Cli::parse_from(["stacksmith", "list", "frontend", "--format", "json"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.axis.as_deref(), Some("frontend"));
        assert!(matches!(args.format, ListFormat::Json));
    }
}
