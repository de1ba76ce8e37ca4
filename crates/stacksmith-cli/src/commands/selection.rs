//! Translation of raw `--axis value` strings into a core `StackSelection`.
//!
//! Axis values stay plain strings at the clap layer so one failure path can
//! list the accepted values for exactly the axis that was mistyped.  Config
//! file defaults are folded in here too: a value from the config file counts
//! as explicit, the same as a flag.

use std::str::FromStr;

use stacksmith_core::domain::{
    Addon, Api, Auth, Backend, Database, DbSetup, DirectoryConflict, ExampleApp, Frontend, Orm,
    PackageManager, Payments, Runtime, ServerDeploy, StackSelection, WebDeploy,
};

use crate::{
    cli::StackArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Parse one axis value, or fail listing every accepted value for the axis.
macro_rules! parse_axis {
    ($axis:literal, $value:expr, $ty:ty) => {
        <$ty>::from_str($value).map_err(|_| CliError::AxisValueNotAvailable {
            axis: $axis,
            value: $value.to_string(),
            available: <$ty>::ALL.iter().map(|v| v.as_str()).collect(),
        })
    };
}

fn parse_opt<T, F>(value: Option<&str>, parse: F) -> CliResult<Option<T>>
where
    F: Fn(&str) -> CliResult<T>,
{
    value.map(parse).transpose()
}

/// Build the core selection from CLI flags, falling back to config defaults
/// for the axes the config file covers.
pub fn build_selection(args: &StackArgs, config: &AppConfig) -> CliResult<StackSelection> {
    let frontend = if args.frontend.is_empty() {
        None
    } else {
        Some(
            args.frontend
                .iter()
                .map(|s| parse_axis!("frontend", s.as_str(), Frontend))
                .collect::<CliResult<Vec<_>>>()?,
        )
    };

    let addons = if args.addons.is_empty() {
        None
    } else {
        Some(
            args.addons
                .iter()
                .map(|s| parse_axis!("addons", s.as_str(), Addon))
                .collect::<CliResult<Vec<_>>>()?,
        )
    };

    let examples = if args.examples.is_empty() {
        None
    } else {
        Some(
            args.examples
                .iter()
                .map(|s| parse_axis!("examples", s.as_str(), ExampleApp))
                .collect::<CliResult<Vec<_>>>()?,
        )
    };

    let package_manager = args
        .package_manager
        .as_deref()
        .or(config.defaults.package_manager.as_deref());

    Ok(StackSelection {
        frontend,
        backend: parse_opt(args.backend.as_deref(), |s| {
            parse_axis!("backend", s, Backend)
        })?,
        runtime: parse_opt(args.runtime.as_deref(), |s| {
            parse_axis!("runtime", s, Runtime)
        })?,
        database: parse_opt(args.database.as_deref(), |s| {
            parse_axis!("database", s, Database)
        })?,
        orm: parse_opt(args.orm.as_deref(), |s| parse_axis!("orm", s, Orm))?,
        auth: parse_opt(args.auth.as_deref(), |s| parse_axis!("auth", s, Auth))?,
        payments: parse_opt(args.payments.as_deref(), |s| {
            parse_axis!("payments", s, Payments)
        })?,
        api: parse_opt(args.api.as_deref(), |s| parse_axis!("api", s, Api))?,
        addons,
        examples,
        db_setup: parse_opt(args.db_setup.as_deref(), |s| {
            parse_axis!("db-setup", s, DbSetup)
        })?,
        web_deploy: parse_opt(args.web_deploy.as_deref(), |s| {
            parse_axis!("web-deploy", s, WebDeploy)
        })?,
        server_deploy: parse_opt(args.server_deploy.as_deref(), |s| {
            parse_axis!("server-deploy", s, ServerDeploy)
        })?,
        package_manager: parse_opt(package_manager, |s| {
            parse_axis!("package-manager", s, PackageManager)
        })?,
        git: if args.no_git {
            Some(false)
        } else {
            config.defaults.git
        },
        install: if args.install {
            Some(true)
        } else {
            config.defaults.install
        },
        directory_conflict: parse_opt(args.directory_conflict.as_deref(), |s| {
            parse_axis!("directory-conflict", s, DirectoryConflict)
        })?,
    })
}
