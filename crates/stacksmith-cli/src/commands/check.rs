//! Implementation of the `stacksmith check` command.
//!
//! Resolve-only validation: runs the full default-fill / coercion / rule
//! pipeline and prints the resolved stack, without touching any corpus or
//! the filesystem.  Intended for scripts and CI, so `--output-format json`
//! emits the resolved configuration on stdout.

use tracing::instrument;

use stacksmith_core::domain::{ResolveOptions, ResolvedConfig, Resolver};

use crate::{
    cli::{CheckArgs, GlobalArgs, OutputFormat},
    commands::selection::build_selection,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stacksmith check` command.
#[instrument(skip_all)]
pub fn execute(
    args: CheckArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let selection = build_selection(&args.stack, &config)?;

    let resolved = Resolver::new()
        .resolve(
            &selection,
            &ResolveOptions {
                bypass_checks: args.stack.bypass_checks,
            },
        )
        .map_err(|e| CliError::Core(e.into()))?;

    if output.format() == OutputFormat::Json {
        let json =
            serde_json::to_string_pretty(&resolved).map_err(|e| CliError::InvalidInput {
                message: format!("cannot serialize resolved configuration: {e}"),
            })?;
        // JSON goes straight to stdout so it stays parseable in pipes.
        println!("{json}");
        return Ok(());
    }

    output.success("Selection is valid")?;
    print_matrix(&resolved, &output)?;
    Ok(())
}

fn print_matrix(resolved: &ResolvedConfig, out: &OutputManager) -> CliResult<()> {
    let list = |items: &[String]| {
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    };
    let frontends: Vec<String> = resolved.frontend().iter().map(|f| f.to_string()).collect();
    let addons: Vec<String> = resolved.addons().iter().map(|a| a.to_string()).collect();
    let examples: Vec<String> = resolved.examples().iter().map(|e| e.to_string()).collect();

    out.print("")?;
    out.print(&format!("  frontend:          {}", list(&frontends)))?;
    out.print(&format!("  backend:           {}", resolved.backend()))?;
    out.print(&format!("  runtime:           {}", resolved.runtime()))?;
    out.print(&format!("  database:          {}", resolved.database()))?;
    out.print(&format!("  orm:               {}", resolved.orm()))?;
    out.print(&format!("  auth:              {}", resolved.auth()))?;
    out.print(&format!("  payments:          {}", resolved.payments()))?;
    out.print(&format!("  api:               {}", resolved.api()))?;
    out.print(&format!("  addons:            {}", list(&addons)))?;
    out.print(&format!("  examples:          {}", list(&examples)))?;
    out.print(&format!("  db-setup:          {}", resolved.db_setup()))?;
    out.print(&format!("  web-deploy:        {}", resolved.web_deploy()))?;
    out.print(&format!("  server-deploy:     {}", resolved.server_deploy()))?;
    out.print(&format!(
        "  package-manager:   {}",
        resolved.package_manager()
    ))?;
    Ok(())
}
