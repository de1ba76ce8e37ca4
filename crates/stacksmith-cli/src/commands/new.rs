//! Implementation of the `stacksmith new` command.
//!
//! Responsibility: translate CLI arguments into a `BuildRequest`, call the
//! core build service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stacksmith_adapters::{DirCorpus, InMemoryCorpus, LocalMaterializer};
use stacksmith_core::application::{BuildRequest, BuildService, TemplateCorpus, next_steps};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::selection::build_selection,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stacksmith new` command.
///
/// Dispatch sequence:
/// 1. Split the NAME argument into project name and destination path
/// 2. Convert CLI args + config defaults into a `StackSelection`
/// 3. Resolve the selection and show the configuration
/// 4. Confirm with user unless `--yes` or `--quiet`
/// 5. Execute the build (dry runs stop before the filesystem)
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;

    // 2. Build the selection (flags + config defaults)
    let selection = build_selection(&args.stack, &config)?;

    // 3. Resolve early so the confirmation shows the *coerced* stack, and a
    //    bad selection fails before any prompt.
    let corpus = make_corpus(args.templates.as_deref(), &config);
    let service = BuildService::new(corpus, Box::new(LocalMaterializer::new()));
    let resolved = service.resolve(&selection, args.stack.bypass_checks)?;

    debug!(
        backend = %resolved.backend(),
        runtime = %resolved.runtime(),
        database = %resolved.database(),
        orm = %resolved.orm(),
        "Selection resolved"
    );

    // 4. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&resolved, &project_name, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Build
    let request = BuildRequest {
        project_name: project_name.clone(),
        root: project_path.clone(),
        selection,
        bypass_checks: args.stack.bypass_checks,
        dry_run: args.dry_run,
    };

    output.header(&format!("Generating '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "Build started");

    let report = service.build(&request)?;

    info!(project = %project_name, files = report.files_written, "Build completed");

    // 6. Dry run: print the would-be tree and stop.
    if report.dry_run {
        output.info(&format!(
            "Dry run: would generate {} file(s) at {}",
            report.file_count,
            report.root.display(),
        ))?;
        for path in &report.paths {
            output.print(&format!("  {path}"))?;
        }
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' generated: {} file(s) in {:.1?}",
        project_name, report.files_written, report.elapsed,
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        for step in next_steps(&report, &report.root) {
            output.print(&format!("  {step}"))?;
        }
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split the NAME argument into the project name (last path component) and
/// the full destination directory.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

// ── Corpus selection ──────────────────────────────────────────────────────────

fn make_corpus(templates: Option<&Path>, config: &AppConfig) -> Box<dyn TemplateCorpus> {
    match templates.or(config.templates.dir.as_deref()) {
        Some(dir) => Box::new(DirCorpus::new(dir)),
        None => Box::new(InMemoryCorpus::with_builtin()),
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    resolved: &stacksmith_core::domain::ResolvedConfig,
    name: &str,
    project_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    let frontends = resolved
        .frontend()
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    out.header("Configuration")?;
    out.print(&format!("  Project:          {name}"))?;
    out.print(&format!("  Frontend:         {frontends}"))?;
    out.print(&format!("  Backend:          {}", resolved.backend()))?;
    out.print(&format!("  Runtime:          {}", resolved.runtime()))?;
    out.print(&format!("  Database:         {}", resolved.database()))?;
    out.print(&format!("  ORM:              {}", resolved.orm()))?;
    out.print(&format!("  Auth:             {}", resolved.auth()))?;
    out.print(&format!("  API:              {}", resolved.api()))?;
    out.print(&format!(
        "  Package manager:  {}",
        resolved.package_manager()
    ))?;
    out.print(&format!("  Location:         {}", project_path.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_resolves_to_cwd() {
        let (name, dir) = resolve_project_path("my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("my-app"));
    }

    #[test]
    fn relative_path_splits_leaf() {
        let (name, dir) = resolve_project_path("../my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("../my-app"));
    }

    #[test]
    fn nested_path_keeps_full_destination() {
        let (name, dir) = resolve_project_path("apps/my-app").unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("apps/my-app"));
    }

    #[test]
    fn trailing_parent_component_is_rejected() {
        assert!(resolve_project_path("my-app/..").is_err());
    }
}
