//! Build service - main application orchestrator.
//!
//! Coordinates the whole generation workflow:
//! 1. Validate the project name
//! 2. Resolve the stack selection
//! 3. Compose the virtual tree from the corpus
//! 4. Inject dependencies into composed manifests
//! 5. Materialize to disk (skipped for dry runs)
//!
//! Everything up to the final step is pure; a failure anywhere before
//! materialization leaves the filesystem untouched.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::application::ports::{Materializer, TemplateCorpus};
use crate::application::services::composer::Composer;
use crate::application::services::injector::DependencyInjector;
use crate::domain::{
    Defaults, DependencyCatalog, DomainError, RenderVars, ResolveOptions, ResolvedConfig,
    Resolver, StackSelection,
};
use crate::error::CoreResult;

/// Everything needed for one generation run.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub project_name: String,
    /// Directory the project lands in (already includes the project name).
    pub root: PathBuf,
    pub selection: StackSelection,
    pub bypass_checks: bool,
    /// Resolve, compose, and inject, but never touch the filesystem.
    pub dry_run: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Directory actually written (may differ under the increment policy).
    pub root: PathBuf,
    pub config: ResolvedConfig,
    /// Files in the composed tree.
    pub file_count: usize,
    /// Tree paths in walk order, relative to the project root.
    pub paths: Vec<String>,
    /// Files written to disk; zero for dry runs.
    pub files_written: usize,
    pub elapsed: Duration,
    pub dry_run: bool,
}

/// Main generation service.
pub struct BuildService {
    resolver: Resolver,
    composer: Composer,
    injector: DependencyInjector,
    materializer: Box<dyn Materializer>,
}

impl BuildService {
    /// Service with the default rule set and pinned catalog.
    pub fn new(corpus: Box<dyn TemplateCorpus>, materializer: Box<dyn Materializer>) -> Self {
        Self::with_defaults(Defaults::default(), corpus, materializer)
    }

    pub fn with_defaults(
        defaults: Defaults,
        corpus: Box<dyn TemplateCorpus>,
        materializer: Box<dyn Materializer>,
    ) -> Self {
        Self {
            resolver: Resolver::with_defaults(defaults),
            composer: Composer::new(corpus),
            injector: DependencyInjector::new(DependencyCatalog::builtin()),
            materializer,
        }
    }

    /// Resolve a selection without generating anything.
    pub fn resolve(
        &self,
        selection: &StackSelection,
        bypass_checks: bool,
    ) -> CoreResult<ResolvedConfig> {
        Ok(self
            .resolver
            .resolve(selection, &ResolveOptions { bypass_checks })?)
    }

    /// Run the full workflow.
    #[instrument(skip_all, fields(project = %request.project_name, dry_run = request.dry_run))]
    pub fn build(&self, request: &BuildRequest) -> CoreResult<BuildReport> {
        let started = Instant::now();
        validate_project_name(&request.project_name)?;

        let config = self.resolve(&request.selection, request.bypass_checks)?;
        let vars = RenderVars::for_project(&request.project_name, &config);

        let mut tree = self.composer.compose(&config, &vars)?;
        self.injector
            .inject(&mut tree, &request.project_name, &config)?;
        let paths: Vec<String> = tree.files().into_iter().map(|(path, _)| path).collect();
        let file_count = paths.len();

        if request.dry_run {
            info!(files = file_count, "dry run complete");
            return Ok(BuildReport {
                root: request.root.clone(),
                config,
                file_count,
                paths,
                files_written: 0,
                elapsed: started.elapsed(),
                dry_run: true,
            });
        }

        let outcome =
            self.materializer
                .materialize(&request.root, &tree, config.directory_conflict())?;
        info!(
            files = outcome.files_written,
            root = %outcome.root.display(),
            "project generated"
        );
        Ok(BuildReport {
            root: outcome.root,
            config,
            file_count,
            paths,
            files_written: outcome.files_written,
            elapsed: started.elapsed(),
            dry_run: false,
        })
    }
}

/// Project names become directory names and the root manifest's `name`
/// field, so both filesystem and npm constraints apply.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > 214 {
        return Err(invalid("name exceeds 214 characters"));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or('-');
    if !first.is_ascii_lowercase() {
        return Err(invalid("name must start with a lowercase letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(invalid(
            "only lowercase letters, digits, '-' and '_' are allowed",
        ));
    }
    Ok(())
}

/// Suggested follow-up commands once a project exists on disk.
pub fn next_steps(report: &BuildReport, root: &Path) -> Vec<String> {
    let run = report.config.package_manager().run_command();
    let mut steps = vec![format!("cd {}", root.display())];
    if !report.config.install() {
        steps.push(format!("{} install", report.config.package_manager()));
    }
    steps.push(format!("{run} dev"));
    steps
}
