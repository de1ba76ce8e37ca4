//! Binary entry point for `stacksmith`, the TypeScript monorepo generator.
//!
//! `main` does the plumbing in a fixed order (arguments, logging, config
//! file, output manager) and only then hands off to a command handler. Each
//! stage that can fail maps to its own exit code so scripts can tell a bad
//! selection from a broken config file:
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / selection error  |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // .env first so RUST_LOG and NO_COLOR set there reach the stages below.
    // A missing file is not an error.
    let _ = dotenvy::dotenv();

    // `exit` prints --help / --version to stdout and exits 0; a genuine
    // parse failure goes to stderr with exit code 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Configuration error: {e:#}");
            return ExitCode::from(4);
        }
    };

    let output = OutputManager::new(&cli.global, &config);

    let verbose = cli.global.verbose > 0;
    match run(cli, config, output) {
        Ok(()) => {
            info!("Stacksmith completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::Check(cmd) => commands::check::execute(cmd, cli.global, config, output),
        Commands::List(cmd) => commands::list::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
    }
}

/// Render a failed command for the user and pick the process exit code.
///
/// Failures land on stderr, not the [`OutputManager`]: stdout may be JSON or
/// redirected, and errors must show up regardless. Styling follows whether
/// stderr itself is a terminal.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_internally_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_command_handler_has_a_subcommand() {
        // The run() dispatch arms must stay in lockstep with the declared
        // subcommands.
        let cmd = Cli::command();
        let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        for expected in ["new", "check", "list", "completions"] {
            assert!(names.contains(&expected), "missing subcommand {expected}");
        }
    }

    #[test]
    fn version_comes_from_the_manifest() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }
}
