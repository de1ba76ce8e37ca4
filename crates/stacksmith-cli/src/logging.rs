//! Wires the `-v`/`-q` flags to a tracing subscriber.
//!
//! `stacksmith-core` and `stacksmith-adapters` emit spans and events but
//! never install a subscriber; that happens once here, at process startup.
//! The repeat count of `-v` picks the filter level (warn by default, then
//! info, debug, trace), `--quiet` pins it to error, and a set `RUST_LOG`
//! replaces the whole filter.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the process-wide tracing subscriber.
///
/// Call once before any tracing macro fires; a second call fails rather than
/// panicking.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    // A user-supplied RUST_LOG is taken verbatim. The fallback filter names
    // all three workspace crates so a single -v raises them together.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "stacksmith={level},stacksmith_core={level},stacksmith_adapters={level}",
        ))
    });

    // Diagnostics share stderr with error output, so color tracks stderr
    // rather than stdout.
    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn flag_count_selects_the_level() {
        let cases = [
            (0, "warn"),
            (1, "info"),
            (2, "debug"),
            (3, "trace"),
            (9, "trace"),
        ];
        for (count, expected) in cases {
            assert_eq!(derive_level(&args(count, false)), expected, "-v x{count}");
        }
    }

    #[test]
    fn quiet_pins_the_level_to_error() {
        assert_eq!(derive_level(&args(0, true)), "error");
        // clap rejects -q -v together, but the mapping must not depend on it.
        assert_eq!(derive_level(&args(3, true)), "error");
    }
}
